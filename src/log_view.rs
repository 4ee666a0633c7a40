/// Bounded in-memory log feeding the side pane of the chat screen.
#[derive(Debug, Default)]
pub struct LogView {
    pub entries: Vec<String>,
}

impl LogView {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: String) {
        self.entries.push(entry);
        if self.entries.len() > 200 {
            self.entries.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_most_recent_entries() {
        let mut logs = LogView::new();
        for i in 0..250 {
            logs.add(format!("entry {}", i));
        }
        assert_eq!(logs.entries.len(), 200);
        assert_eq!(logs.entries.first().unwrap(), "entry 50");
        assert_eq!(logs.entries.last().unwrap(), "entry 249");
    }
}
