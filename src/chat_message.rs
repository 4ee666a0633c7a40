use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

use crate::message::{Message, Sender};

/// Rendering for a single message: bordered header with timestamp, wrapped
/// content, metadata list once revealed, footer.
impl Message {
    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let base_style = self.base_style();

        self.render_header(&mut lines, base_style);
        self.render_content(&mut lines, area, base_style);
        self.render_metadata(&mut lines, area, base_style);
        self.render_footer(&mut lines, base_style);

        lines
    }

    fn base_style(&self) -> Style {
        Style::default().fg(match self.sender {
            Sender::User => Color::Rgb(255, 223, 128), // Warmer yellow
            Sender::Bot => Color::Rgb(144, 238, 144),  // Softer green
        })
    }

    fn indent(&self) -> &'static str {
        match self.sender {
            Sender::User => "  ",
            Sender::Bot => "",
        }
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.timestamp.format("%H:%M").to_string();
        let label = match self.sender {
            Sender::User => "you",
            Sender::Bot => "bot",
        };

        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
            Span::styled(" ".to_string(), style),
            Span::styled(label.to_string(), style.add_modifier(Modifier::DIM)),
        ]));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        let wrap_width = (area.width as usize).saturating_sub(4).max(1);
        for content_line in self.content.lines() {
            for wrapped_line in wrap(content_line, wrap_width) {
                lines.push(Line::from(vec![
                    Span::styled(self.indent().to_string(), style),
                    Span::styled("│ ".to_string(), style),
                    Span::styled(wrapped_line.to_string(), style),
                ]));
            }
        }
        if self.content.is_empty() {
            // Placeholder row so an in-progress message still has a body.
            lines.push(Line::from(vec![
                Span::styled(self.indent().to_string(), style),
                Span::styled("│ ".to_string(), style),
            ]));
        }
    }

    fn render_metadata(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        if !self.metadata_visible || self.metadata.is_empty() {
            return;
        }

        let meta_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC);
        let wrap_width = (area.width as usize).saturating_sub(6).max(1);

        for entry in &self.metadata {
            for (i, wrapped_line) in wrap(entry, wrap_width).iter().enumerate() {
                let bullet = if i == 0 { "▪ " } else { "  " };
                lines.push(Line::from(vec![
                    Span::styled(self.indent().to_string(), style),
                    Span::styled("│ ".to_string(), style),
                    Span::styled(bullet.to_string(), meta_style),
                    Span::styled(wrapped_line.to_string(), meta_style),
                ]));
            }
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }
}
