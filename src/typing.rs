use std::time::{Duration, Instant};

use crate::constants::{METADATA_DELAY_MS, THINKING_INTERVAL_MS, TYPING_INTERVAL_MS};

/// Where the reveal currently stands. A freshly constructed animator starts
/// in `Revealing(0)`; the idle state is simply not having an animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingState {
    /// `Revealing(n)` means the first `n` characters are on screen.
    Revealing(usize),
    RevealComplete,
    MetadataRevealed,
}

/// Store mutation the caller should apply after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingStep {
    /// Set the in-progress message's content to this prefix.
    Reveal(String),
    /// Flip the in-progress message's `metadata_visible` flag.
    ShowMetadata,
}

/// Simulates typing out a string that is already fully known. Driven by
/// `tick(now)` from the event loop; it owns no timers of its own, so tests
/// can feed it fabricated instants.
#[derive(Debug)]
pub struct TypingAnimator {
    target: Vec<char>,
    has_metadata: bool,
    state: TypingState,
    last_step: Instant,
    completed_at: Option<Instant>,
}

impl TypingAnimator {
    pub fn new(target: &str, has_metadata: bool, now: Instant) -> Self {
        TypingAnimator {
            target: target.chars().collect(),
            has_metadata,
            state: TypingState::Revealing(0),
            last_step: now,
            completed_at: None,
        }
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    /// Terminal once the reveal is done and there is no metadata left to
    /// show, or once the metadata is out.
    pub fn is_finished(&self) -> bool {
        match self.state {
            TypingState::Revealing(_) => false,
            TypingState::RevealComplete => !self.has_metadata,
            TypingState::MetadataRevealed => true,
        }
    }

    /// Advances the machine if its interval has elapsed. Returns at most one
    /// step per call; the caller applies it to the last store message.
    pub fn tick(&mut self, now: Instant) -> Option<TypingStep> {
        match self.state {
            TypingState::Revealing(shown) => {
                if now.duration_since(self.last_step)
                    < Duration::from_millis(TYPING_INTERVAL_MS)
                {
                    return None;
                }
                self.last_step = now;
                if shown == self.target.len() {
                    // Covers the empty target: the first due tick lands here.
                    self.state = TypingState::RevealComplete;
                    self.completed_at = Some(now);
                    return None;
                }
                let next = shown + 1;
                self.state = TypingState::Revealing(next);
                Some(TypingStep::Reveal(self.target[..next].iter().collect()))
            }
            TypingState::RevealComplete => {
                if !self.has_metadata {
                    return None;
                }
                let completed_at = self.completed_at.unwrap_or(self.last_step);
                if now.duration_since(completed_at) < Duration::from_millis(METADATA_DELAY_MS) {
                    return None;
                }
                self.state = TypingState::MetadataRevealed;
                Some(TypingStep::ShowMetadata)
            }
            TypingState::MetadataRevealed => None,
        }
    }
}

/// Bounded dot cycle shown while a request is outstanding. Runs on its own
/// interval, independent of any reveal animation, and is switched off the
/// moment a reveal begins.
#[derive(Debug)]
pub struct ThinkingIndicator {
    active: bool,
    dots: usize,
    last_step: Instant,
}

impl ThinkingIndicator {
    pub fn new(now: Instant) -> Self {
        ThinkingIndicator {
            active: false,
            dots: 0,
            last_step: now,
        }
    }

    pub fn set_active(&mut self, active: bool, now: Instant) {
        self.active = active;
        self.dots = 0;
        self.last_step = now;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn tick(&mut self, now: Instant) {
        if !self.active {
            return;
        }
        if now.duration_since(self.last_step) >= Duration::from_millis(THINKING_INTERVAL_MS) {
            self.dots = (self.dots + 1) % 4;
            self.last_step = now;
        }
    }

    pub fn label(&self) -> String {
        if self.active {
            format!("Thinking{}", ".".repeat(self.dots))
        } else {
            String::new()
        }
    }
}
