use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::api::{ChatReply, TransportClient};
use crate::constants::{FALLBACK_TEXT, WELCOME_TEXT};
use crate::log_view::LogView;
use crate::message::{Message, MessageStore};
use crate::typing::{ThinkingIndicator, TypingAnimator, TypingStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Chat,
    QuitConfirm,
    Quit,
}

/// The whole chat widget state. Mutated only through the event loop's mutex,
/// from key handlers, ticks, and the exchange task.
pub struct App {
    pub screen: AppScreen,
    pub messages: MessageStore,
    pub input: String,
    pub pending: bool,
    pub animator: Option<TypingAnimator>,
    pub thinking: ThinkingIndicator,
    pub chat_scroll: u16,
    pub logs_scroll: u16,
    pub logs: LogView,
    pub transport: TransportClient,
}

impl App {
    pub fn new(transport: TransportClient) -> App {
        App {
            screen: AppScreen::Chat,
            messages: MessageStore::new(),
            input: String::new(),
            pending: false,
            animator: None,
            thinking: ThinkingIndicator::new(Instant::now()),
            chat_scroll: 0,
            logs_scroll: 0,
            logs: LogView::new(),
            transport,
        }
    }

    /// One reveal at a time: refuse new submissions while a request is out
    /// or a previous reveal is still typing.
    pub fn is_busy(&self) -> bool {
        self.pending || self.animator.is_some()
    }

    /// Takes the input buffer as a query if there is anything to send. The
    /// user message lands in the store here, before the request is dispatched.
    pub fn try_submit(&mut self, now: Instant) -> Option<String> {
        let query = self.input.trim().to_string();
        if query.is_empty() {
            return None;
        }
        if self.is_busy() {
            self.logs
                .add("Ignoring submission while a reply is in flight".to_string());
            return None;
        }

        self.input.clear();
        self.messages.push(Message::user(query.clone()));
        self.pending = true;
        self.thinking.set_active(true, now);
        self.scroll_to_bottom();
        Some(query)
    }

    /// Appends the bot placeholder and starts its reveal. Both happen under
    /// one borrow, so no tick can observe the placeholder without an animator
    /// or the other way round. Also the moment the thinking ticker stops.
    pub fn start_reveal(&mut self, text: String, metadata: Vec<String>, now: Instant) {
        self.thinking.set_active(false, now);
        let has_metadata = !metadata.is_empty();
        self.messages.push(Message::bot_placeholder(metadata));
        self.animator = Some(TypingAnimator::new(&text, has_metadata, now));
        self.scroll_to_bottom();
    }

    pub fn begin_welcome(&mut self, now: Instant) {
        self.start_reveal(WELCOME_TEXT.to_string(), Vec::new(), now);
    }

    /// Advances the thinking ticker and the reveal animation. Called from the
    /// event loop on every tick; the finished animator is dropped here.
    pub fn on_tick(&mut self, now: Instant) {
        self.thinking.tick(now);

        let step = self.animator.as_mut().and_then(|a| a.tick(now));
        match step {
            Some(TypingStep::Reveal(prefix)) => {
                self.messages.replace_last(|m| m.content = prefix);
                self.scroll_to_bottom();
            }
            Some(TypingStep::ShowMetadata) => {
                self.messages.replace_last(|m| m.metadata_visible = true);
                self.scroll_to_bottom();
            }
            None => {}
        }

        if self.animator.as_ref().map_or(false, |a| a.is_finished()) {
            self.animator = None;
        }
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    /// Clamped down to the real maximum at draw time.
    pub fn scroll_to_bottom(&mut self) {
        self.chat_scroll = u16::MAX;
    }
}

/// Runs one request/response exchange against the remote endpoint. Spawned
/// from the submit handler; the user message is already in the store by then.
/// Every failure is recovered here into the fixed fallback reply.
pub async fn run_exchange(app: Arc<Mutex<App>>, query: String) {
    let transport = {
        let mut guard = app.lock().await;
        guard
            .logs
            .add(format!("Sending query ({} chars)...", query.len()));
        guard.transport.clone()
    };

    let reply = match transport.send(&query).await {
        Ok(reply) => {
            let mut guard = app.lock().await;
            guard.logs.add(format!(
                "Reply received ({} chars, {} metadata)",
                reply.text.chars().count(),
                reply.metadata.len()
            ));
            reply
        }
        Err(e) => {
            let mut guard = app.lock().await;
            guard.logs.add(format!("Exchange failed: {}", e));
            ChatReply {
                text: FALLBACK_TEXT.to_string(),
                metadata: Vec::new(),
            }
        }
    };

    let mut guard = app.lock().await;
    guard.pending = false;
    guard.start_reveal(reply.text, reply.metadata, Instant::now());
}
