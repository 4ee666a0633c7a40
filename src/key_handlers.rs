use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::Mutex;

use crate::app::{run_exchange, App, AppScreen};

/// Key handling for the chat screen. Enter submits; Alt+Enter inserts a
/// newline for multi-line input.
pub fn handle_chat_input(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.screen = AppScreen::QuitConfirm;
        }
        (KeyModifiers::ALT, KeyCode::Enter) => {
            app.input.push('\n');
        }
        (_, KeyCode::Enter) => {
            if let Some(query) = app.try_submit(Instant::now()) {
                tokio::spawn(async move {
                    run_exchange(app_arc, query).await;
                });
            }
        }
        (_, KeyCode::Backspace) => {
            app.input.pop();
        }
        (_, KeyCode::PageUp) => app.scroll_up(),
        (_, KeyCode::PageDown) => app.scroll_down(),
        (KeyModifiers::CONTROL, KeyCode::Char(c)) => match c {
            'c' => app.screen = AppScreen::QuitConfirm,
            'u' => app.scroll_up(),
            'd' => app.scroll_down(),
            _ => {}
        },
        (_, KeyCode::Char(c)) => {
            app.input.push(c);
        }
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.screen = AppScreen::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.screen = AppScreen::Chat;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TransportClient;
    use crossterm::event::KeyEvent;

    fn test_app() -> App {
        App::new(TransportClient::new(
            "http://127.0.0.1:1/api/v1/chat/search".to_string(),
            "test-bot".to_string(),
            "test-user".to_string(),
            3,
        ))
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[tokio::test]
    async fn characters_land_in_the_input_buffer() {
        let app_arc = Arc::new(Mutex::new(test_app()));
        let mut app = test_app();
        for c in "hey".chars() {
            handle_chat_input(
                press(KeyCode::Char(c), KeyModifiers::NONE),
                &mut app,
                app_arc.clone(),
            );
        }
        handle_chat_input(
            press(KeyCode::Backspace, KeyModifiers::NONE),
            &mut app,
            app_arc.clone(),
        );
        assert_eq!(app.input, "he");
    }

    #[tokio::test]
    async fn alt_enter_inserts_a_newline_instead_of_submitting() {
        let app_arc = Arc::new(Mutex::new(test_app()));
        let mut app = test_app();
        app.input = "line one".to_string();
        handle_chat_input(
            press(KeyCode::Enter, KeyModifiers::ALT),
            &mut app,
            app_arc.clone(),
        );
        assert_eq!(app.input, "line one\n");
        assert!(app.messages.is_empty());
    }

    #[tokio::test]
    async fn esc_asks_for_quit_confirmation() {
        let app_arc = Arc::new(Mutex::new(test_app()));
        let mut app = test_app();
        handle_chat_input(press(KeyCode::Esc, KeyModifiers::NONE), &mut app, app_arc);
        assert_eq!(app.screen, AppScreen::QuitConfirm);

        handle_quit_confirm_input(press(KeyCode::Char('n'), KeyModifiers::NONE), &mut app);
        assert_eq!(app.screen, AppScreen::Chat);

        app.screen = AppScreen::QuitConfirm;
        handle_quit_confirm_input(press(KeyCode::Char('y'), KeyModifiers::NONE), &mut app);
        assert_eq!(app.screen, AppScreen::Quit);
    }
}
