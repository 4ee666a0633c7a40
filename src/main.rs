use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::{mpsc, Mutex};

use finchat::api::TransportClient;
use finchat::app::{App, AppScreen};
use finchat::chat_view;
use finchat::config;
use finchat::constants::TICK_RATE_MS;
use finchat::key_handlers::{handle_chat_input, handle_quit_confirm_input};

enum Event {
    Input(CEvent),
    Tick,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    config::initialize_config()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(App::new(TransportClient::from_config())));
    {
        let mut guard = app.lock().await;
        guard.begin_welcome(Instant::now());
    }

    let res = run_app(&mut terminal, app).await;

    // Restore the terminal before reporting anything.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err);
    }

    Ok(())
}

/// Main loop: draw, then wait for either an input event or a tick. Exiting
/// this loop stops every animation; no tick ever fires after teardown.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
) -> Result<(), Box<dyn Error>> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Input reader and tick source.
    tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            let timeout = Duration::from_millis(TICK_RATE_MS);
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    if tx.send(Event::Input(event)).await.is_err() {
                        return;
                    }
                }
            }

            if last_tick.elapsed() >= Duration::from_millis(TICK_RATE_MS) {
                if tx.send(Event::Tick).await.is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        {
            let guard = app.lock().await;
            if guard.screen == AppScreen::Quit {
                break;
            }
            terminal.draw(|f| chat_view::draw(f, &guard))?;
        }

        match rx.recv().await {
            Some(Event::Input(CEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                let mut guard = app.lock().await;
                match guard.screen {
                    AppScreen::Chat => handle_chat_input(key, &mut guard, app.clone()),
                    AppScreen::QuitConfirm => handle_quit_confirm_input(key, &mut guard),
                    AppScreen::Quit => {}
                }
            }
            Some(Event::Tick) => {
                let mut guard = app.lock().await;
                guard.on_tick(Instant::now());
            }
            Some(_) => {}
            None => break,
        }
    }

    Ok(())
}
