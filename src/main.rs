mod app;
mod handlers;
mod model;
mod services;
mod state;
mod ui;

use app::{App, AppEvent};
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use services::ApiClient;
use std::{env, error::Error, io, time::Duration};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing()?;

    // Enable terminal raw mode
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Get API address from command line or use default
    let api_addr = env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut app = App::new(ApiClient::new(api_addr), event_tx.clone());

    // Spawn terminal event poller
    let poller_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(50));
        loop {
            interval.tick().await;

            // Check for terminal events (non-blocking)
            if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                if let Ok(terminal_event) = event::read() {
                    if poller_tx.send(AppEvent::Terminal(terminal_event)).is_err() {
                        break;
                    }
                }
            }

            if poller_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Main application loop
    while !app.should_quit {
        terminal.draw(|f| ui::ui(f, &app))?;

        if let Some(event) = event_rx.recv().await {
            match event {
                AppEvent::Terminal(terminal_event) => {
                    if let CEvent::Key(key) = terminal_event {
                        handlers::handle_key_event(key, &mut app);
                    }
                }
                AppEvent::Submission {
                    form,
                    generation,
                    outcome,
                } => {
                    app.handle_submission(form, generation, outcome);
                }
                AppEvent::Navigate(mode) => app.go_to(mode),
                AppEvent::Tick => app.on_tick(),
            }
        }
    }

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Log to the file named by WAYPOINT_LOG, if set. The TUI owns stdout, so
/// there is no console sink.
fn init_tracing() -> Result<(), Box<dyn Error>> {
    let Ok(path) = env::var("WAYPOINT_LOG") else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
