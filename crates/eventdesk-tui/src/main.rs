//! eventdesk - a terminal front end for an event-management REST API.
//!
//! Browse upcoming events, create new ones, page through attendee rosters
//! and register attendees without leaving the keyboard.

mod app;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use eventdesk_core::forms::parse_event_id;
use eventdesk_core::{ApiClient, Config};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const LOG_FILE: &str = "eventdesk.log";

/// Logging for CLI commands goes to stderr.
/// Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
fn init_cli_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Logging for the TUI goes to a daily log file so it cannot draw over the
/// screen. The returned guard flushes the writer on drop.
fn init_tui_tracing(config: &Config) -> Option<WorkerGuard> {
    let log_dir = config.log_dir().ok()?;
    if std::fs::create_dir_all(&log_dir).is_err() {
        return None;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

fn load_config() -> Config {
    match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("--list-events") => {
            init_cli_tracing();
            return list_events().await;
        }
        Some("--attendees") => {
            init_cli_tracing();
            return list_attendees(&args[1..]).await;
        }
        Some(other) => bail!("Unknown argument: {}\nUsage: eventdesk [--list-events | --attendees <event-id> [page]]", other),
        None => {}
    }

    let config = load_config();
    let _log_guard = init_tui_tracing(&config);
    info!("eventdesk starting");

    let mut app = App::with_config(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.persist();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("eventdesk shutting down");
    Ok(())
}

fn cli_client() -> Result<ApiClient> {
    let config = load_config();
    ApiClient::new(&config.api_base_url(), config.request_timeout())
}

/// `--list-events`: print `GET /events` as JSON
async fn list_events() -> Result<()> {
    let api = cli_client()?;
    let events = match api.fetch_events().await {
        Ok(events) => events,
        Err(e) => bail!("{}", e.user_message()),
    };
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}

/// `--attendees <event-id> [page]`: print one roster page as JSON
async fn list_attendees(args: &[String]) -> Result<()> {
    let Some(raw_id) = args.first() else {
        bail!("Usage: eventdesk --attendees <event-id> [page]");
    };
    let event_id = match parse_event_id(raw_id) {
        Ok(id) => id,
        Err(e) => bail!("{}", e.user_message()),
    };
    let page = match args.get(1) {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|p| *p >= 1)
            .with_context(|| format!("Invalid page number: {}", raw))?,
        None => 1,
    };

    let api = cli_client()?;
    let roster = match api.fetch_attendees(event_id, page).await {
        Ok(roster) => roster,
        Err(e) => bail!("{}", e.user_message()),
    };
    println!("{}", serde_json::to_string_pretty(&roster)?);
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Apply completed requests and expire the notification
        app.check_background_tasks();
        app.tick(Instant::now());

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
