//! # PatiLog TUI
//!
//! Interactive record editor over the shared spreadsheet store.
//!
//! Usage: `cargo run --features tui --bin patilog-tui`

use anyhow::Result;
use chrono::Local;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dotenvy::dotenv;
use log::{error, info};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;

use patilog::core::Config;
use patilog::store::{SheetStore, SheetsClient};
use patilog::tui::event::{map_key_event, KeyAction};
use patilog::tui::{App, Event, EventHandler, StoreRequest};

/// TUI refresh rate
const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    // Log to stderr only at warn and above so the terminal UI stays clean
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    info!("Starting PatiLog TUI...");

    let store = SheetStore::new(SheetsClient::new(&config.google_api_token));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Local::now().date_naive());
    let mut events = EventHandler::new(TICK_RATE);

    // Initial load before the first frame
    app.on_records_loaded(store.load_records().await);

    let result = run_app(&mut terminal, &mut app, &mut events, &store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("Application error: {e}");
        return Err(e);
    }

    info!("PatiLog TUI shutdown complete");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    store: &SheetStore,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| {
            patilog::tui::ui::render(frame, app);
        })?;

        let Some(event) = events.next().await else {
            return Ok(());
        };

        match event {
            Event::Key(key) => {
                let action = map_key_event(key, app.in_form());
                if let Some(request) = app.apply(action) {
                    execute_store_request(app, store, request).await;
                }
            }
            Event::Resize(_, _) | Event::Tick => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Run a store operation requested by the UI, feeding the outcome back
/// into the app state. Store calls block the UI briefly; the pipeline has
/// no background work to overlap them with.
async fn execute_store_request(app: &mut App, store: &SheetStore, request: StoreRequest) {
    match request {
        StoreRequest::Reload => {
            app.on_records_loaded(store.load_records().await);
            app.status_message = Some(format!("{} kayıt yüklendi.", app.records.len()));
        }
        StoreRequest::Append(record) => match store.append_record(&record).await {
            Ok(()) => {
                app.on_append_ok();
                app.on_records_loaded(store.load_records().await);
            }
            Err(e) => app.on_store_error("Kayıt hatası", e.to_string()),
        },
        StoreRequest::ReplaceAll(remaining) => {
            let deleted = app.records.len().saturating_sub(remaining.len());
            match store.replace_all(&remaining).await {
                Ok(()) => {
                    app.on_delete_ok(deleted);
                    app.on_records_loaded(store.load_records().await);
                }
                Err(e) => app.on_store_error("Silme hatası", e.to_string()),
            }
        }
    }
}
