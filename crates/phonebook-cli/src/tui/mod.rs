//! Phonebook TUI
//!
//! Terminal user interface over the Client Sync Core.
//!
//! ## Layout
//!
//! Top to bottom: notification banner, filter input, person list, and a
//! bottom bar that doubles as the add form and confirm prompt.
//!
//! ## Keys
//!
//! - j/k or ↑/↓: Move selection
//! - a: Add contact (name field, Enter, number field, Enter)
//! - d: Delete selected contact (y/n confirm)
//! - /: Edit filter
//! - q: Quit

mod app;
mod ui;

use std::fs::File;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use phonebook_core::sync::{SyncHandle, Transition};
use phonebook_core::{Config, PersonClient};

use app::{App, InputMode};

/// Run the TUI application
pub async fn run(config: &Config) -> Result<()> {
    // File-based logging, only if PHONEBOOK_LOG is set
    init_tui_logging(config);

    let client = PersonClient::new(&config.server_url);
    let mut handle = SyncHandle::new(client);
    let mut events = handle
        .take_events()
        .context("Sync event receiver already taken")?;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create app and kick off the startup load
    let mut app = App::new();
    handle.load();

    // Run app
    let result = run_app(&mut terminal, &mut app, &handle, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    handle: &SyncHandle,
    events: &mut mpsc::UnboundedReceiver<Transition>,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::select! {
            biased;

            // Apply sync outcomes as they arrive
            transition = events.recv() => {
                if let Some(transition) = transition {
                    app.apply_event(handle, transition);
                }
            }

            // Poll for terminal events
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                // Check for terminal events (non-blocking)
                if event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        // Only handle key press events (not release)
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        handle_key(app, handle, key.code, key.modifiers);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Route a key press by input mode
fn handle_key(app: &mut App, handle: &SyncHandle, code: KeyCode, modifiers: KeyModifiers) {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => match code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('k') | KeyCode::Up => app.move_up(),
            KeyCode::Char('j') | KeyCode::Down => app.move_down(),
            KeyCode::Char('a') => app.enter_add_form(),
            KeyCode::Char('d') => app.request_delete(handle),
            KeyCode::Char('/') => app.enter_filter_mode(),
            _ => {}
        },
        InputMode::Name => match code {
            KeyCode::Esc => app.exit_input_mode(),
            KeyCode::Enter => app.input_mode = InputMode::Number,
            KeyCode::Char(c) => app.insert_char(c),
            KeyCode::Backspace => app.delete_char(),
            _ => {}
        },
        InputMode::Number => match code {
            KeyCode::Esc => app.exit_input_mode(),
            KeyCode::Enter => app.submit_form(handle),
            KeyCode::Char(c) => app.insert_char(c),
            KeyCode::Backspace => app.delete_char(),
            _ => {}
        },
        InputMode::Filter => match code {
            KeyCode::Esc | KeyCode::Enter => app.exit_input_mode(),
            KeyCode::Char(c) => app.insert_char(c),
            KeyCode::Backspace => app.delete_char(),
            _ => {}
        },
        InputMode::Confirm => match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_yes(handle),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_no(),
            _ => {}
        },
    }
}

/// Initialize logging for TUI mode
///
/// Only initializes if the PHONEBOOK_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("PHONEBOOK_LOG") else {
        return;
    };

    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(|| config.data_dir.join("debug.log"));

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "phonebook_core={},phonebook_cli={}",
        log_level, log_level
    ));

    // Initialize file-based logging (ignore error if already initialized)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
