//! dynform-tui - terminal renderer for dynamic forms
//!
//! Loads a form configuration (question groups of text and dropdown fields),
//! renders it with Ratatui, validates on submit and logs the collected data.

mod app;
mod config;
mod platform;
mod provider;
mod sink;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::{TuiConfig, FORM_CONFIG_ENV};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use provider::{ConfigProvider, FileProvider, SampleProvider};
use ratatui::{backend::CrosstermBackend, Terminal};
use sink::TracingSink;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = TuiConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        TuiConfig::default()
    });

    let cli_path = std::env::args_os().nth(1).map(PathBuf::from);
    let provider: Arc<dyn ConfigProvider> =
        match config.resolve_form_path(cli_path, std::env::var(FORM_CONFIG_ENV).ok()) {
            Some(path) => {
                let provider = FileProvider::new(path);
                tracing::info!(path = %provider.path().display(), "loading form config from file");
                Arc::new(provider)
            }
            None => Arc::new(
                config
                    .load_delay()
                    .map(SampleProvider::new)
                    .unwrap_or_default(),
            ),
        };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(provider, Box::new(TracingSink), config.timings());
    app.start_load();
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file under the platform data directory; the terminal belongs to
/// the UI. Falls back to stderr when no log file can be opened.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "dynform_tui=info".into());

    let log_file = TuiConfig::log_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    let file_layer =
        log_file.map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));
    let stderr_layer = file_layer
        .is_none()
        .then(|| fmt::layer().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Apply finished loads and fired message timers
        app.tick();

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll faster while loading so the form appears promptly
        let poll_duration = if app.state.is_loading() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
