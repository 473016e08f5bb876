//! Application state and core logic

use crate::provider::{ConfigProvider, ProviderError};
use crate::sink::SubmissionSink;
use crate::state::{
    edit_for_key, AppState, FlagExpiry, FlagTimings, FormConfig, FormEngine, LoadState,
    SubmitOutcome,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot::{self, error::TryRecvError};

type LoadResult = Result<FormConfig, ProviderError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Whether the app should quit
    quit: bool,
    /// Status bar message
    pub status_message: Option<String>,
    provider: Arc<dyn ConfigProvider>,
    sink: Box<dyn SubmissionSink>,
    timings: FlagTimings,
    timer_tx: UnboundedSender<FlagExpiry>,
    timer_rx: UnboundedReceiver<FlagExpiry>,
    /// Pending config load, if one is in flight
    load_rx: Option<oneshot::Receiver<LoadResult>>,
}

impl App {
    /// Create a new App instance. Call [`App::start_load`] to fetch the form.
    pub fn new(
        provider: Arc<dyn ConfigProvider>,
        sink: Box<dyn SubmissionSink>,
        timings: FlagTimings,
    ) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            quit: false,
            status_message: None,
            provider,
            sink,
            timings,
            timer_tx,
            timer_rx,
            load_rx: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Ask the provider for the form configuration in the background
    pub fn start_load(&mut self) {
        let (tx, rx) = oneshot::channel();
        let provider = Arc::clone(&self.provider);
        tokio::spawn(async move {
            let result = provider.load().await;
            // Receiver gone means a newer load replaced this one
            let _ = tx.send(result);
        });
        self.load_rx = Some(rx);
        self.state.set_loading();
        tracing::debug!("form config load started");
    }

    /// Build a form engine for `config` and make it the active form
    pub fn install_config(&mut self, config: FormConfig) {
        let engine = FormEngine::new(config, self.timings, self.timer_tx.clone());
        let duplicates = engine.duplicate_names();
        self.status_message = (!duplicates.is_empty())
            .then(|| format!("Duplicate field names: {}", duplicates.join(", ")));
        self.state.set_ready(engine);
    }

    /// Apply completed background work: a finished config load and any
    /// fired message timers
    pub fn tick(&mut self) {
        self.poll_load();
        while let Ok(expiry) = self.timer_rx.try_recv() {
            if let Some(engine) = self.state.engine_mut() {
                engine.on_flag_expired(expiry);
            }
        }
    }

    fn poll_load(&mut self) {
        let Some(rx) = self.load_rx.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Err(TryRecvError::Empty) => {}
            Ok(Ok(config)) => {
                self.load_rx = None;
                tracing::info!(
                    groups = config.groups.len(),
                    fields = config.field_count(),
                    "form config loaded"
                );
                self.install_config(config);
            }
            Ok(Err(e)) => {
                self.load_rx = None;
                tracing::warn!("Failed to load form config: {e}");
                self.state.set_failed(e.to_string());
            }
            Err(TryRecvError::Closed) => {
                self.load_rx = None;
                tracing::warn!("Config provider stopped without a result");
                self.state.set_failed("Config provider stopped without a result");
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        match self.state.load {
            LoadState::Loading => self.handle_loading_key(key),
            LoadState::Failed(_) => self.handle_failed_key(key),
            LoadState::Ready(_) => self.handle_form_key(key),
        }
    }

    fn handle_loading_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.quit = true;
        }
    }

    fn handle_failed_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') => self.start_load(),
            KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let on_submit = self.state.cursor.is_on_submit();

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.cursor.next(),
            KeyCode::BackTab | KeyCode::Up => self.state.cursor.prev(),
            KeyCode::Char('s')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) =>
            {
                self.submit();
            }
            KeyCode::Enter if on_submit => self.submit(),
            KeyCode::Enter => self.state.cursor.next(),
            KeyCode::Esc => self.quit = true,
            _ => self.edit_active_field(key),
        }
    }

    /// Route a key to the focused field and record the resulting edit
    fn edit_active_field(&mut self, key: KeyEvent) {
        let Some(index) = self.state.cursor.active_field() else {
            return;
        };
        let Some(engine) = self.state.engine_mut() else {
            return;
        };
        let Some(field) = engine.config().field_at(index) else {
            return;
        };
        if let Some(value) = edit_for_key(field, engine.value(&field.name), key) {
            let name = field.name.clone();
            engine.on_field_change(&name, value);
        }
    }

    fn submit(&mut self) {
        let Some(engine) = self.state.engine_mut() else {
            return;
        };
        match engine.on_submit(self.sink.as_mut()) {
            SubmitOutcome::Submitted => {
                self.state.submissions += 1;
                self.state.cursor.set_active(0);
            }
            SubmitOutcome::Rejected | SubmitOutcome::Blocked => {}
        }
    }
}
