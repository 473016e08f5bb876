//! Application state definitions

use super::forms::{FormCursor, FormEngine};

/// Progress of loading the form configuration
#[derive(Debug, Default)]
pub enum LoadState {
    /// Waiting on the config provider. May last forever if it never resolves.
    #[default]
    Loading,
    Ready(FormEngine),
    /// The provider reported an error
    Failed(String),
}

/// Global application state
#[derive(Debug, Default)]
pub struct AppState {
    pub load: LoadState,
    /// Focused field or submit button
    pub cursor: FormCursor,
    /// Successful submissions this session
    pub submissions: usize,
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    #[cfg(test)]
    pub fn engine(&self) -> Option<&FormEngine> {
        match &self.load {
            LoadState::Ready(engine) => Some(engine),
            _ => None,
        }
    }

    pub fn engine_mut(&mut self) -> Option<&mut FormEngine> {
        match &mut self.load {
            LoadState::Ready(engine) => Some(engine),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn load_error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Install a freshly loaded form and focus its first field
    pub fn set_ready(&mut self, engine: FormEngine) {
        self.cursor = FormCursor::new(engine.config().field_count());
        self.load = LoadState::Ready(engine);
    }

    pub fn set_failed(&mut self, message: impl Into<String>) {
        self.load = LoadState::Failed(message.into());
    }

    pub fn set_loading(&mut self) {
        self.load = LoadState::Loading;
    }
}
