//! Trait abstraction for config providers to enable mocking in tests

use crate::state::FormConfig;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a form configuration
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to read form config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid form config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of the form configuration, loaded once at startup
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Resolve the form configuration. May never resolve.
    async fn load(&self) -> Result<FormConfig, ProviderError>;
}
