//! Form configuration read from a JSON file

use super::traits::{ConfigProvider, ProviderError};
use crate::state::FormConfig;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Loads the form from a JSON document on disk
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigProvider for FileProvider {
    async fn load(&self) -> Result<FormConfig, ProviderError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ProviderError::Io {
                path: self.path.clone(),
                source,
            })?;
        let config = serde_json::from_str(&content).map_err(|source| ProviderError::Parse {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!("Loaded form config from {}", self.path.display());
        Ok(config)
    }
}
