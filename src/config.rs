//! Configuration handling for the TUI

use crate::state::FlagTimings;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the form config path
pub const FORM_CONFIG_ENV: &str = "DYNFORM_FORM_CONFIG";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// How long "Please complete form" stays visible
    pub error_message_ms: Option<u64>,
    /// How long the success message stays visible
    pub success_message_ms: Option<u64>,
    /// Simulated fetch delay for the built-in sample form
    pub load_delay_ms: Option<u64>,
    /// JSON form configuration to load instead of the sample form
    pub form_config_path: Option<PathBuf>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "dynform", "dynform-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file location, if the platform has a data directory
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("dynform-tui.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Transient message lifetimes, falling back to the defaults
    pub fn timings(&self) -> FlagTimings {
        FlagTimings {
            error: self
                .error_message_ms
                .map(Duration::from_millis)
                .unwrap_or(FlagTimings::DEFAULT_ERROR),
            success: self
                .success_message_ms
                .map(Duration::from_millis)
                .unwrap_or(FlagTimings::DEFAULT_SUCCESS),
        }
    }

    pub fn load_delay(&self) -> Option<Duration> {
        self.load_delay_ms.map(Duration::from_millis)
    }

    /// Pick the form config path: command line first, then the environment,
    /// then the config file
    pub fn resolve_form_path(
        &self,
        cli_arg: Option<PathBuf>,
        env_value: Option<String>,
    ) -> Option<PathBuf> {
        cli_arg
            .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(|| self.form_config_path.clone())
    }
}
