use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use intellidebug_engine::{ClientSettings, DEFAULT_ENDPOINT};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

pub const SETTINGS_FILENAME: &str = "intellidebug.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// User settings read from `intellidebug.ron`; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub debounce_ms: u64,
    pub request_timeout_ms: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: 2000,
            request_timeout_ms: None,
            connect_timeout_ms: None,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.log_level.trim()).unwrap_or(LevelFilter::Info)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Reads settings from `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<Settings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|err| SettingsError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Like [`load`], but never fails; the error is handed back for logging once
/// the logger exists.
pub fn load_or_default(path: &Path) -> (Settings, Option<SettingsError>) {
    match load(path) {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    }
}
