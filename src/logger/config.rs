//! Runtime logger options, built from the `[logger]` settings section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::error::LoggerError;

/// Line format of the log file. The console always uses the full format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Only honoured when stdout is a terminal
    pub colored: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub path: PathBuf,
    pub append: bool,
    pub format: LogFormat,
}

/// A disabled output is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// `EnvFilter` directives, e.g. `info` or `info,todo_rs::repositories=debug`
    pub filter: String,
    pub console: Option<ConsoleConfig>,
    pub file: Option<FileConfig>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            console: Some(ConsoleConfig { colored: true }),
            file: None,
        }
    }
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<(), LoggerError> {
        parse_filter(&self.filter)?;

        match (&self.console, &self.file) {
            (None, None) => Err(LoggerError::NoOutput),
            (_, Some(file)) if file.path.as_os_str().is_empty() => Err(LoggerError::EmptyFilePath),
            _ => Ok(()),
        }
    }

    pub fn env_filter(&self) -> Result<EnvFilter, LoggerError> {
        parse_filter(&self.filter)
    }
}

/// Parses `EnvFilter` directives. A blank string is rejected rather than
/// silently filtering everything out.
pub fn parse_filter(directives: &str) -> Result<EnvFilter, LoggerError> {
    let invalid = |message: String| LoggerError::InvalidFilter {
        filter: directives.to_string(),
        message,
    };

    if directives.trim().is_empty() {
        return Err(invalid("filter is empty".to_string()));
    }
    EnvFilter::try_new(directives).map_err(|e| invalid(e.to_string()))
}
