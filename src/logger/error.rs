use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("At least one output (console or file) must be enabled")]
    NoOutput,

    #[error("File path cannot be empty when file output is enabled")]
    EmptyFilePath,

    #[error("Failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install global subscriber: {message}")]
    Install { message: String },
}
