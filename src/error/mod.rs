//! Error handling module for mp4trim front-end concerns
//!
//! Trim failures are values ([`crate::domain::model::TrimOutcome`]); this type
//! covers configuration, argument parsing and staging.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for mp4trim front-end operations
#[derive(Error, Debug)]
pub enum Mp4TrimError {
    /// Invalid time format
    #[error("Invalid time format: {time}. Expected seconds, MM:SS.ms, or HH:MM:SS.ms")]
    InvalidTimeFormat { time: String },

    /// Configuration file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("Failed to parse config file {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// A setting holds a value outside its allowed range
    #[error("Invalid setting {key}: {message}")]
    InvalidSetting { key: String, message: String },

    /// Scratch directory or staged file operation failed
    #[error("Staging failed: {message}")]
    Staging {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Trimmed file could not be delivered to its destination
    #[error("Failed to write output file {}: {source}", path.display())]
    OutputError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for mp4trim front-end operations
pub type Mp4TrimResult<T> = std::result::Result<T, Mp4TrimError>;
