//! Error types for the chat-stats library.
//!
//! This module provides custom error types using `thiserror` for better error handling
//! and more specific error messages throughout the pipeline.

use thiserror::Error;

/// Errors that can occur while ingesting dialogs and building reports.
#[derive(Error, Debug)]
pub enum ChatStatsError {
    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column required by the record type is absent
    #[error("Missing field `{field}` in {kind} record")]
    MissingField {
        /// Column name
        field: &'static str,
        /// Raw `type` value of the row
        kind: String,
    },

    /// Media duration that is not a number
    #[error("Invalid duration: {0:?}")]
    InvalidDuration(String),

    /// The date field carries no whitespace-prefixed hour token
    #[error("No hour token in date: {0:?}")]
    MalformedHour(String),

    /// The date field matches none of the supported timestamp layouts
    #[error("Invalid date format: {0:?}")]
    InvalidDate(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Chart backend failure
    #[error("Render error: {0}")]
    Render(String),
}

/// Convenience type alias for Result with `ChatStatsError`
pub type Result<T> = std::result::Result<T, ChatStatsError>;

impl From<config::ConfigError> for ChatStatsError {
    fn from(err: config::ConfigError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
