//! Error types for the paywall generator

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or committing a paywall
///
/// Malformed base64 is not represented here: the codec decodes invalid
/// characters as zero instead of failing (see [`crate::b64::decode`]).
#[derive(Error, Debug)]
pub enum Error {
    /// A color string was not `#RRGGBB`
    #[error("Invalid color '{value}': {reason}")]
    InvalidColorFormat { value: String, reason: String },

    /// A theme record lacks one of the roles the screen paints with
    #[error("Theme '{theme}' is missing required field '{field}'")]
    MissingThemeField { theme: String, field: String },

    /// Every configured font family failed to load
    #[error("Failed to load fonts; tried families: {}", .families.join(", "))]
    FontLoadFailure { families: Vec<String> },

    /// A host capability call failed
    #[error("Host error: {0}")]
    Host(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
