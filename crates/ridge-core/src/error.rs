//! Error types for Ridge

use thiserror::Error;

/// The main error type for Ridge operations
#[derive(Debug, Error)]
pub enum RidgeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Render handle already attached to fragment [{x}, {y}]")]
    RenderHandleAlreadyAttached { x: i32, y: i32 },
}

/// Result type alias for Ridge operations
pub type Result<T> = std::result::Result<T, RidgeError>;

impl From<toml::de::Error> for RidgeError {
    fn from(err: toml::de::Error) -> Self {
        RidgeError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for RidgeError {
    fn from(err: toml::ser::Error) -> Self {
        RidgeError::TomlSerError(err.to_string())
    }
}
