//! Error types for configuration file parsing

use thiserror::Error;

/// Errors that can occur while loading a layout or settings file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Missing required section: [{0}]")]
    MissingSection(String),

    #[error("Missing required field '{field}' in section [{section}]")]
    MissingField { section: String, field: String },

    #[error("Invalid value for '{field}' in section [{section}]: {message}")]
    InvalidValue {
        section: String,
        field: String,
        message: String,
    },

    #[error("Missing asset '{path}' referenced by section [{section}]")]
    MissingAsset { section: String, path: String },
}
