//! Error types for highlight operations.
//!
//! Highlighting itself is total over well-formed graphs. Errors come from the
//! ambient edges of the crate: configuration files and the serialized style
//! instruction handed to renderers.

use std::io;
use thiserror::Error;

/// The error type for pathway-highlight operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error while reading or writing a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be parsed or holds an invalid value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Style instruction could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for pathway-highlight operations.
pub type Result<T> = std::result::Result<T, Error>;
