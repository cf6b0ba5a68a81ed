//! crates/logging/src/error.rs
//! Errors surfaced by bulk level configuration.

use thiserror::Error;

/// Error returned when a configuration document cannot be applied.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not a JSON object of component → field → level maps.
    ///
    /// Nothing is applied when this error is returned.
    #[error("malformed alert configuration document: {0}")]
    MalformedDocument(#[from] serde_json::Error),
}
