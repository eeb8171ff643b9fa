//! Error types for the gpsned library.

use thiserror::Error;

/// Errors that can occur when converting GPS coordinates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GpsnedError {
    /// The coordinate text could not be parsed as DMS or decimal degrees.
    #[error("Invalid coordinate format: {input:?} ({reason})")]
    InvalidFormat { input: String, reason: String },

    /// A DMS string did not start with one of `N`, `S`, `E` or `W`.
    #[error("Unrecognized hemisphere indicator in {input:?} (expected N, S, E or W)")]
    UnrecognizedHemisphere { input: String },

    /// An environment variable held a value that could not be parsed or is
    /// out of range.
    #[error("Invalid configuration: {key}={value:?}")]
    InvalidConfig { key: &'static str, value: String },
}

impl GpsnedError {
    pub(crate) fn invalid_format(input: &str, reason: impl Into<String>) -> Self {
        GpsnedError::InvalidFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias using [`GpsnedError`].
pub type Result<T> = std::result::Result<T, GpsnedError>;
