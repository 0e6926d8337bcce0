//! Crate error types
//!
//! The simulation itself never fails: positions wrap, rejected shots are
//! ignored, unreadable scores count as zero. Errors only come from the
//! layers around it (tuning files, storage backends).

use std::fmt;

/// Errors raised by configuration loading and storage backends
#[derive(Debug)]
pub enum Error {
    /// Filesystem failure in a native backend
    Io(std::io::Error),
    /// JSON encode/decode failure
    Json(serde_json::Error),
    /// Storage backend unavailable or rejected the operation
    Storage(String),
    /// A tuning value is outside the range the simulation can run with
    InvalidTuning {
        /// Field name as it appears in the tuning file
        name: &'static str,
        /// The rejected value
        value: f32,
        /// Human-readable description of the accepted range
        expected: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "i/o error: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::Storage(msg) => write!(f, "storage error: {}", msg),
            Error::InvalidTuning {
                name,
                value,
                expected,
            } => write!(
                f,
                "tuning value '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

/// Convenience alias: a `Result` using the crate `Error`
pub type Result<T> = std::result::Result<T, Error>;
