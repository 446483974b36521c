//! Error types for spectrum-link.

use thiserror::Error;

/// Main error type for all spectrum-link operations.
#[derive(Debug, Error)]
pub enum SpectrumError {
    /// I/O error while reading from or writing to the link.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (snapshot output only).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Setup frame ended before both parameters were received.
    #[error("Truncated setup frame: {len} payload bytes, need 16")]
    TruncatedSetup { len: usize },

    /// Setup frame asks for more points than the session allows.
    #[error("Setup point count {count} exceeds maximum {max}")]
    PointCountOutOfRange { count: f64, max: usize },

    /// Link closed unexpectedly.
    #[error("Connection closed")]
    ConnectionClosed,
}

/// Result type alias using SpectrumError.
pub type Result<T> = std::result::Result<T, SpectrumError>;
