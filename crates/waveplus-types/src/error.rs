//! Error types for frame parsing.

use thiserror::Error;

/// Errors that can occur when parsing raw data from a Wave Plus.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The raw buffer does not have the exact frame size.
    ///
    /// The current-values frame is fixed-width; both short and long
    /// buffers are rejected.
    #[error("invalid frame length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required frame size.
        expected: usize,
        /// Actual buffer size received.
        actual: usize,
    },
}

/// Result type alias for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
