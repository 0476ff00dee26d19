//! Error types for the matching engine.
//!
//! Bad input is reported through [`Error`]; broken matching invariants are
//! programmer errors and surface either as [`Error::InvariantViolation`] from
//! explicit checks or as assertion panics on the hot path.

use thiserror::Error;

/// The top-level error type for all engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The resource collection cannot be indexed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The value/resource maps disagree. Always a bug in the scanner or the
    /// augmenting search, never bad input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The textual instance format could not be read.
    #[error("parse error at token {token}: {message}")]
    Parse { token: usize, message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}
