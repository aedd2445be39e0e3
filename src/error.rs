//! Error types for kprim

use thiserror::Error;

/// Result type alias using kprim's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by host-side entry points
///
/// The functors themselves never fail: numeric edge cases follow IEEE-754.
/// Only the reductions that drive them validate their inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Operation needs at least one element
    #[error("Empty input for operation '{op}'")]
    EmptyInput {
        /// The operation name
        op: &'static str,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create an empty input error
    pub fn empty_input(op: &'static str) -> Self {
        Self::EmptyInput { op }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
