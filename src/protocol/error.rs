//! HFI error types

use thiserror::Error;

/// HFI packet construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Missing or out-of-range input
    #[error("invalid argument: {context}")]
    InvalidArgument {
        /// What was rejected
        context: &'static str,
    },

    /// Not enough room left in the transfer buffer
    #[error("buffer too small: need {needed} bytes, {available} available")]
    BufferTooSmall {
        /// Bytes required by the next write
        needed: usize,
        /// Bytes remaining past the current offset
        available: usize,
    },
}

impl Error {
    pub(crate) const fn invalid(context: &'static str) -> Self {
        Self::InvalidArgument { context }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
