//! Errors raised while shuffling.

use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during a shuffle.
///
/// Every variant is detected before a round's swaps are applied, so a
/// failed call never leaves a half-permuted round behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShuffleError {
    /// No input sequence was supplied.
    #[error("input sequence is absent")]
    NullArgument,

    /// A range parameter of 1 or less reached the index source.
    #[error("invalid range parameter {n}: must be greater than 1")]
    InvalidArgument { n: usize },

    /// An index source returned a value outside `[1, n - 1]`.
    #[error("index source returned {value}, outside [1, {n})")]
    OutOfRangeDraw { value: usize, n: usize },

    /// The secure randomness facility could not supply bytes.
    #[error("entropy source unavailable: {0}")]
    EntropySourceUnavailable(#[source] EntropyFailure),
}

/// Platform failure reported by the entropy facility.
///
/// Shares the underlying `rand_core::Error` so the error stays `Clone`.
#[derive(Debug, Clone, Error)]
#[error(transparent)]
pub struct EntropyFailure(Arc<rand_core::Error>);

impl EntropyFailure {
    /// Wraps an arbitrary error as an entropy failure.
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self(Arc::new(rand_core::Error::new(err)))
    }

    /// Returns the error reported by the RNG.
    pub fn rand_error(&self) -> &rand_core::Error {
        &self.0
    }
}

impl PartialEq for EntropyFailure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.to_string() == other.0.to_string()
    }
}

impl Eq for EntropyFailure {}

impl From<rand_core::Error> for ShuffleError {
    fn from(err: rand_core::Error) -> Self {
        ShuffleError::EntropySourceUnavailable(EntropyFailure(Arc::new(err)))
    }
}
