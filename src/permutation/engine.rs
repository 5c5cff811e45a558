//! Multi-round in-place permutation.

use super::round::{Round, SwapTable};
use crate::entropy::SecureRandomIndexSource;
use crate::error::ShuffleError;

/// Reorders a sequence in place by running one round per element.
///
/// For a sequence of length `L` the engine performs exactly `L` rounds,
/// each drawing fresh candidates and selectors and applying up to two
/// swaps. Index 0 is never a candidate, so the first element never moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermutationEngine {
    table: SwapTable,
}

impl PermutationEngine {
    /// Creates an engine using the given swap table.
    pub fn new(table: SwapTable) -> Self {
        Self { table }
    }

    /// Returns the swap table in use.
    pub fn table(&self) -> SwapTable {
        self.table
    }

    /// Permutes `seq` in place.
    ///
    /// Sequences of length 0 or 1 must be short-circuited by the caller;
    /// they are rejected here with [`ShuffleError::InvalidArgument`].
    /// An entropy failure stops the process between rounds.
    pub fn permute<T, S>(&self, seq: &mut [T], source: &mut S) -> Result<(), ShuffleError>
    where
        S: SecureRandomIndexSource + ?Sized,
    {
        let len = seq.len();
        if len <= 1 {
            return Err(ShuffleError::InvalidArgument { n: len });
        }

        for round_number in 0..len {
            let round = Round::draw(source, len)?;

            tracing::trace!(
                round = round_number,
                candidates = ?round.candidates(),
                selectors = ?(round.selectors().low(), round.selectors().high()),
                "Applying shuffle round"
            );

            round.apply(self.table, seq);
        }

        Ok(())
    }
}
