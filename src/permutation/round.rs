//! One draw-and-swap round.
//!
//! A round draws four candidate indices and two selectors, settles any
//! selector collision, then maps the selector pair to two swaps over the
//! candidates. All draws are range-checked before the first swap, so a
//! failing or misbehaving source cannot leave a round half applied.

use crate::entropy::{SecureRandomIndexSource, SELECTOR_SPAN};
use crate::error::ShuffleError;
use serde::{Deserialize, Serialize};

/// Mapping from selector pairs to swap pairs.
///
/// Five of the six rows partition the four candidates into two disjoint
/// pairs. The `{1, 3}` row is where the variants differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapTable {
    /// `{1, 3}` swaps `(idx1, idx3)` then `(idx3, idx4)`, touching idx3 twice.
    #[default]
    Legacy,
    /// `{1, 3}` swaps `(idx1, idx3)` then `(idx2, idx4)`.
    Symmetric,
}

impl SwapTable {
    /// Returns the two swaps for a selector pair over candidates `c`.
    pub fn swaps(self, pair: SelectorPair, c: [usize; 4]) -> [(usize, usize); 2] {
        let [i1, i2, i3, i4] = c;
        match pair.row {
            Row::OneTwo => [(i1, i2), (i3, i4)],
            Row::OneThree => match self {
                SwapTable::Legacy => [(i1, i3), (i3, i4)],
                SwapTable::Symmetric => [(i1, i3), (i2, i4)],
            },
            Row::OneFour => [(i1, i4), (i2, i3)],
            Row::TwoThree => [(i2, i3), (i1, i4)],
            Row::TwoFour => [(i2, i4), (i1, i3)],
            Row::ThreeFour => [(i3, i4), (i1, i2)],
        }
    }
}

/// The six unordered pairs of distinct selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    OneTwo,
    OneThree,
    OneFour,
    TwoThree,
    TwoFour,
    ThreeFour,
}

/// Two distinct selectors in `{1, 2, 3, 4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorPair {
    row: Row,
}

impl SelectorPair {
    /// Builds a pair from two selector draws, breaking ties.
    ///
    /// Fails with [`ShuffleError::OutOfRangeDraw`] unless both draws are
    /// in `{1, 2, 3, 4}`.
    ///
    /// The chooser and changer bits are the draws' residues mod 2. A
    /// selector holds its draw's residue mod 4, which fixes the residue
    /// mod 2, so both bits are recovered from the selectors themselves.
    pub fn from_draws(sel1: usize, sel2: usize) -> Result<Self, ShuffleError> {
        let sel1 = check_draw(sel1, SELECTOR_SPAN)?;
        let sel2 = check_draw(sel2, SELECTOR_SPAN)?;
        let chooser = (sel1 - 1) % 2 + 1;
        let changer = (sel2 - 1) % 2 + 1;
        let (a, b) = resolve_collision(sel1, sel2, chooser, changer);

        let row = match (a.min(b), a.max(b)) {
            (1, 2) => Row::OneTwo,
            (1, 3) => Row::OneThree,
            (1, 4) => Row::OneFour,
            (2, 3) => Row::TwoThree,
            (2, 4) => Row::TwoFour,
            (3, 4) => Row::ThreeFour,
            (low, _) => {
                return Err(ShuffleError::OutOfRangeDraw {
                    value: low,
                    n: SELECTOR_SPAN,
                })
            }
        };
        Ok(Self { row })
    }

    /// Smaller selector.
    pub fn low(&self) -> usize {
        match self.row {
            Row::OneTwo | Row::OneThree | Row::OneFour => 1,
            Row::TwoThree | Row::TwoFour => 2,
            Row::ThreeFour => 3,
        }
    }

    /// Larger selector.
    pub fn high(&self) -> usize {
        match self.row {
            Row::OneTwo => 2,
            Row::OneThree | Row::TwoThree => 3,
            Row::OneFour | Row::TwoFour | Row::ThreeFour => 4,
        }
    }
}

/// Accepts `value` only if it lies in `[1, n - 1]`.
fn check_draw(value: usize, n: usize) -> Result<usize, ShuffleError> {
    if (1..n).contains(&value) {
        Ok(value)
    } else {
        Err(ShuffleError::OutOfRangeDraw { value, n })
    }
}

/// Forces `sel1 != sel2`.
///
/// `chooser == 1` perturbs `sel1`, otherwise `sel2`. A perturbed 1 always
/// goes up and a perturbed 4 always goes down; in between, `changer == 1`
/// decrements and anything else increments.
pub(crate) fn resolve_collision(
    sel1: usize,
    sel2: usize,
    chooser: usize,
    changer: usize,
) -> (usize, usize) {
    if sel1 != sel2 {
        return (sel1, sel2);
    }

    let nudge = |s: usize| match s {
        1 => 2,
        4 => 3,
        s if changer == 1 => s - 1,
        s => s + 1,
    };

    if chooser == 1 {
        (nudge(sel1), sel2)
    } else {
        (sel1, nudge(sel2))
    }
}

/// Fully drawn state of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    candidates: [usize; 4],
    selectors: SelectorPair,
}

impl Round {
    /// Draws a round for a sequence of length `len`.
    ///
    /// Consumes six draws: four candidates, then two selectors. A
    /// candidate outside `[1, len - 1]` or a selector outside
    /// `{1, 2, 3, 4}` fails with [`ShuffleError::OutOfRangeDraw`].
    pub fn draw<S>(source: &mut S, len: usize) -> Result<Self, ShuffleError>
    where
        S: SecureRandomIndexSource + ?Sized,
    {
        let mut candidates = [0usize; 4];
        for slot in candidates.iter_mut() {
            *slot = check_draw(source.next(len)?, len)?;
        }

        let sel1 = source.next(SELECTOR_SPAN)?;
        let sel2 = source.next(SELECTOR_SPAN)?;

        Ok(Self {
            candidates,
            selectors: SelectorPair::from_draws(sel1, sel2)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(candidates: [usize; 4], selectors: SelectorPair) -> Self {
        Self {
            candidates,
            selectors,
        }
    }

    /// Candidate indices, idx1 through idx4.
    pub fn candidates(&self) -> [usize; 4] {
        self.candidates
    }

    /// Resolved selector pair.
    pub fn selectors(&self) -> SelectorPair {
        self.selectors
    }

    /// Applies this round's two swaps in order.
    ///
    /// `seq` must be the sequence the round was drawn for.
    pub(crate) fn apply<T>(&self, table: SwapTable, seq: &mut [T]) {
        for (a, b) in table.swaps(self.selectors, self.candidates) {
            if a != b {
                seq.swap(a, b);
            }
        }
    }
}
