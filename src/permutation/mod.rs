//! Candidate/selector swap protocol.
//!
//! Each round draws four candidate indices and two selectors. The
//! selector pair picks one of six rows in a [`SwapTable`], and that row
//! names the two swaps applied to the candidates. A sequence of length
//! `L` goes through exactly `L` rounds.

mod engine;
mod round;

pub use engine::PermutationEngine;
pub use round::{Round, SelectorPair, SwapTable};
