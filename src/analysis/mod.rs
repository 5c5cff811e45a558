//! Shuffle distribution analysis.
//!
//! Samples many shuffles of one input and measures how evenly each
//! character spreads over the positions. These are sanity checks on the
//! swap protocol, not statistical proofs of uniformity.

mod distribution;
mod threshold;

pub use distribution::{run_trials, DistributionReport, PositionHistogram, SampleMismatch};
pub use threshold::{UniformityThresholds, UniformityViolation};
