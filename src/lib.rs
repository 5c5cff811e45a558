//! Secure Character Shuffling Library
//!
//! Shuffles the characters of a string with a candidate/selector swap
//! protocol driven by a cryptographic entropy source.
//!
//! # Architecture
//!
//! ```text
//! shuffler → wrapper (optional) → permutation → entropy
//!                                      ↓
//!                                  analysis (distribution checks)
//! ```
//!
//! # Algorithm
//!
//! For a sequence of length `L`, `L` rounds are run. Each round draws
//! four candidate indices from `[1, L - 1]` and two selectors from
//! `{1, 2, 3, 4}`. Equal selectors are pulled apart, and the resulting
//! unordered pair picks two swaps over the candidates.
//!
//! - **Index 0 never moves**: candidates exclude position 0
//! - **Round atomicity**: all draws complete before any swap
//! - **Injectable entropy**: every draw goes through [`SecureRandomIndexSource`]
//! - **No cryptographic claims**: the shuffle is not a security primitive
//!
//! # Example
//!
//! ```no_run
//! use secure_shuffle::{
//!     entropy::SeededIndexSource,
//!     shuffler::{ShuffleOptions, Shuffler},
//! };
//!
//! // One-off shuffle with OS entropy
//! let shuffled = secure_shuffle::shuffle("hello world", true).unwrap();
//! assert_eq!(shuffled.len(), "hello world".len());
//!
//! // Reproducible shuffles from a passphrase
//! let source = SeededIndexSource::from_passphrase("demo");
//! let mut shuffler = Shuffler::new(source, ShuffleOptions::default());
//! let first = shuffler.shuffle("permutation").unwrap();
//! println!("{}", first);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod entropy;
pub mod error;
pub mod permutation;
pub mod shuffler;
pub mod wrapper;

// Re-export commonly used types at crate root
pub use analysis::{DistributionReport, PositionHistogram, UniformityThresholds};
pub use config::{AnalysisConfig, FileConfig, ShuffleConfig};
pub use entropy::{OsIndexSource, SecureRandomIndexSource, SeededIndexSource};
pub use error::{EntropyFailure, ShuffleError};
pub use permutation::{PermutationEngine, SwapTable};
pub use shuffler::{
    shuffle, shuffle_request, shuffle_request_with, shuffle_with, ShuffleOptions, ShuffleRequest,
    Shuffler,
};
pub use wrapper::SpacePreservingWrapper;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
