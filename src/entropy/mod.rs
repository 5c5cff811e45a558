//! Random index sources.
//!
//! Every random decision the permutation engine makes goes through the
//! [`SecureRandomIndexSource`] trait. Production callers use the OS
//! entropy source; tests substitute a seeded ChaCha20 source so swap
//! sequences can be reproduced exactly.

mod source;

pub use source::{
    OsIndexSource, RngIndexSource, SecureRandomIndexSource, SeededIndexSource, SELECTOR_SPAN,
};
