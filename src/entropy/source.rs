//! Uniform index draws backed by a cryptographic RNG.
//!
//! # Draw Model
//!
//! Each draw pulls eight fresh bytes from the underlying RNG, reads them
//! as a little-endian `i64`, and maps the magnitude into `[1, n - 1]`:
//!
//! ```text
//! next(n) = |draw| % (n - 1) + 1
//! ```
//!
//! Position 0 is never produced. Nothing is cached between draws.

use crate::error::ShuffleError;
use blake3::Hasher;
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, OsRng, RngCore, SeedableRng};

/// Range parameter that turns [`SecureRandomIndexSource::next`] into a
/// selector draw: `|draw| % 4 + 1`, uniform over `{1, 2, 3, 4}`.
pub const SELECTOR_SPAN: usize = 5;

/// Domain separator for passphrase seed derivation.
const SEED_DOMAIN: &[u8] = b"secure-shuffle-seed-v1";

/// Source of uniformly distributed indices in `[1, n - 1]`.
pub trait SecureRandomIndexSource {
    /// Draws an index in `[1, n - 1]`.
    ///
    /// Fails with [`ShuffleError::InvalidArgument`] when `n <= 1` and with
    /// [`ShuffleError::EntropySourceUnavailable`] when the entropy
    /// facility cannot deliver bytes. The permutation engine rejects any
    /// result outside `[1, n - 1]` with [`ShuffleError::OutOfRangeDraw`].
    fn next(&mut self, n: usize) -> Result<usize, ShuffleError>;
}

impl<S: SecureRandomIndexSource + ?Sized> SecureRandomIndexSource for &mut S {
    fn next(&mut self, n: usize) -> Result<usize, ShuffleError> {
        (**self).next(n)
    }
}

impl<S: SecureRandomIndexSource + ?Sized> SecureRandomIndexSource for Box<S> {
    fn next(&mut self, n: usize) -> Result<usize, ShuffleError> {
        (**self).next(n)
    }
}

/// Index source over any cryptographic RNG.
pub struct RngIndexSource<R> {
    /// The underlying RNG.
    rng: R,
    /// Draws served since construction.
    draws: u64,
}

/// Index source backed by the operating system's entropy facility.
pub type OsIndexSource = RngIndexSource<OsRng>;

/// Deterministic index source backed by ChaCha20.
pub type SeededIndexSource = RngIndexSource<ChaCha20Rng>;

impl<R: RngCore + CryptoRng> RngIndexSource<R> {
    /// Wraps an RNG.
    pub fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Returns the number of draws served.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Pulls eight bytes and returns the magnitude of their `i64` reading.
    ///
    /// `unsigned_abs` keeps `i64::MIN` representable.
    fn draw_magnitude(&mut self) -> Result<u64, ShuffleError> {
        let mut bytes = [0u8; 8];
        self.rng.try_fill_bytes(&mut bytes)?;
        self.draws += 1;
        Ok(i64::from_le_bytes(bytes).unsigned_abs())
    }
}

impl OsIndexSource {
    /// Opens an index source over OS entropy.
    ///
    /// The handle lives as long as the returned value.
    pub fn from_os_entropy() -> Self {
        Self::new(OsRng)
    }
}

impl Default for OsIndexSource {
    fn default() -> Self {
        Self::from_os_entropy()
    }
}

impl SeededIndexSource {
    /// Creates a deterministic source from a raw 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::new(ChaCha20Rng::from_seed(seed))
    }

    /// Creates a deterministic source from a passphrase.
    ///
    /// The ChaCha20 seed is `BLAKE3(domain || passphrase)`.
    pub fn from_passphrase(passphrase: &str) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(SEED_DOMAIN);
        hasher.update(passphrase.as_bytes());
        Self::from_seed(*hasher.finalize().as_bytes())
    }
}

impl<R: RngCore + CryptoRng> SecureRandomIndexSource for RngIndexSource<R> {
    fn next(&mut self, n: usize) -> Result<usize, ShuffleError> {
        if n <= 1 {
            return Err(ShuffleError::InvalidArgument { n });
        }

        let magnitude = self.draw_magnitude()?;
        let span = (n - 1) as u64;
        Ok((magnitude % span) as usize + 1)
    }
}

impl<R> std::fmt::Debug for RngIndexSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RngIndexSource")
            .field("draws", &self.draws)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RNG whose entropy pool is permanently empty.
    struct DrainedRng;

    impl RngCore for DrainedRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(rand_core::Error::new(std::io::Error::new(
                std::io::ErrorKind::WouldBlock,
                "entropy pool drained",
            )))
        }
    }

    impl CryptoRng for DrainedRng {}

    /// RNG that yields one fixed 8-byte pattern forever.
    struct ConstantRng([u8; 8]);

    impl RngCore for ConstantRng {
        fn next_u32(&mut self) -> u32 {
            u32::from_le_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_le_bytes(self.0)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                chunk.copy_from_slice(&self.0[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ConstantRng {}

    #[test]
    fn test_rejects_degenerate_range() {
        let mut source = SeededIndexSource::from_seed([7u8; 32]);

        assert_eq!(
            source.next(0),
            Err(ShuffleError::InvalidArgument { n: 0 })
        );
        assert_eq!(
            source.next(1),
            Err(ShuffleError::InvalidArgument { n: 1 })
        );
        // Rejection happens before any entropy is consumed
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_range_excludes_zero() {
        let mut source = SeededIndexSource::from_seed([1u8; 32]);

        for _ in 0..10_000 {
            let idx = source.next(7).unwrap();
            assert!((1..7).contains(&idx), "index {} out of range", idx);
        }
    }

    #[test]
    fn test_two_element_range_is_always_one() {
        let mut source = SeededIndexSource::from_seed([2u8; 32]);

        for _ in 0..100 {
            assert_eq!(source.next(2).unwrap(), 1);
        }
    }

    #[test]
    fn test_selector_span_covers_one_to_four() {
        let mut source = SeededIndexSource::from_seed([3u8; 32]);
        let mut seen = [false; 5];

        for _ in 0..1_000 {
            seen[source.next(SELECTOR_SPAN).unwrap()] = true;
        }

        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_min_i64_does_not_overflow() {
        // i64::MIN in little-endian
        let mut source = RngIndexSource::new(ConstantRng(i64::MIN.to_le_bytes()));

        // |i64::MIN| = 2^63, and 2^63 % 4 == 0
        assert_eq!(source.next(SELECTOR_SPAN).unwrap(), 1);
    }

    #[test]
    fn test_negative_draws_use_magnitude() {
        let mut source = RngIndexSource::new(ConstantRng((-7i64).to_le_bytes()));

        // |-7| % 4 + 1 = 4
        assert_eq!(source.next(SELECTOR_SPAN).unwrap(), 4);
        // |-7| % 9 + 1 = 8
        assert_eq!(source.next(10).unwrap(), 8);
    }

    #[test]
    fn test_drained_entropy_is_reported() {
        let mut source = RngIndexSource::new(DrainedRng);

        let err = source.next(10).unwrap_err();

        let ShuffleError::EntropySourceUnavailable(failure) = &err else {
            panic!("expected entropy failure, got {:?}", err);
        };
        let kind = failure
            .rand_error()
            .inner()
            .downcast_ref::<std::io::Error>()
            .map(|e| e.kind());
        assert_eq!(kind, Some(std::io::ErrorKind::WouldBlock));
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_draw_counting() {
        let mut source = SeededIndexSource::from_seed([4u8; 32]);

        for _ in 0..25 {
            source.next(10).unwrap();
        }

        assert_eq!(source.draws(), 25);
    }

    #[test]
    fn test_same_passphrase_same_sequence() {
        let mut a = SeededIndexSource::from_passphrase("correct horse");
        let mut b = SeededIndexSource::from_passphrase("correct horse");

        let seq_a: Vec<usize> = (0..32).map(|_| a.next(1000).unwrap()).collect();
        let seq_b: Vec<usize> = (0..32).map(|_| b.next(1000).unwrap()).collect();

        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_different_passphrase_different_sequence() {
        let mut a = SeededIndexSource::from_passphrase("correct horse");
        let mut b = SeededIndexSource::from_passphrase("battery staple");

        let seq_a: Vec<usize> = (0..32).map(|_| a.next(1000).unwrap()).collect();
        let seq_b: Vec<usize> = (0..32).map(|_| b.next(1000).unwrap()).collect();

        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_os_source_draws() {
        let mut source = OsIndexSource::from_os_entropy();
        let idx = source.next(100).unwrap();

        assert!((1..100).contains(&idx));
        assert_eq!(source.draws(), 1);
    }
}
