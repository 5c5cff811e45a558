//! Per-position character frequencies across many shuffles.
//!
//! Only positions `1..L` are compared against the uniform expectation.
//! Position 0 is never a swap candidate, so it is tracked separately as
//! the fraction of trials in which it kept its original character.

use crate::entropy::SecureRandomIndexSource;
use crate::error::ShuffleError;
use crate::permutation::{PermutationEngine, SwapTable};

/// A sample did not match the reference's shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleMismatch {
    #[error("sample length {got} differs from reference length {expected}")]
    Length { expected: usize, got: usize },
    #[error("sample contains {0:?}, which the reference does not")]
    UnknownChar(char),
}

/// Summary of a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionReport {
    /// Number of recorded samples.
    pub trials: u64,
    /// Reference length in chars.
    pub length: usize,
    /// Fraction of samples whose position 0 kept the reference char.
    pub head_fixed_ratio: f64,
    /// Largest |observed - expected| frequency over positions `1..L`.
    pub max_deviation: f64,
    /// Position of the worst cell.
    pub worst_position: usize,
    /// Character of the worst cell.
    pub worst_char: Option<char>,
}

/// Counts which character lands at which position.
#[derive(Debug, Clone)]
pub struct PositionHistogram {
    reference: Vec<char>,
    /// Distinct reference chars, sorted.
    alphabet: Vec<char>,
    /// `counts[position][alphabet index]`.
    counts: Vec<Vec<u64>>,
    head_fixed: u64,
    trials: u64,
}

impl PositionHistogram {
    /// Creates an empty histogram for shuffles of `reference`.
    pub fn new(reference: &str) -> Self {
        let reference: Vec<char> = reference.chars().collect();
        let mut alphabet = reference.clone();
        alphabet.sort_unstable();
        alphabet.dedup();

        Self {
            counts: vec![vec![0; alphabet.len()]; reference.len()],
            reference,
            alphabet,
            head_fixed: 0,
            trials: 0,
        }
    }

    /// Records one shuffled sample.
    pub fn record(&mut self, sample: &str) -> Result<(), SampleMismatch> {
        let chars: Vec<char> = sample.chars().collect();
        self.record_chars(&chars)
    }

    fn record_chars(&mut self, sample: &[char]) -> Result<(), SampleMismatch> {
        if sample.len() != self.reference.len() {
            return Err(SampleMismatch::Length {
                expected: self.reference.len(),
                got: sample.len(),
            });
        }

        // Resolve every slot before touching counts
        let slots = sample
            .iter()
            .map(|&c| {
                self.alphabet
                    .binary_search(&c)
                    .map_err(|_| SampleMismatch::UnknownChar(c))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (position, slot) in slots.into_iter().enumerate() {
            self.counts[position][slot] += 1;
        }
        if sample.first() == self.reference.first() {
            self.head_fixed += 1;
        }
        self.trials += 1;
        Ok(())
    }

    /// Number of recorded samples.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Observed frequency of `c` at `position`.
    pub fn frequency(&self, position: usize, c: char) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        let count = self
            .alphabet
            .binary_search(&c)
            .ok()
            .and_then(|slot| self.counts.get(position).map(|row| row[slot]))
            .unwrap_or(0);
        count as f64 / self.trials as f64
    }

    /// Summarizes the recorded samples.
    pub fn report(&self) -> DistributionReport {
        let length = self.reference.len();
        let mut report = DistributionReport {
            trials: self.trials,
            length,
            head_fixed_ratio: 0.0,
            max_deviation: 0.0,
            worst_position: 0,
            worst_char: None,
        };

        if self.trials == 0 {
            return report;
        }
        report.head_fixed_ratio = self.head_fixed as f64 / self.trials as f64;

        if length < 2 {
            return report;
        }

        // Expected share of each char over the mobile positions
        let mobile = (length - 1) as f64;
        let expected: Vec<f64> = self
            .alphabet
            .iter()
            .map(|c| self.reference[1..].iter().filter(|&r| r == c).count() as f64 / mobile)
            .collect();

        for position in 1..length {
            for (slot, &c) in self.alphabet.iter().enumerate() {
                let observed = self.counts[position][slot] as f64 / self.trials as f64;
                let deviation = (observed - expected[slot]).abs();
                if deviation > report.max_deviation {
                    report.max_deviation = deviation;
                    report.worst_position = position;
                    report.worst_char = Some(c);
                }
            }
        }

        report
    }
}

/// Shuffles `reference` `trials` times and reports the position spread.
///
/// Always shuffles the whole input; the whitespace-preserving mode
/// changes lengths and is not sampled here.
pub fn run_trials<S>(
    reference: &str,
    trials: usize,
    table: SwapTable,
    source: &mut S,
) -> Result<DistributionReport, ShuffleError>
where
    S: SecureRandomIndexSource + ?Sized,
{
    let engine = PermutationEngine::new(table);
    let original: Vec<char> = reference.chars().collect();
    let mut histogram = PositionHistogram::new(reference);
    let mut sample = original.clone();

    for _ in 0..trials {
        sample.copy_from_slice(&original);
        if sample.len() > 1 {
            engine.permute(&mut sample, source)?;
        }
        // A permutation of the reference always matches its shape
        if let Err(mismatch) = histogram.record_chars(&sample) {
            tracing::warn!(%mismatch, "Discarded malformed sample");
        }
    }

    let report = histogram.report();
    tracing::debug!(
        trials = report.trials,
        max_deviation = report.max_deviation,
        head_fixed_ratio = report.head_fixed_ratio,
        "Distribution trials complete"
    );
    Ok(report)
}
