//! Acceptance thresholds for shuffle distributions.

use super::distribution::DistributionReport;
use serde::{Deserialize, Serialize};

/// Limits a distribution report must stay within.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformityThresholds {
    /// Fewest trials a report may be judged on.
    pub min_trials: usize,
    /// Maximum absolute frequency deviation on mobile positions.
    pub max_deviation: f64,
}

impl Default for UniformityThresholds {
    fn default() -> Self {
        Self {
            min_trials: 10_000,
            max_deviation: 0.04,
        }
    }
}

impl UniformityThresholds {
    /// Looser thresholds for short runs.
    pub fn permissive() -> Self {
        Self {
            min_trials: 100,
            max_deviation: 0.1,
        }
    }

    /// Checks a report against the thresholds.
    pub fn check(&self, report: &DistributionReport) -> Result<(), UniformityViolation> {
        if report.trials < self.min_trials as u64 {
            return Err(UniformityViolation::TooFewTrials {
                observed: report.trials,
                required: self.min_trials,
            });
        }

        if report.length > 1 && report.head_fixed_ratio < 1.0 {
            return Err(UniformityViolation::HeadMoved {
                ratio: report.head_fixed_ratio,
            });
        }

        if report.max_deviation > self.max_deviation {
            return Err(UniformityViolation::Deviation {
                position: report.worst_position,
                ch: report.worst_char,
                observed: report.max_deviation,
                threshold: self.max_deviation,
            });
        }

        Ok(())
    }
}

/// Threshold violation types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniformityViolation {
    #[error("only {observed} trials recorded, need {required}")]
    TooFewTrials { observed: u64, required: usize },

    #[error("position 0 kept its char in only {ratio:.4} of trials")]
    HeadMoved { ratio: f64 },

    #[error("deviation {observed:.4} at position {position} ({ch:?}) exceeds threshold {threshold:.4}")]
    Deviation {
        position: usize,
        ch: Option<char>,
        observed: f64,
        threshold: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(trials: u64, head_fixed_ratio: f64, max_deviation: f64) -> DistributionReport {
        DistributionReport {
            trials,
            length: 6,
            head_fixed_ratio,
            max_deviation,
            worst_position: 3,
            worst_char: Some('c'),
        }
    }

    #[test]
    fn test_good_report_passes() {
        let thresholds = UniformityThresholds::default();
        assert!(thresholds.check(&report(10_000, 1.0, 0.01)).is_ok());
    }

    #[test]
    fn test_too_few_trials() {
        let thresholds = UniformityThresholds::default();

        assert!(matches!(
            thresholds.check(&report(50, 1.0, 0.0)),
            Err(UniformityViolation::TooFewTrials { observed: 50, .. })
        ));
    }

    #[test]
    fn test_moving_head_flagged() {
        let thresholds = UniformityThresholds::permissive();

        assert!(matches!(
            thresholds.check(&report(1_000, 0.98, 0.0)),
            Err(UniformityViolation::HeadMoved { .. })
        ));
    }

    #[test]
    fn test_excess_deviation() {
        let thresholds = UniformityThresholds::permissive();
        let err = thresholds.check(&report(1_000, 1.0, 0.25)).unwrap_err();

        assert!(matches!(err, UniformityViolation::Deviation { position: 3, .. }));
        assert!(err.to_string().contains("position 3"));
    }
}
