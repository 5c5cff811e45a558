//! Position-spread regression tests.
//!
//! Position 0 is never a swap candidate, so its character stays put on
//! every trial. The remaining positions must come out close to uniform.

use secure_shuffle::{
    analysis::{run_trials, UniformityThresholds, UniformityViolation},
    entropy::SeededIndexSource,
    permutation::SwapTable,
};

/// Ten repetitions of a six-letter alphabet.
fn reference() -> String {
    "abcdef".repeat(10)
}

#[test]
fn legacy_table_spreads_mobile_positions() {
    let mut source = SeededIndexSource::from_passphrase("legacy-distribution");

    let report = run_trials(&reference(), 10_000, SwapTable::Legacy, &mut source).unwrap();

    assert_eq!(report.trials, 10_000);
    assert_eq!(report.head_fixed_ratio, 1.0);
    assert!(
        report.max_deviation < 0.04,
        "max deviation {:.4} at position {} ({:?})",
        report.max_deviation,
        report.worst_position,
        report.worst_char
    );
    assert!(UniformityThresholds::default().check(&report).is_ok());
}

#[test]
fn symmetric_table_spreads_mobile_positions() {
    let mut source = SeededIndexSource::from_passphrase("symmetric-distribution");

    let report = run_trials(&reference(), 10_000, SwapTable::Symmetric, &mut source).unwrap();

    assert_eq!(report.head_fixed_ratio, 1.0);
    assert!(report.max_deviation < 0.04);
}

#[test]
fn short_runs_fail_trial_minimum() {
    let mut source = SeededIndexSource::from_passphrase("too-few");

    // Two positions only: the single mobile position never changes
    let report = run_trials("ab", 200, SwapTable::Legacy, &mut source).unwrap();

    assert_eq!(report.max_deviation, 0.0);
    assert!(matches!(
        UniformityThresholds::default().check(&report),
        Err(UniformityViolation::TooFewTrials { .. })
    ));
}

#[test]
fn repeated_shuffles_differ() {
    let mut source = SeededIndexSource::from_passphrase("repeat");
    let options = secure_shuffle::ShuffleOptions::default();

    let outputs: Vec<String> = (0..20)
        .map(|_| secure_shuffle::shuffle_with("abcdefghij", options, &mut source).unwrap())
        .collect();

    assert!(outputs.iter().any(|o| o != &outputs[0]));
}
