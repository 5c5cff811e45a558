//! Secure Shuffle CLI
//!
//! Command-line interface for shuffling text and for checking how the
//! shuffle spreads characters over positions.

use clap::Parser;
use secure_shuffle::{
    analysis::{run_trials, UniformityViolation},
    config::{ConfigError, FileConfig},
    error::ShuffleError,
    permutation::SwapTable,
    shuffler::{shuffle_request_with, ShuffleRequest},
};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Shuffle the characters of a string.
#[derive(Debug, Parser)]
#[command(name = "secure-shuffle", version, about)]
struct Cli {
    /// Text to shuffle. Falls back to `text` in the config file.
    text: Option<String>,

    /// Shuffle each whitespace-delimited word on its own.
    #[arg(short, long)]
    preserve_spaces: bool,

    /// Use the symmetric swap table instead of the legacy one.
    #[arg(long)]
    symmetric: bool,

    /// Passphrase for a reproducible shuffle.
    #[arg(long)]
    seed: Option<String>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run the distribution analysis over this many shuffles.
    #[arg(long)]
    trials: Option<usize>,

    /// Number of shuffles to print.
    #[arg(short = 'n', long, default_value_t = 1)]
    repeat: usize,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Shuffle(#[from] ShuffleError),
    #[error("distribution check failed: {0}")]
    Uniformity(#[from] UniformityViolation),
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            FileConfig::from_file(path)?
        }
        None => FileConfig::default(),
    };

    // Explicit flags win over the file
    if cli.preserve_spaces {
        config.shuffle.preserve_spaces = true;
    }
    if cli.symmetric {
        config.shuffle.swap_table = SwapTable::Symmetric;
    }
    if let Some(seed) = cli.seed {
        config.shuffle.seed = Some(seed);
    }
    if let Some(trials) = cli.trials {
        config.analysis.trials = trials;
    }
    config.shuffle.validate()?;
    config.analysis.validate()?;

    let request = ShuffleRequest {
        text: cli.text.or(config.text.take()),
        options: config.shuffle.options(),
    };

    let mut source = config.shuffle.index_source();
    if config.shuffle.seed.is_some() {
        info!("Using seeded ChaCha20 source");
    }

    if cli.trials.is_some() {
        let text = request.text.as_deref().ok_or(ShuffleError::NullArgument)?;
        if request.options.preserve_spaces {
            warn!("Distribution analysis shuffles the whole input; ignoring --preserve-spaces");
        }

        info!(
            trials = config.analysis.trials,
            swap_table = ?config.shuffle.swap_table,
            "Running distribution analysis"
        );
        let report = run_trials(
            text,
            config.analysis.trials,
            config.shuffle.swap_table,
            &mut source,
        )?;

        println!("trials:           {}", report.trials);
        println!("length:           {}", report.length);
        println!("head fixed ratio: {:.4}", report.head_fixed_ratio);
        println!(
            "max deviation:    {:.4} (position {}, {:?})",
            report.max_deviation, report.worst_position, report.worst_char
        );

        config.analysis.thresholds().check(&report)?;
        info!("Distribution within thresholds");
        return Ok(());
    }

    for _ in 0..cli.repeat {
        println!("{}", shuffle_request_with(&request, &mut source)?);
    }

    Ok(())
}
