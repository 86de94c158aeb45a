//! Initialize lists, configuration files and F0 figures for a conversion pair.
//!
//! # Usage
//!
//! ```bash
//! # Everything, in order
//! vc-init -1 -2 -3 SF1 TF1 22050
//!
//! # Only (re)create missing configuration files
//! vc-init --step2 SF1 TF1 22050
//!
//! # Recipe somewhere else, with a custom layout
//! vc-init -3 --root recipes/vcc2018 --layout layout.json SF1 TF1 22050
//! ```
//!
//! Existing lists and configs are never overwritten. Set `RUST_LOG=debug`
//! for per-file details.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vc_init::config::ProjectLayout;
use vc_init::estimators::histogram::{HistogramEstimator, HistogramParamsBuilder};
use vc_init::paths::ArtifactPaths;
use vc_init::pipeline::{Initializer, StepSelection};

/// Initialize audio lists and speaker configurations for voice conversion
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Execute step1 (Generation of initial list files)
    #[arg(short = '1', long)]
    step1: bool,

    /// Execute step2 (Generation of configure files)
    #[arg(short = '2', long)]
    step2: bool,

    /// Execute step3 (Estimation of F0 ranges)
    #[arg(short = '3', long)]
    step3: bool,

    /// Recipe root containing conf/, data/ and list/
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// JSON file overriding directory names and extensions
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Lowest F0 searched in step3, in Hz
    #[arg(long, default_value_t = 40.0)]
    f0_min: f32,

    /// Highest F0 searched in step3, in Hz
    #[arg(long, default_value_t = 700.0)]
    f0_max: f32,

    /// The name of speaker whose voice you would like to convert from
    source: String,

    /// The name of speaker whose voice you would like to convert to
    target: String,

    /// The sampling rate of WAV files of voices
    sampling_rate: u32,
}

impl Cli {
    fn selection(&self) -> StepSelection {
        StepSelection {
            lists: self.step1,
            configs: self.step2,
            figures: self.step3,
        }
    }

    /// The F0 search range only matters when step3 runs.
    fn estimator(&self) -> Result<HistogramEstimator> {
        if !self.step3 {
            return Ok(HistogramEstimator::default());
        }
        let params = HistogramParamsBuilder::default()
            .f0_min(self.f0_min)
            .f0_max(self.f0_max)
            .build()
            .context("Invalid F0 search range")?;
        Ok(HistogramEstimator::new(params))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let layout = match &cli.layout {
        Some(path) => ProjectLayout::from_json_file(path, &cli.root)
            .with_context(|| format!("Failed to load layout {}", path.display()))?,
        None => ProjectLayout::rooted(&cli.root),
    };
    let paths = ArtifactPaths::resolve(&layout, &cli.source, &cli.target, cli.sampling_rate);
    log::debug!("Resolved paths: {paths:?}");

    let mut estimator = cli.estimator()?;

    Initializer::new(paths)
        .run(cli.selection(), &mut estimator)
        .with_context(|| format!("Initialization of {}-{} failed", cli.source, cli.target))?;
    Ok(())
}
