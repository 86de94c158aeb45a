//! # vc-init
//!
//! Bootstraps the per-speaker and per-pair artifacts a voice-conversion
//! training recipe needs before it can run.
//!
//! ## Stages
//!
//! - **Lists**: train/eval utterance lists derived from `data/wav/<speaker>/*.wav`
//! - **Configs**: speaker and pair YAML files copied from templates
//! - **Figures**: F0 histograms used to hand-tune each speaker's pitch range
//!
//! Every artifact is written at most once. Re-running any stage leaves
//! existing files (and the operator's edits to them) untouched.
//!
//! ## Quick Start
//!
//! ```ignore
//! use vc_init::{
//!     config::ProjectLayout, estimators::histogram::HistogramEstimator,
//!     paths::ArtifactPaths, pipeline::{Initializer, StepSelection},
//! };
//!
//! let layout = ProjectLayout::rooted("recipes/vcc2018");
//! let paths = ArtifactPaths::resolve(&layout, "SF1", "TF1", 22050);
//!
//! let mut estimator = HistogramEstimator::default();
//! Initializer::new(paths).run(StepSelection::all(), &mut estimator)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod estimators;
pub mod manifest;
pub mod paths;
pub mod pipeline;
pub mod template;

use std::fmt;
use std::path::Path;

pub use error::InitError;

/// Which side of a conversion pair a speaker sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeakerRole {
    Source,
    Target,
}

impl SpeakerRole {
    /// Both roles, source first.
    pub const ALL: [SpeakerRole; 2] = [SpeakerRole::Source, SpeakerRole::Target];
}

impl fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeakerRole::Source => f.write_str("source"),
            SpeakerRole::Target => f.write_str("target"),
        }
    }
}

/// Partition of a speaker's utterances. Each split has its own list file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseSplit {
    Train,
    Eval,
}

impl UseSplit {
    /// Both splits, train first.
    pub const ALL: [UseSplit; 2] = [UseSplit::Train, UseSplit::Eval];

    pub fn as_str(self) -> &'static str {
        match self {
            UseSplit::Train => "train",
            UseSplit::Eval => "eval",
        }
    }
}

impl fmt::Display for UseSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a generation step did with its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The artifact was written.
    Created,
    /// The artifact already existed and was left untouched.
    Skipped,
}

/// How a generation step treats a destination that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Existing {
    /// Leave the file alone and report it.
    #[default]
    Keep,
    /// Fail with [`InitError::ArtifactExists`].
    Reject,
}

/// Common interface for F0-range estimators.
///
/// An estimator reads a speaker's training list, analyses the referenced
/// audio and writes a figure into `figure_dir` that the operator inspects
/// to choose the speaker's F0 bounds. Nothing is returned to the pipeline.
pub trait F0RangeEstimator {
    /// Estimate the F0 distribution of `speaker` and render it.
    ///
    /// Each line of `train_list` is an utterance entry relative to
    /// `audio_root`, without the `.wav` extension.
    fn estimate(
        &mut self,
        speaker: &str,
        train_list: &Path,
        audio_root: &Path,
        figure_dir: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
