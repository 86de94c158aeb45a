use std::fs;
use std::path::{Path, PathBuf};

use derive_builder::Builder;

use crate::F0RangeEstimator;

use super::audio::read_mono;
use super::figure::{percentile, F0Histogram};
use super::pitch::PitchTracker;

/// Percentiles of voiced F0 reported as the suggested speaker range.
const RANGE_PERCENTILES: (f32, f32) = (2.0, 98.0);

#[derive(thiserror::Error, Debug)]
pub enum EstimatorError {
    #[error("Failed to read training list {path}: {source}")]
    ReadList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write figure {path}: {source}")]
    WriteFigure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("Training list {0} has no entries. Run step 1 or edit the list first.")]
    EmptyManifest(PathBuf),
    #[error("No voiced frames found for speaker '{0}'. Check the audio or widen the F0 search range.")]
    NoVoicedFrames(String),
}

/// Analysis settings for [`HistogramEstimator`].
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct HistogramParams {
    /// Lowest F0 searched, in Hz.
    pub f0_min: f32,
    /// Highest F0 searched, in Hz.
    pub f0_max: f32,
    /// Frame shift in milliseconds.
    pub frame_shift_ms: f32,
    /// Minimum normalized autocorrelation for a frame to count as voiced.
    pub voicing_threshold: f32,
    /// Frames quieter than this RMS are treated as silence.
    pub rms_floor: f32,
    /// Histogram bin width in Hz.
    pub bin_width: f32,
}

impl Default for HistogramParams {
    fn default() -> Self {
        Self {
            f0_min: 40.0,
            f0_max: 700.0,
            frame_shift_ms: 5.0,
            voicing_threshold: 0.6,
            rms_floor: 1e-3,
            bin_width: 10.0,
        }
    }
}

impl HistogramParamsBuilder {
    fn validate(&self) -> Result<(), String> {
        let defaults = HistogramParams::default();
        let f0_min = self.f0_min.unwrap_or(defaults.f0_min);
        let f0_max = self.f0_max.unwrap_or(defaults.f0_max);
        if f0_min <= 0.0 || f0_min >= f0_max {
            return Err(format!(
                "F0 search range must satisfy 0 < f0_min < f0_max (got {f0_min}..{f0_max})"
            ));
        }
        if self.bin_width.unwrap_or(defaults.bin_width) <= 0.0 {
            return Err("bin_width must be positive".to_string());
        }
        if self.frame_shift_ms.unwrap_or(defaults.frame_shift_ms) <= 0.0 {
            return Err("frame_shift_ms must be positive".to_string());
        }
        Ok(())
    }
}

/// Summary of one speaker's voiced F0 distribution.
#[derive(Debug, Clone)]
pub struct F0Report {
    pub speaker: String,
    pub utterances: usize,
    pub voiced_frames: usize,
    /// Suggested `(min, max)` F0 bounds in Hz.
    pub suggested_range: (f32, f32),
    pub figure: PathBuf,
}

/// F0-range estimator that renders a histogram of voiced-frame pitch.
#[derive(Debug, Clone, Default)]
pub struct HistogramEstimator {
    params: HistogramParams,
}

impl HistogramEstimator {
    pub fn new(params: HistogramParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &HistogramParams {
        &self.params
    }

    /// Path of the figure written for `speaker`.
    pub fn figure_path(figure_dir: &Path, speaker: &str) -> PathBuf {
        figure_dir.join(format!("{speaker}_f0histogram.svg"))
    }

    /// Analyse every utterance on `train_list` and write the histogram figure.
    ///
    /// `figure_dir` is created if it does not exist yet. The figure is
    /// regenerated on every call; it is a derived view, not an operator file.
    pub fn analyse(
        &self,
        speaker: &str,
        train_list: &Path,
        audio_root: &Path,
        figure_dir: &Path,
    ) -> Result<F0Report, EstimatorError> {
        let content =
            fs::read_to_string(train_list).map_err(|source| EstimatorError::ReadList {
                path: train_list.to_path_buf(),
                source,
            })?;
        let entries: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if entries.is_empty() {
            return Err(EstimatorError::EmptyManifest(train_list.to_path_buf()));
        }

        let p = &self.params;
        let mut f0s = Vec::new();
        for entry in &entries {
            let wav_path = audio_root.join(format!("{entry}.wav"));
            let audio = read_mono(&wav_path)?;
            let tracker = PitchTracker::new(
                audio.sample_rate,
                p.f0_min,
                p.f0_max,
                p.frame_shift_ms,
                p.voicing_threshold,
                p.rms_floor,
            );
            let voiced = tracker.track(&audio.samples);
            log::debug!("{}: {} voiced frames", wav_path.display(), voiced.len());
            f0s.extend(voiced);
        }

        let (Some(low), Some(high)) = (
            percentile(&f0s, RANGE_PERCENTILES.0),
            percentile(&f0s, RANGE_PERCENTILES.1),
        ) else {
            return Err(EstimatorError::NoVoicedFrames(speaker.to_string()));
        };

        let histogram = F0Histogram::from_values(&f0s, p.f0_min, p.f0_max, p.bin_width);
        fs::create_dir_all(figure_dir).map_err(|source| EstimatorError::WriteFigure {
            path: figure_dir.to_path_buf(),
            source,
        })?;
        let figure = Self::figure_path(figure_dir, speaker);
        fs::write(&figure, histogram.to_svg(&format!("{speaker} F0 histogram"))).map_err(
            |source| EstimatorError::WriteFigure {
                path: figure.clone(),
                source,
            },
        )?;

        log::info!(
            "{speaker}: {} voiced frames from {} utterances",
            f0s.len(),
            entries.len()
        );
        Ok(F0Report {
            speaker: speaker.to_string(),
            utterances: entries.len(),
            voiced_frames: f0s.len(),
            suggested_range: (low, high),
            figure,
        })
    }
}

impl F0RangeEstimator for HistogramEstimator {
    fn estimate(
        &mut self,
        speaker: &str,
        train_list: &Path,
        audio_root: &Path,
        figure_dir: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let report = self.analyse(speaker, train_list, audio_root, figure_dir)?;
        println!(
            "{}: voiced F0 mostly within {:.0}-{:.0} Hz, see {}",
            report.speaker,
            report.suggested_range.0,
            report.suggested_range.1,
            report.figure.display()
        );
        Ok(())
    }
}
