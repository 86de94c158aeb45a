//! Histogram-based F0-range estimator.
//!
//! Reads every utterance on a speaker's training list, tracks frame-level
//! pitch with normalized autocorrelation and renders the distribution of
//! voiced F0 values as an SVG bar chart. The operator reads the chart (and
//! the suggested percentile range printed alongside it) and copies the
//! bounds into `conf/speaker/<speaker>.yml`.
//!
//! # Output
//!
//! ```text
//! conf/figure/
//! └── <speaker>_f0histogram.svg
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use vc_init::F0RangeEstimator;
//! use vc_init::estimators::histogram::{HistogramEstimator, HistogramParamsBuilder};
//! use std::path::Path;
//!
//! let params = HistogramParamsBuilder::default()
//!     .f0_min(60.0)
//!     .f0_max(500.0)
//!     .build()?;
//! let mut estimator = HistogramEstimator::new(params);
//! estimator.estimate(
//!     "SF1",
//!     Path::new("list/SF1_train.list"),
//!     Path::new("data/wav"),
//!     Path::new("conf/figure"),
//! )?;
//! # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
//! ```

pub mod audio;
pub mod estimator;
pub mod figure;
pub mod pitch;

pub use estimator::{
    EstimatorError, F0Report, HistogramEstimator, HistogramParams, HistogramParamsBuilder,
};
