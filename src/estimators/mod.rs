//! F0-range estimators.
//!
//! This module contains implementations of [`F0RangeEstimator`](crate::F0RangeEstimator).
//!
//! # Available Estimators
//!
//! Enable estimators via Cargo features:
//! - `histogram` - autocorrelation pitch tracking rendered as an SVG histogram (default)

#[cfg(feature = "histogram")]
pub mod histogram;
