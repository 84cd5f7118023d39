//! Smoothing parameters for the joint velocity filter.
//!
//! This module provides [`SmoothingParams`], the five-value configuration
//! surface of the filter, along with the presets shipped by the sensor SDK.
//!
//! # Example
//!
//! ```
//! use joint_smoothing::SmoothingParams;
//!
//! let params = SmoothingParams::default();
//! assert!(params.validate().is_ok());
//!
//! let heavy = SmoothingParams::aggressive().with_prediction(0.5);
//! assert_eq!(heavy.smoothing, 0.7);
//! ```

use crate::error::{Result, SmoothingError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lower bound for the jitter radius (a tenth of a millimetre).
pub const JITTER_RADIUS_EPSILON: f64 = 1e-4;

/// Factor applied to both radii for noisy or inferred joints.
pub const WIDENED_RADIUS_FACTOR: f64 = 2.0;

/// Holt double-exponential smoothing parameters.
///
/// - `smoothing`: `[0, 1]`, lower values stay closer to the raw data and are noisier.
/// - `correction`: `[0, 1]`, higher values correct faster and feel more responsive.
/// - `prediction`: `>= 0`, how many frames into the future to predict.
/// - `jitter_radius`: deviation distance below which input change is treated as jitter.
/// - `max_deviation_radius`: maximum distance the output may deviate from the raw sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SmoothingParams {
    /// How much smoothing occurs. Lags when too high.
    pub smoothing: f64,

    /// How much to correct back from the prediction. Can get springy when too high.
    pub correction: f64,

    /// Number of frames to predict ahead. Can overshoot when too high.
    pub prediction: f64,

    /// Radius in which jitter is removed. Over-smooths when too high.
    pub jitter_radius: f64,

    /// Radius the prediction may stray from raw data. Snaps back to noise when too high.
    pub max_deviation_radius: f64,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            smoothing: 0.5,
            correction: 0.5,
            prediction: 0.5,
            jitter_radius: 0.05,
            max_deviation_radius: 0.04,
        }
    }
}

impl SmoothingParams {
    /// Create parameters from the five raw values.
    #[must_use]
    pub const fn new(
        smoothing: f64,
        correction: f64,
        prediction: f64,
        jitter_radius: f64,
        max_deviation_radius: f64,
    ) -> Self {
        Self {
            smoothing,
            correction,
            prediction,
            jitter_radius,
            max_deviation_radius,
        }
    }

    /// Preset with slower correction and wider radii.
    #[must_use]
    pub const fn medium() -> Self {
        Self::new(0.5, 0.1, 0.5, 0.1, 0.1)
    }

    /// Preset for heavy smoothing with a full frame of prediction.
    #[must_use]
    pub const fn aggressive() -> Self {
        Self::new(0.7, 0.3, 1.0, 1.0, 1.0)
    }

    /// Validate the parameters.
    ///
    /// `max_deviation_radius` may be infinite, which disables the clamp.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is NaN or out of range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(SmoothingError::invalid_config(
                "smoothing must be in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.correction) {
            return Err(SmoothingError::invalid_config(
                "correction must be in [0, 1]",
            ));
        }
        if !self.prediction.is_finite() || self.prediction < 0.0 {
            return Err(SmoothingError::invalid_config(
                "prediction must be finite and non-negative",
            ));
        }
        if !self.jitter_radius.is_finite() || self.jitter_radius < 0.0 {
            return Err(SmoothingError::invalid_config(
                "jitter_radius must be finite and non-negative",
            ));
        }
        if self.max_deviation_radius.is_nan() || self.max_deviation_radius < 0.0 {
            return Err(SmoothingError::invalid_config(
                "max_deviation_radius must be non-negative",
            ));
        }
        Ok(())
    }

    /// Copy with the jitter radius floored at [`JITTER_RADIUS_EPSILON`] and
    /// a negative deviation radius raised to zero.
    ///
    /// A NaN jitter radius is also replaced by the epsilon.
    #[must_use]
    pub fn floored(mut self) -> Self {
        self.jitter_radius = self.jitter_radius.max(JITTER_RADIUS_EPSILON);
        self.max_deviation_radius = self.max_deviation_radius.max(0.0);
        self
    }

    /// Copy with both radii scaled by [`WIDENED_RADIUS_FACTOR`].
    #[must_use]
    pub fn widened(mut self) -> Self {
        self.jitter_radius *= WIDENED_RADIUS_FACTOR;
        self.max_deviation_radius *= WIDENED_RADIUS_FACTOR;
        self
    }

    /// Set the smoothing factor.
    #[must_use]
    pub const fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the correction factor.
    #[must_use]
    pub const fn with_correction(mut self, correction: f64) -> Self {
        self.correction = correction;
        self
    }

    /// Set the number of frames to predict.
    #[must_use]
    pub const fn with_prediction(mut self, prediction: f64) -> Self {
        self.prediction = prediction;
        self
    }

    /// Set the jitter radius.
    #[must_use]
    pub const fn with_jitter_radius(mut self, jitter_radius: f64) -> Self {
        self.jitter_radius = jitter_radius;
        self
    }

    /// Set the maximum deviation radius.
    #[must_use]
    pub const fn with_max_deviation_radius(mut self, max_deviation_radius: f64) -> Self {
        self.max_deviation_radius = max_deviation_radius;
        self
    }
}
