//! Smoothing quality analysis.
//!
//! Compares a raw velocity sequence with its filtered counterpart so that
//! parameter changes can be judged by numbers rather than by eye.

use crate::error::{Result, SmoothingError};
use crate::frame::Vec3;
use crate::math::spectrum::{
    high_frequency_ratio, roughness, smoothness_index, HIGH_FREQUENCY_CUTOFF,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum number of samples for a meaningful analysis.
pub const MIN_ANALYSIS_SAMPLES: usize = 4;

/// Sensitivity used when mapping hf ratios to smoothness indices.
const SMOOTHNESS_SENSITIVITY: f64 = 0.1;

/// Raw-versus-filtered comparison of one joint's velocity sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SmoothingReport {
    /// Number of samples analyzed.
    pub samples: usize,

    /// High-frequency energy share of the raw sequence.
    pub raw_hf_ratio: f64,

    /// High-frequency energy share of the filtered sequence.
    pub filtered_hf_ratio: f64,

    /// `1 - filtered_hf_ratio / raw_hf_ratio`, or 0 when raw has no HF energy.
    pub jitter_reduction: f64,

    /// Smoothness index of the raw sequence, in `[0, 1]`.
    pub raw_smoothness: f64,

    /// Smoothness index of the filtered sequence, in `[0, 1]`.
    pub filtered_smoothness: f64,

    /// Mean second-difference magnitude of the raw sequence.
    pub raw_roughness: f64,

    /// Mean second-difference magnitude of the filtered sequence.
    pub filtered_roughness: f64,

    /// Mean distance between filtered and raw samples.
    pub mean_deviation: f64,

    /// Largest distance between filtered and raw samples.
    pub max_deviation: f64,
}

impl SmoothingReport {
    /// Whether filtering made the sequence less rough.
    #[must_use]
    pub fn is_smoother(&self) -> bool {
        self.filtered_roughness < self.raw_roughness
    }
}

/// Analyze how filtering changed a velocity sequence.
///
/// # Errors
///
/// Returns an error if the sequences differ in length or hold fewer than
/// [`MIN_ANALYSIS_SAMPLES`] samples.
pub fn analyze_smoothing(raw: &[Vec3], filtered: &[Vec3]) -> Result<SmoothingReport> {
    if raw.len() != filtered.len() {
        return Err(SmoothingError::length_mismatch(raw.len(), filtered.len()));
    }
    if raw.len() < MIN_ANALYSIS_SAMPLES {
        return Err(SmoothingError::sequence_too_short(
            MIN_ANALYSIS_SAMPLES,
            raw.len(),
        ));
    }

    let raw_hf_ratio = high_frequency_ratio(raw, HIGH_FREQUENCY_CUTOFF);
    let filtered_hf_ratio = high_frequency_ratio(filtered, HIGH_FREQUENCY_CUTOFF);
    let jitter_reduction = if raw_hf_ratio > 0.0 {
        1.0 - filtered_hf_ratio / raw_hf_ratio
    } else {
        0.0
    };

    let deviations: Vec<f64> = raw
        .iter()
        .zip(filtered.iter())
        .map(|(r, f)| (f - r).norm())
        .collect();
    let mean_deviation = deviations.iter().sum::<f64>() / deviations.len() as f64;
    let max_deviation = deviations.iter().copied().fold(0.0f64, f64::max);

    Ok(SmoothingReport {
        samples: raw.len(),
        raw_hf_ratio,
        filtered_hf_ratio,
        jitter_reduction,
        raw_smoothness: smoothness_index(raw_hf_ratio, SMOOTHNESS_SENSITIVITY),
        filtered_smoothness: smoothness_index(filtered_hf_ratio, SMOOTHNESS_SENSITIVITY),
        raw_roughness: roughness(raw),
        filtered_roughness: roughness(filtered),
        mean_deviation,
        max_deviation,
    })
}
