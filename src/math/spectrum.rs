//! Spectral and differential roughness measures for 3D sample sequences.
//!
//! Each axis is mean-removed and transformed with an FFT; the share of
//! energy above a cutoff frequency is a proxy for frame-to-frame jitter.

use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::frame::Vec3;

/// Fraction of the Nyquist frequency above which energy counts as jitter.
pub const HIGH_FREQUENCY_CUTOFF: f64 = 0.5;

/// Energy below this is treated as a constant signal.
const ENERGY_EPS: f64 = 1e-18;

/// Share of spectral energy above `cutoff` (a fraction of Nyquist), summed
/// over the three axes.
///
/// Returns a value in `[0, 1]`; 0 for constant or too-short sequences.
#[must_use]
pub fn high_frequency_ratio(samples: &[Vec3], cutoff: f64) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);

    let n_freq = n / 2 + 1;
    let nyquist_bin = (n / 2).max(1) as f64;

    let mut total = 0.0;
    let mut high = 0.0;

    for axis in 0..3 {
        let mean = samples.iter().map(|s| s[axis]).sum::<f64>() / n as f64;
        let mut buffer: Vec<Complex64> = samples
            .iter()
            .map(|s| Complex64::new(s[axis] - mean, 0.0))
            .collect();

        fft.process(&mut buffer);

        for (k, c) in buffer.iter().take(n_freq).enumerate().skip(1) {
            let energy = c.norm_sqr();
            total += energy;
            if k as f64 / nyquist_bin > cutoff {
                high += energy;
            }
        }
    }

    if total < ENERGY_EPS {
        0.0
    } else {
        high / total
    }
}

/// Smoothness index from a high-frequency energy ratio.
///
/// Returns a value in `[0, 1]` where 1 = perfectly smooth.
#[must_use]
pub fn smoothness_index(hf_ratio: f64, sensitivity: f64) -> f64 {
    if hf_ratio < 1e-10 {
        return 1.0;
    }

    let log_ratio = (hf_ratio / sensitivity).ln();
    1.0 / (1.0 + (log_ratio / 2.0).exp())
}

/// Mean magnitude of second differences.
///
/// For velocity samples this is the mean frame-to-frame change in
/// acceleration; 0 for sequences shorter than three samples.
#[must_use]
pub fn roughness(samples: &[Vec3]) -> f64 {
    if samples.len() < 3 {
        return 0.0;
    }

    let total: f64 = samples
        .windows(3)
        .map(|w| (w[2] - w[1] * 2.0 + w[0]).norm())
        .sum();
    total / (samples.len() - 2) as f64
}
