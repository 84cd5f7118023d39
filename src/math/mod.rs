//! Mathematical utilities for smoothing diagnostics.
//!
//! - [`spectrum`]: FFT high-frequency energy ratio, smoothness index and
//!   second-difference roughness

pub mod spectrum;

pub use spectrum::{high_frequency_ratio, roughness, smoothness_index, HIGH_FREQUENCY_CUTOFF};
