//! Streaming smoother for a single joint.
//!
//! This module provides [`JointVelocityStream`] for hosts that track one
//! joint at a time, e.g. a hand cursor, and want a rolling record of raw
//! and filtered samples for tuning.

use std::collections::VecDeque;

use crate::config::SmoothingParams;
use crate::diagnostics::{analyze_smoothing, SmoothingReport, MIN_ANALYSIS_SAMPLES};
use crate::filter::filter_joint;
use crate::frame::Vec3;
use crate::history::JointHistory;

/// Single-joint velocity smoother with a rolling horizon of samples.
///
/// # Example
///
/// ```
/// use joint_smoothing::{JointVelocityStream, SmoothingParams, Vec3};
///
/// let mut stream = JointVelocityStream::new(SmoothingParams::default(), 2.0);
///
/// let first = stream.update(Vec3::new(0.2, 0.0, 0.0), 0.0);
/// assert_eq!(first, Some(Vec3::new(0.2, 0.0, 0.0)));
///
/// // Out-of-order samples are skipped.
/// assert_eq!(stream.update(Vec3::new(0.3, 0.0, 0.0), 0.0), None);
/// ```
#[derive(Debug, Clone)]
pub struct JointVelocityStream {
    /// Effective parameters, floored and optionally widened.
    params: SmoothingParams,

    history: JointHistory,

    /// Time window in seconds.
    horizon_seconds: f64,

    /// Maximum buffer size.
    max_samples: usize,

    /// Minimum samples for a report.
    min_samples: usize,

    timestamps: VecDeque<f64>,
    raw: VecDeque<Vec3>,
    filtered: VecDeque<Vec3>,
}

impl JointVelocityStream {
    /// Create a stream keeping `horizon_seconds` of samples.
    #[must_use]
    pub fn new(params: SmoothingParams, horizon_seconds: f64) -> Self {
        Self::with_buffer(params, horizon_seconds, 300, 30)
    }

    /// Create with custom buffer parameters.
    ///
    /// `min_samples` is raised to the diagnostics minimum if lower.
    #[must_use]
    pub fn with_buffer(
        params: SmoothingParams,
        horizon_seconds: f64,
        max_samples: usize,
        min_samples: usize,
    ) -> Self {
        Self {
            params: params.floored(),
            history: JointHistory::default(),
            horizon_seconds,
            max_samples,
            min_samples: min_samples.max(MIN_ANALYSIS_SAMPLES),
            timestamps: VecDeque::with_capacity(max_samples),
            raw: VecDeque::with_capacity(max_samples),
            filtered: VecDeque::with_capacity(max_samples),
        }
    }

    /// Use doubled jitter and deviation radii, as for noisy joints.
    #[must_use]
    pub fn widened(mut self, widened: bool) -> Self {
        if widened {
            self.params = self.params.widened();
        }
        self
    }

    /// Filter one sample taken at `timestamp` seconds.
    ///
    /// Returns `None`, without touching filter state, if the timestamp is not
    /// finite or does not advance past the previous sample.
    pub fn update(&mut self, velocity: Vec3, timestamp: f64) -> Option<Vec3> {
        if !timestamp.is_finite() {
            return None;
        }
        if let Some(&last) = self.timestamps.back() {
            if timestamp <= last {
                return None;
            }
        }

        let smoothed = filter_joint(velocity, &mut self.history, &self.params);

        self.timestamps.push_back(timestamp);
        self.raw.push_back(velocity);
        self.filtered.push_back(smoothed);

        self.trim_to_horizon();
        self.enforce_max_size();

        Some(smoothed)
    }

    fn trim_to_horizon(&mut self) {
        let Some(&current) = self.timestamps.back() else {
            return;
        };
        let cutoff = current - self.horizon_seconds;

        while self.timestamps.front().is_some_and(|&t| t < cutoff) {
            self.pop_front();
        }
    }

    fn enforce_max_size(&mut self) {
        while self.timestamps.len() > self.max_samples {
            self.pop_front();
        }
    }

    fn pop_front(&mut self) {
        self.timestamps.pop_front();
        self.raw.pop_front();
        self.filtered.pop_front();
    }

    /// Whether the buffer holds enough samples for a report.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.timestamps.len() >= self.min_samples
    }

    /// Analyze the buffered samples. `None` until [`is_ready`](Self::is_ready).
    #[must_use]
    pub fn report(&self) -> Option<SmoothingReport> {
        if !self.is_ready() {
            return None;
        }
        let raw: Vec<Vec3> = self.raw.iter().copied().collect();
        let filtered: Vec<Vec3> = self.filtered.iter().copied().collect();
        analyze_smoothing(&raw, &filtered).ok()
    }

    /// Drop all samples and filter state.
    pub fn reset(&mut self) {
        self.history = JointHistory::default();
        self.timestamps.clear();
        self.raw.clear();
        self.filtered.clear();
    }

    /// Number of buffered samples.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.timestamps.len()
    }

    /// Time covered by the buffer.
    #[must_use]
    pub fn time_span(&self) -> f64 {
        match (self.timestamps.front(), self.timestamps.back()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Set a new horizon window, trimming immediately.
    pub fn set_horizon(&mut self, horizon_seconds: f64) {
        self.horizon_seconds = horizon_seconds;
        self.trim_to_horizon();
    }

    /// Effective parameters.
    #[must_use]
    pub const fn params(&self) -> &SmoothingParams {
        &self.params
    }

    /// Filter state of the joint.
    #[must_use]
    pub const fn history(&self) -> &JointHistory {
        &self.history
    }
}

impl Default for JointVelocityStream {
    fn default() -> Self {
        Self::new(SmoothingParams::default(), 2.0)
    }
}
