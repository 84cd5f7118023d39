//! Holt double-exponential smoothing filter for joint velocities.
//!
//! Every (body, joint) pair is smoothed independently using only its own
//! history. Each sample goes through four stages:
//!
//! 1. **Jitter rejection**: deviations from the previous filtered value that
//!    fall inside the jitter radius are damped in proportion to their size.
//! 2. **Double-exponential blend**: the de-jittered sample is blended with the
//!    previous filtered value extrapolated by the previous trend.
//! 3. **Prediction**: the trend is extrapolated `prediction` frames ahead to
//!    hide filter latency.
//! 4. **Deviation clamp**: predictions further than the deviation radius from
//!    the raw sample are pulled back onto that radius.

use tracing::{debug, trace, warn};

use crate::config::SmoothingParams;
use crate::error::Result;
use crate::frame::{BodyFrame, Vec3};
use crate::history::{HistoryTable, JointHistory};
use crate::joints::{NoisyJoints, TrackingState};

/// Multi-body, multi-joint velocity smoothing filter.
///
/// # Example
///
/// ```
/// use joint_smoothing::{
///     BodyFrame, JointType, SmoothingFilter, SmoothingParams, TrackingState, Vec3,
/// };
///
/// let mut filter = SmoothingFilter::new(SmoothingParams::default());
/// filter.reset(6, JointType::COUNT);
///
/// let mut frame = BodyFrame::skeleton(6);
/// frame.bodies[0].is_tracked = true;
/// frame.bodies[0].set_joint(
///     JointType::HandRight.index(),
///     TrackingState::Tracked,
///     Vec3::new(0.4, 0.1, 0.0),
/// );
///
/// filter.update(&mut frame);
///
/// // First sample of a joint passes through unchanged.
/// let hand = frame.bodies[0].joint(JointType::HandRight).unwrap();
/// assert_eq!(hand.velocity, Vec3::new(0.4, 0.1, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct SmoothingFilter {
    /// Parameters with the jitter radius floored.
    params: SmoothingParams,

    /// `params` with both radii doubled.
    widened: SmoothingParams,

    /// Joints that always use the widened radii.
    noisy_joints: NoisyJoints,

    /// Per joint index: whether it is in `noisy_joints`.
    noisy_mask: Vec<bool>,

    history: HistoryTable,

    /// Set once the table has been sized, explicitly or from a frame.
    sized: bool,
}

impl Default for SmoothingFilter {
    fn default() -> Self {
        Self::new(SmoothingParams::default())
    }
}

impl SmoothingFilter {
    /// Create a filter without an allocated history table.
    ///
    /// The table is sized by [`reset`](Self::reset), or from the first frame
    /// passed to [`update`](Self::update) if `reset` was never called.
    #[must_use]
    pub fn new(params: SmoothingParams) -> Self {
        let params = params.floored();
        Self {
            params,
            widened: params.widened(),
            noisy_joints: NoisyJoints::default(),
            noisy_mask: Vec::new(),
            history: HistoryTable::default(),
            sized: false,
        }
    }

    /// Create a filter with a zeroed `body_count x joint_count` history table.
    #[must_use]
    pub fn with_layout(params: SmoothingParams, body_count: usize, joint_count: usize) -> Self {
        let mut filter = Self::new(params);
        filter.reset(body_count, joint_count);
        filter
    }

    /// Replace the smoothing parameters.
    ///
    /// The jitter radius is floored at
    /// [`JITTER_RADIUS_EPSILON`](crate::config::JITTER_RADIUS_EPSILON) and a
    /// negative deviation radius is raised to zero.
    /// History is kept; the new values apply from the next update.
    pub fn configure(&mut self, params: SmoothingParams) {
        self.params = params.floored();
        self.widened = self.params.widened();
        debug!(
            smoothing = self.params.smoothing,
            correction = self.params.correction,
            prediction = self.params.prediction,
            jitter_radius = self.params.jitter_radius,
            max_deviation_radius = self.params.max_deviation_radius,
            "smoothing parameters configured"
        );
    }

    /// Current parameters, after flooring.
    #[must_use]
    pub const fn params(&self) -> &SmoothingParams {
        &self.params
    }

    /// (Re)allocate a zeroed history table, discarding all smoothing state.
    ///
    /// The layout is kept as given, even when empty: later frames no longer
    /// size the table. Noisy joints outside `joint_count` are dropped.
    pub fn reset(&mut self, body_count: usize, joint_count: usize) {
        self.history = HistoryTable::new(body_count, joint_count);
        self.sized = true;
        if let Err(error) = self.noisy_joints.validate_for(joint_count) {
            warn!(%error, joint_count, "dropping noisy joints outside the layout");
            self.noisy_joints.retain_below(joint_count);
        }
        self.rebuild_noisy_mask();
        debug!(body_count, joint_count, "joint history reset");
    }

    /// `(body_count, joint_count)` of the history table.
    #[must_use]
    pub const fn layout(&self) -> (usize, usize) {
        self.history.layout()
    }

    /// Replace the set of joints filtered with widened radii.
    ///
    /// # Errors
    ///
    /// Returns [`SmoothingError::JointOutOfRange`](crate::SmoothingError::JointOutOfRange)
    /// if the table has been sized and the set names a joint outside it.
    /// The current set is kept in that case. Before sizing, the set is
    /// checked by the [`reset`](Self::reset) that allocates the table.
    pub fn set_noisy_joints(&mut self, noisy_joints: NoisyJoints) -> Result<()> {
        if self.sized {
            noisy_joints.validate_for(self.history.layout().1)?;
        }
        self.noisy_joints = noisy_joints;
        self.rebuild_noisy_mask();
        debug!(count = self.noisy_joints.len(), "noisy joint set replaced");
        Ok(())
    }

    /// Joints filtered with widened radii.
    #[must_use]
    pub const fn noisy_joints(&self) -> &NoisyJoints {
        &self.noisy_joints
    }

    /// History record of one joint, if inside the table.
    #[must_use]
    pub fn history(&self, body: usize, joint: usize) -> Option<&JointHistory> {
        self.history.get(body, joint)
    }

    /// Zero the history of one body, e.g. when its user leaves the scene.
    pub fn forget_body(&mut self, body: usize) {
        match self.history.body_mut(body) {
            Some(records) => records.fill(JointHistory::default()),
            None => warn!(body, "forget_body: body index outside history table"),
        }
    }

    /// Smooth one frame in place.
    ///
    /// Every joint of every tracked body is filtered unless its state is
    /// [`TrackingState::NotTracked`]. Untouched joints keep their raw value
    /// and their history.
    pub fn update(&mut self, frame: &mut BodyFrame) {
        if !self.sized {
            let (body_count, joint_count) = frame.layout();
            debug!(body_count, joint_count, "sizing joint history from first frame");
            self.reset(body_count, joint_count);
        }

        let (body_count, joint_count) = self.history.layout();
        let (frame_bodies, frame_joints) = frame.layout();
        if frame_bodies > body_count || frame_joints > joint_count {
            warn!(
                frame_bodies,
                frame_joints,
                body_count,
                joint_count,
                "frame exceeds history table; extra bodies and joints are skipped"
            );
        }

        for (body_index, body) in frame.bodies.iter_mut().enumerate().take(body_count) {
            if !body.is_tracked {
                continue;
            }
            let Some(records) = self.history.body_mut(body_index) else {
                continue;
            };

            for ((joint_index, joint), history) in
                body.joints.iter_mut().enumerate().zip(records.iter_mut())
            {
                let params = match joint.tracking_state {
                    TrackingState::NotTracked => continue,
                    TrackingState::Inferred => &self.widened,
                    TrackingState::Tracked if self.noisy_mask[joint_index] => &self.widened,
                    TrackingState::Tracked => &self.params,
                };

                if history.frame_count > 0 && joint.velocity == Vec3::zeros() {
                    trace!(body = body_index, joint = joint_index, "joint invalid, history reset");
                }
                joint.velocity = filter_joint(joint.velocity, history, params);
            }
        }
    }

    fn rebuild_noisy_mask(&mut self) {
        let joint_count = self.history.layout().1;
        self.noisy_mask.clear();
        self.noisy_mask
            .extend((0..joint_count).map(|joint| self.noisy_joints.contains(joint)));
    }
}

/// Filter one raw velocity sample against its joint's history.
///
/// `params` must already carry the effective (possibly widened) radii and a
/// jitter radius above zero. A zero sample restarts the joint: it is returned
/// unchanged and the next valid sample takes the first-frame path.
pub fn filter_joint(raw: Vec3, history: &mut JointHistory, params: &SmoothingParams) -> Vec3 {
    let valid = raw != Vec3::zeros();
    if !valid {
        history.frame_count = 0;
    }

    let prev_filtered = history.filtered_velocity;
    let prev_trend = history.trend;
    let prev_raw = history.raw_velocity;

    let (filtered, trend) = match history.frame_count {
        0 => (raw, Vec3::zeros()),
        1 => {
            let filtered = (raw + prev_raw) * 0.5;
            let trend = blend_trend(filtered, prev_filtered, prev_trend, params.correction);
            (filtered, trend)
        }
        _ => {
            let diff = (raw - prev_filtered).norm();
            let dejittered = if diff <= params.jitter_radius {
                let t = diff / params.jitter_radius;
                raw * t + prev_filtered * (1.0 - t)
            } else {
                raw
            };

            let filtered = dejittered * (1.0 - params.smoothing)
                + (prev_filtered + prev_trend) * params.smoothing;
            let trend = blend_trend(filtered, prev_filtered, prev_trend, params.correction);
            (filtered, trend)
        }
    };

    let mut predicted = filtered + trend * params.prediction;

    let deviation = (predicted - raw).norm();
    if deviation > 0.0 && deviation > params.max_deviation_radius {
        let t = params.max_deviation_radius / deviation;
        predicted = predicted * t + raw * (1.0 - t);
    }

    history.raw_velocity = raw;
    history.filtered_velocity = filtered;
    history.trend = trend;
    history.frame_count = if valid {
        history.frame_count.saturating_add(1)
    } else {
        0
    };

    predicted
}

fn blend_trend(filtered: Vec3, prev_filtered: Vec3, prev_trend: Vec3, correction: f64) -> Vec3 {
    (filtered - prev_filtered) * correction + prev_trend * (1.0 - correction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joints::JointType;
    use approx::assert_relative_eq;

    const JITTER_EPS: f64 = crate::config::JITTER_RADIUS_EPSILON;

    fn passthrough_params() -> SmoothingParams {
        SmoothingParams::new(0.0, 0.0, 0.0, 0.1, f64::INFINITY)
    }

    fn single_joint_frame(state: TrackingState, velocity: Vec3) -> BodyFrame {
        let mut frame = BodyFrame::new(1, 1);
        frame.bodies[0].is_tracked = true;
        frame.bodies[0].set_joint(0, state, velocity);
        frame
    }

    #[test]
    fn test_first_sample_passthrough() {
        let mut history = JointHistory::default();
        let raw = Vec3::new(0.3, -0.2, 0.1);
        let out = filter_joint(raw, &mut history, &SmoothingParams::default());

        assert_eq!(out, raw);
        assert_eq!(history.trend, Vec3::zeros());
        assert_eq!(history.frame_count, 1);
    }

    #[test]
    fn test_second_sample_average() {
        let params = SmoothingParams::new(0.5, 0.5, 0.0, 0.05, f64::INFINITY);
        let mut history = JointHistory::default();
        filter_joint(Vec3::new(1.0, 2.0, 3.0), &mut history, &params);
        let out = filter_joint(Vec3::new(3.0, 2.0, 1.0), &mut history, &params);

        assert_relative_eq!(out, Vec3::new(2.0, 2.0, 2.0), epsilon = 1e-12);
        assert_eq!(history.frame_count, 2);
    }

    #[test]
    fn test_jitter_damped_toward_previous() {
        let params = passthrough_params();
        let mut history = JointHistory::default();
        filter_joint(Vec3::new(1.0, 0.0, 0.0), &mut history, &params);
        filter_joint(Vec3::new(1.0, 0.0, 0.0), &mut history, &params);

        // 0.04 deviation inside a 0.1 jitter radius: 40% of the step survives.
        let out = filter_joint(Vec3::new(1.04, 0.0, 0.0), &mut history, &params);
        assert_relative_eq!(out.x, 1.016, epsilon = 1e-12);
    }

    #[test]
    fn test_large_step_passes_through() {
        let params = passthrough_params();
        let mut history = JointHistory::default();
        filter_joint(Vec3::new(1.0, 0.0, 0.0), &mut history, &params);
        filter_joint(Vec3::new(1.0, 0.0, 0.0), &mut history, &params);

        let out = filter_joint(Vec3::new(1.5, 0.0, 0.0), &mut history, &params);
        assert_relative_eq!(out.x, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_deviation_clamp() {
        let params = SmoothingParams::new(0.0, 1.0, 1.0, JITTER_EPS, 0.1);
        let mut history = JointHistory::default();
        filter_joint(Vec3::new(1.0, 0.0, 0.0), &mut history, &params);

        // filtered 2, trend 1, predicted 3 == raw: no clamp
        let out = filter_joint(Vec3::new(3.0, 0.0, 0.0), &mut history, &params);
        assert_relative_eq!(out.x, 3.0, epsilon = 1e-12);

        // filtered 3, trend 1, predicted 4 is clamped to raw + 0.1
        let out = filter_joint(Vec3::new(3.0, 0.0, 0.0), &mut history, &params);
        assert_relative_eq!(out.x, 3.1, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_sample_restarts_joint() {
        let params = SmoothingParams::default();
        let mut history = JointHistory::default();
        for _ in 0..5 {
            filter_joint(Vec3::new(1.0, 0.0, 0.0), &mut history, &params);
        }
        assert_eq!(history.frame_count, 5);

        let out = filter_joint(Vec3::zeros(), &mut history, &params);
        assert_eq!(out, Vec3::zeros());
        assert_eq!(history.frame_count, 0);

        let out = filter_joint(Vec3::new(2.0, 0.0, 0.0), &mut history, &params);
        assert_eq!(out, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(history.frame_count, 1);
    }

    #[test]
    fn test_negative_deviation_radius_keeps_first_sample() {
        let params = SmoothingParams::new(0.0, 0.0, 0.0, 0.1, -0.5);
        let mut history = JointHistory::default();
        assert_eq!(filter_joint(Vec3::x(), &mut history, &params), Vec3::x());

        let mut filter = SmoothingFilter::with_layout(params, 1, 1);
        assert_eq!(filter.params().max_deviation_radius, 0.0);
        let mut frame = single_joint_frame(TrackingState::Tracked, Vec3::x());
        filter.update(&mut frame);
        assert_eq!(frame.bodies[0].joints[0].velocity, Vec3::x());

        // Zero radius pins every later output to the raw sample.
        let mut frame = single_joint_frame(TrackingState::Tracked, Vec3::new(2.0, 0.0, 0.0));
        filter.update(&mut frame);
        let out = frame.bodies[0].joints[0].velocity;
        assert!(out.iter().all(|c| c.is_finite()));
        assert_relative_eq!(out, Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_frame_count_saturates() {
        let mut history = JointHistory {
            frame_count: u32::MAX,
            ..JointHistory::default()
        };
        filter_joint(Vec3::x(), &mut history, &SmoothingParams::default());
        assert_eq!(history.frame_count, u32::MAX);
    }

    #[test]
    fn test_configure_floors_jitter_radius() {
        let mut filter = SmoothingFilter::default();
        filter.configure(SmoothingParams::default().with_jitter_radius(0.0));
        assert_eq!(filter.params().jitter_radius, JITTER_EPS);
    }

    #[test]
    fn test_update_sizes_table_from_first_frame() {
        let mut filter = SmoothingFilter::default();
        assert_eq!(filter.layout(), (0, 0));

        let mut frame = BodyFrame::skeleton(2);
        filter.update(&mut frame);
        assert_eq!(filter.layout(), (2, JointType::COUNT));
    }

    #[test]
    fn test_explicit_empty_layout_is_kept() {
        let mut filter = SmoothingFilter::default();
        filter.reset(1, 0);

        let mut frame = BodyFrame::new(3, 4);
        frame.bodies[0].is_tracked = true;
        frame.bodies[0].set_joint(0, TrackingState::Tracked, Vec3::x());
        filter.update(&mut frame);

        assert_eq!(filter.layout(), (1, 0));
        assert_eq!(frame.bodies[0].joints[0].velocity, Vec3::x());
    }

    #[test]
    fn test_not_tracked_joint_untouched() {
        let mut filter = SmoothingFilter::with_layout(SmoothingParams::default(), 1, 1);
        let mut frame = single_joint_frame(TrackingState::NotTracked, Vec3::new(0.5, 0.0, 0.0));
        filter.update(&mut frame);

        assert_eq!(frame.bodies[0].joints[0].velocity, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(filter.history(0, 0), Some(&JointHistory::default()));
    }

    #[test]
    fn test_untracked_body_untouched() {
        let mut filter = SmoothingFilter::with_layout(SmoothingParams::default(), 1, 1);
        let mut frame = single_joint_frame(TrackingState::Tracked, Vec3::new(0.5, 0.0, 0.0));
        frame.bodies[0].is_tracked = false;
        filter.update(&mut frame);

        assert_eq!(filter.history(0, 0).unwrap().frame_count, 0);
    }

    #[test]
    fn test_inferred_joint_uses_widened_radii() {
        let params = SmoothingParams::new(0.0, 0.0, 0.0, 0.1, 1e6);
        let samples = [1.0, 1.0, 1.15];

        let run = |state: TrackingState| {
            let mut filter = SmoothingFilter::with_layout(params, 1, 1);
            let mut out = Vec3::zeros();
            for &x in &samples {
                let mut frame = single_joint_frame(state, Vec3::new(x, 0.0, 0.0));
                filter.update(&mut frame);
                out = frame.bodies[0].joints[0].velocity;
            }
            out
        };

        assert_relative_eq!(run(TrackingState::Tracked).x, 1.15, epsilon = 1e-12);
        // 0.15 inside the widened 0.2 radius: 75% of the step survives.
        assert_relative_eq!(run(TrackingState::Inferred).x, 1.1125, epsilon = 1e-12);
    }

    #[test]
    fn test_set_noisy_joints_validates_layout() {
        let mut filter = SmoothingFilter::with_layout(SmoothingParams::default(), 1, 4);
        // Only the head survives the four-joint layout.
        assert_eq!(filter.noisy_joints().iter().collect::<Vec<_>>(), vec![3]);
        assert!(filter.set_noisy_joints(NoisyJoints::default()).is_err());
        assert_eq!(filter.noisy_joints().iter().collect::<Vec<_>>(), vec![3]);

        filter
            .set_noisy_joints(NoisyJoints::from_indices([0, 3]))
            .unwrap();
        assert!(filter.noisy_joints().contains(3));
    }

    #[test]
    fn test_reset_drops_noisy_joints_outside_layout() {
        let mut filter = SmoothingFilter::default();
        filter
            .set_noisy_joints(NoisyJoints::from_indices([3, 99]))
            .unwrap();

        filter.reset(1, JointType::COUNT);
        assert_eq!(filter.noisy_joints().iter().collect::<Vec<_>>(), vec![3]);
        assert!(filter.set_noisy_joints(NoisyJoints::from_indices([99])).is_err());
    }

    #[test]
    fn test_forget_body() {
        let mut filter = SmoothingFilter::with_layout(SmoothingParams::default(), 2, 1);
        let mut frame = BodyFrame::new(2, 1);
        for body in &mut frame.bodies {
            body.is_tracked = true;
            body.set_joint(0, TrackingState::Tracked, Vec3::x());
        }
        filter.update(&mut frame);

        filter.forget_body(0);
        filter.forget_body(9);
        assert_eq!(filter.history(0, 0).unwrap().frame_count, 0);
        assert_eq!(filter.history(1, 0).unwrap().frame_count, 1);
    }
}
