//! Per-frame body and joint data exchanged with the tracking host.
//!
//! The same [`BodyFrame`] is both filter input and output: raw velocity
//! samples go in, tracked joints come back with smoothed velocities.

use crate::joints::{JointType, TrackingState};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 3D vector used for velocity samples.
pub type Vec3 = nalgebra::Vector3<f64>;

/// One joint's state in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointData {
    /// Sensor confidence for this joint.
    pub tracking_state: TrackingState,

    /// Velocity sample. Zero marks the joint as invalid.
    pub velocity: Vec3,
}

impl JointData {
    /// Create joint data.
    #[must_use]
    pub const fn new(tracking_state: TrackingState, velocity: Vec3) -> Self {
        Self {
            tracking_state,
            velocity,
        }
    }

    /// A directly observed joint.
    #[must_use]
    pub const fn tracked(velocity: Vec3) -> Self {
        Self::new(TrackingState::Tracked, velocity)
    }
}

/// One body slot in one frame.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyData {
    /// Whether the sensor currently tracks a user in this slot.
    pub is_tracked: bool,

    /// Joints, indexed by joint index.
    pub joints: Vec<JointData>,
}

impl BodyData {
    /// An untracked body with `joint_count` untracked joints.
    #[must_use]
    pub fn new(joint_count: usize) -> Self {
        Self {
            is_tracked: false,
            joints: vec![JointData::default(); joint_count],
        }
    }

    /// Joint by typed identifier.
    #[must_use]
    pub fn joint(&self, joint: JointType) -> Option<&JointData> {
        self.joints.get(joint.index())
    }

    /// Mutable joint by typed identifier.
    pub fn joint_mut(&mut self, joint: JointType) -> Option<&mut JointData> {
        self.joints.get_mut(joint.index())
    }

    /// Overwrite the joint at `index`. Out-of-range indices are ignored.
    pub fn set_joint(&mut self, index: usize, tracking_state: TrackingState, velocity: Vec3) {
        if let Some(joint) = self.joints.get_mut(index) {
            *joint = JointData::new(tracking_state, velocity);
        }
    }
}

/// All body slots reported by the sensor for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyFrame {
    /// Body slots, indexed by body index.
    pub bodies: Vec<BodyData>,
}

impl BodyFrame {
    /// A frame of `body_count` untracked bodies with `joint_count` joints each.
    #[must_use]
    pub fn new(body_count: usize, joint_count: usize) -> Self {
        Self {
            bodies: vec![BodyData::new(joint_count); body_count],
        }
    }

    /// A frame of full skeletons.
    #[must_use]
    pub fn skeleton(body_count: usize) -> Self {
        Self::new(body_count, JointType::COUNT)
    }

    /// `(body_count, joint_count)`, where the joint count is the widest body.
    #[must_use]
    pub fn layout(&self) -> (usize, usize) {
        let joint_count = self
            .bodies
            .iter()
            .map(|body| body.joints.len())
            .max()
            .unwrap_or(0);
        (self.bodies.len(), joint_count)
    }

    /// Body at `index`, if any.
    #[must_use]
    pub fn body(&self, index: usize) -> Option<&BodyData> {
        self.bodies.get(index)
    }

    /// Mutable body at `index`, if any.
    pub fn body_mut(&mut self, index: usize) -> Option<&mut BodyData> {
        self.bodies.get_mut(index)
    }
}
