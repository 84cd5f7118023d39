//! Joint identifiers, tracking states and the noisy-joint set.

use std::collections::BTreeSet;

use crate::error::{Result, SmoothingError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Skeleton joints in sensor order.
///
/// The discriminant is the joint's index within a body's joint array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointType {
    SpineBase = 0,
    SpineMid = 1,
    Neck = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
    SpineShoulder = 20,
    HandTipLeft = 21,
    ThumbLeft = 22,
    HandTipRight = 23,
    ThumbRight = 24,
}

impl JointType {
    /// Number of joints in a full skeleton.
    pub const COUNT: usize = 25;

    /// All joints, ordered by index.
    pub const ALL: [Self; Self::COUNT] = [
        Self::SpineBase,
        Self::SpineMid,
        Self::Neck,
        Self::Head,
        Self::ShoulderLeft,
        Self::ElbowLeft,
        Self::WristLeft,
        Self::HandLeft,
        Self::ShoulderRight,
        Self::ElbowRight,
        Self::WristRight,
        Self::HandRight,
        Self::HipLeft,
        Self::KneeLeft,
        Self::AnkleLeft,
        Self::FootLeft,
        Self::HipRight,
        Self::KneeRight,
        Self::AnkleRight,
        Self::FootRight,
        Self::SpineShoulder,
        Self::HandTipLeft,
        Self::ThumbLeft,
        Self::HandTipRight,
        Self::ThumbRight,
    ];

    /// Index of this joint within a body's joint array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Joint at `index`, if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable joint name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SpineBase => "spine_base",
            Self::SpineMid => "spine_mid",
            Self::Neck => "neck",
            Self::Head => "head",
            Self::ShoulderLeft => "shoulder_left",
            Self::ElbowLeft => "elbow_left",
            Self::WristLeft => "wrist_left",
            Self::HandLeft => "hand_left",
            Self::ShoulderRight => "shoulder_right",
            Self::ElbowRight => "elbow_right",
            Self::WristRight => "wrist_right",
            Self::HandRight => "hand_right",
            Self::HipLeft => "hip_left",
            Self::KneeLeft => "knee_left",
            Self::AnkleLeft => "ankle_left",
            Self::FootLeft => "foot_left",
            Self::HipRight => "hip_right",
            Self::KneeRight => "knee_right",
            Self::AnkleRight => "ankle_right",
            Self::FootRight => "foot_right",
            Self::SpineShoulder => "spine_shoulder",
            Self::HandTipLeft => "hand_tip_left",
            Self::ThumbLeft => "thumb_left",
            Self::HandTipRight => "hand_tip_right",
            Self::ThumbRight => "thumb_right",
        }
    }
}

/// Sensor-reported confidence of a joint in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackingState {
    /// Not seen this frame. The filter leaves the joint alone.
    #[default]
    NotTracked,
    /// Position guessed from neighbouring joints. Filtered with widened radii.
    Inferred,
    /// Directly observed.
    Tracked,
}

/// Joints filtered with widened jitter and deviation radii.
///
/// Stored as joint indices so layouts other than the full skeleton can be
/// configured too.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoisyJoints {
    indices: BTreeSet<usize>,
}

impl Default for NoisyJoints {
    /// Feet, hand tips, thumbs and head.
    fn default() -> Self {
        Self::from_joint_types([
            JointType::FootLeft,
            JointType::FootRight,
            JointType::HandTipLeft,
            JointType::HandTipRight,
            JointType::ThumbLeft,
            JointType::ThumbRight,
            JointType::Head,
        ])
    }
}

impl NoisyJoints {
    /// A set with no noisy joints.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            indices: BTreeSet::new(),
        }
    }

    /// Build from typed joint identifiers.
    pub fn from_joint_types(joints: impl IntoIterator<Item = JointType>) -> Self {
        Self {
            indices: joints.into_iter().map(JointType::index).collect(),
        }
    }

    /// Build from raw joint indices.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    /// Whether the joint at `index` is noisy.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Number of joints in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the noisy joint indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Drop every index at or above `joint_count`.
    pub fn retain_below(&mut self, joint_count: usize) {
        self.indices.retain(|&index| index < joint_count);
    }

    /// Check every index against a layout with `joint_count` joints.
    ///
    /// # Errors
    ///
    /// Returns [`SmoothingError::JointOutOfRange`] for the first index that
    /// does not exist.
    pub fn validate_for(&self, joint_count: usize) -> Result<()> {
        match self.indices.iter().find(|&&index| index >= joint_count) {
            Some(&joint) => Err(SmoothingError::joint_out_of_range(joint, joint_count)),
            None => Ok(()),
        }
    }
}
