//! Per-joint filter history.

use crate::frame::Vec3;

/// Smoothing state carried between frames for one (body, joint) pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointHistory {
    /// Last raw velocity sample.
    pub raw_velocity: Vec3,

    /// Last filtered velocity, before prediction.
    pub filtered_velocity: Vec3,

    /// Estimated rate of change of the filtered velocity.
    pub trend: Vec3,

    /// Consecutive valid samples seen. Only 0, 1 and 2+ are distinguished.
    pub frame_count: u32,
}

/// Dense `body_count x joint_count` table of [`JointHistory`] records.
#[derive(Debug, Clone, Default)]
pub(crate) struct HistoryTable {
    records: Vec<JointHistory>,
    body_count: usize,
    joint_count: usize,
}

impl HistoryTable {
    pub(crate) fn new(body_count: usize, joint_count: usize) -> Self {
        Self {
            records: vec![JointHistory::default(); body_count * joint_count],
            body_count,
            joint_count,
        }
    }

    pub(crate) const fn layout(&self) -> (usize, usize) {
        (self.body_count, self.joint_count)
    }

    pub(crate) fn get(&self, body: usize, joint: usize) -> Option<&JointHistory> {
        if body < self.body_count && joint < self.joint_count {
            self.records.get(body * self.joint_count + joint)
        } else {
            None
        }
    }

    /// All records of one body, indexed by joint.
    pub(crate) fn body_mut(&mut self, body: usize) -> Option<&mut [JointHistory]> {
        if body < self.body_count {
            let start = body * self.joint_count;
            Some(&mut self.records[start..start + self.joint_count])
        } else {
            None
        }
    }
}
