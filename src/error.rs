//! Error types for joint smoothing.
//!
//! Filtering itself never fails. Errors come from parameter validation,
//! noisy-joint sets that do not fit the allocated layout, and diagnostics
//! over malformed sample sequences.

use thiserror::Error;

/// Main error type for joint smoothing operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SmoothingError {
    /// Parameter validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A joint index does not exist in the allocated layout.
    #[error("Joint index {joint} out of range for {joint_count} joints")]
    JointOutOfRange { joint: usize, joint_count: usize },

    /// Raw and filtered sequences have different lengths.
    #[error("Length mismatch: {raw} raw samples vs {filtered} filtered samples")]
    LengthMismatch { raw: usize, filtered: usize },

    /// Not enough samples for analysis.
    #[error("Sequence too short: need at least {min} samples, got {actual}")]
    SequenceTooShort { min: usize, actual: usize },
}

/// Result type alias for joint smoothing operations.
pub type Result<T> = std::result::Result<T, SmoothingError>;

impl SmoothingError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a joint out of range error.
    #[must_use]
    pub const fn joint_out_of_range(joint: usize, joint_count: usize) -> Self {
        Self::JointOutOfRange { joint, joint_count }
    }

    /// Create a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(raw: usize, filtered: usize) -> Self {
        Self::LengthMismatch { raw, filtered }
    }

    /// Create a sequence too short error.
    #[must_use]
    pub const fn sequence_too_short(min: usize, actual: usize) -> Self {
        Self::SequenceTooShort { min, actual }
    }
}
