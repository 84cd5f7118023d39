//! Joint Smoothing Library
//!
//! Holt double-exponential smoothing for skeleton joint velocities reported
//! by body-tracking sensors.
//!
//! Each (body, joint) pair is filtered independently with jitter rejection,
//! trend-based prediction and a deviation clamp that keeps the output near
//! the raw sample.
//!
//! # Features
//!
//! - **Per-joint history**: a dense body × joint table, no allocation per frame
//! - **Noisy joints**: feet, hand tips, thumbs and head (configurable) and
//!   inferred joints use doubled radii
//! - **Presets**: the sensor SDK's default, medium and aggressive parameters
//! - **Diagnostics**: spectral and roughness comparison of raw and filtered data
//! - **Streaming**: single-joint smoother with a rolling horizon
//!
//! # Quick Start
//!
//! ```
//! use joint_smoothing::{
//!     BodyFrame, JointType, SmoothingFilter, SmoothingParams, TrackingState, Vec3,
//! };
//!
//! let mut filter = SmoothingFilter::new(SmoothingParams::default());
//! filter.reset(1, JointType::COUNT);
//!
//! let mut frame = BodyFrame::skeleton(1);
//! frame.bodies[0].is_tracked = true;
//! let wrist = frame.bodies[0].joint_mut(JointType::WristLeft).unwrap();
//! wrist.tracking_state = TrackingState::Tracked;
//! wrist.velocity = Vec3::new(0.1, 0.0, 0.2);
//!
//! // Call once per sensor frame.
//! filter.update(&mut frame);
//!
//! let smoothed = frame.bodies[0].joint(JointType::WristLeft).unwrap().velocity;
//! assert_eq!(smoothed, Vec3::new(0.1, 0.0, 0.2));
//! ```
//!
//! # Presets
//!
//! | Preset | smoothing | correction | prediction | jitter | max deviation |
//! |--------|-----------|------------|------------|--------|---------------|
//! | `default()` | 0.5 | 0.5 | 0.5 | 0.05 | 0.04 |
//! | `medium()` | 0.5 | 0.1 | 0.5 | 0.1 | 0.1 |
//! | `aggressive()` | 0.7 | 0.3 | 1.0 | 1.0 | 1.0 |

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod frame;
pub mod history;
pub mod joints;
pub mod math;
pub mod streaming;

// Re-exports for convenient access
pub use config::{SmoothingParams, JITTER_RADIUS_EPSILON, WIDENED_RADIUS_FACTOR};
pub use diagnostics::{analyze_smoothing, SmoothingReport, MIN_ANALYSIS_SAMPLES};
pub use error::{Result, SmoothingError};
pub use filter::{filter_joint, SmoothingFilter};
pub use frame::{BodyData, BodyFrame, JointData, Vec3};
pub use history::JointHistory;
pub use joints::{JointType, NoisyJoints, TrackingState};
pub use streaming::JointVelocityStream;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
