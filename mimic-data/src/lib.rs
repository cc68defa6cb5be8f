//! Mimic Data Crate
//!
//! Pose data model shared by the mimic pipeline: the fixed 33-joint landmark
//! vocabulary, per-frame joint sets, ordered frame sequences and loading of
//! capture files written by the upstream pose estimator.
//! This crate knows nothing about bones or rotations.

pub mod capture;
pub mod landmark;
pub mod types;

pub use capture::{Capture, CaptureError, load_capture, parse_capture};
pub use landmark::{JointRef, Landmark, SyntheticJoint};
pub use types::{Frame, HipLandmarks2d, JointPositions, Sequence, SequenceError};
