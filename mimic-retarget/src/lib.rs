//! Mimic Retarget Crate
//!
//! Turns a sequence of detected 3D joint positions into bone rotations for a
//! fixed humanoid rig.
//!
//! ## Modules
//!
//! - [`orient`]: orientation quaternion from a forward and an up axis
//! - [`skeleton`]: bone hierarchy, joint bindings and rest orientations
//! - [`refine`]: gap filling, smoothing and scale normalization of a capture
//! - [`retarget`]: per-frame solve of parent-relative bone rotations
//! - [`motion`]: assembly of bone frames for a whole sequence
//! - [`pipeline`]: refine followed by motion assembly

pub mod config;
pub mod motion;
pub mod orient;
pub mod pipeline;
pub mod refine;
pub mod retarget;
pub mod skeleton;

pub use config::{LowpassConfig, MotionConfig, PipelineConfig, RefineConfig};
pub use motion::{IkState, IkVisibility, Motion, SkippedFrame, build_motion, center_translation};
pub use orient::{OrientError, orient_from_axes};
pub use pipeline::{PipelineError, run};
pub use refine::{RefineError, Refinement, refine};
pub use retarget::{BoneFrame, BonePose, RetargetError, SkeletonPose, retarget_frame, solve_pose};
pub use skeleton::{Bone, IkBone};
