//! End-to-end conversion of a detected sequence into motion.

use crate::config::PipelineConfig;
use crate::motion::{Motion, build_motion};
use crate::refine::{RefineError, refine};
use mimic_data::Sequence;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("Refinement failed: {0}")]
    Refine(#[from] RefineError),
}

/// Refine `sequence` then retarget every frame.
///
/// Only a failed refinement aborts the run; individual frames that cannot
/// be retargeted are reported in [`Motion::skipped`].
#[tracing::instrument(skip_all, fields(frames = sequence.len()))]
pub fn run(sequence: &Sequence, config: &PipelineConfig) -> Result<Motion, PipelineError> {
    let refinement = refine(sequence, &config.refine)?;
    let motion = build_motion(&refinement.sequence, &config.motion);
    info!(
        "Pipeline produced {} bone frames from {} source frames",
        motion.bone_frames.len(),
        sequence.len()
    );
    Ok(motion)
}
