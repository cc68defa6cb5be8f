//! Spine-length scale normalization.

use crate::refine::RefineError;
use mimic_data::{Sequence, SyntheticJoint};
use tracing::debug;

/// Mean spine lengths below this cannot be calibrated against.
const MIN_SPINE_LENGTH: f32 = 1e-6;

/// Scale factor mapping the capture's mean spine length onto `spine_length`.
///
/// Only frames with a complete joint set contribute. Returns the factor and
/// the number of contributing frames.
pub fn spine_scale(sequence: &Sequence, spine_length: f32) -> Result<(f32, usize), RefineError> {
    if !(spine_length.is_finite() && spine_length > 0.0) {
        return Err(RefineError::InvalidSpineLength {
            value: spine_length,
        });
    }

    let mut total = 0.0f32;
    let mut count = 0usize;

    for frame in sequence.iter().filter(|f| f.joints.is_complete()) {
        let neck = frame.joints.resolve(SyntheticJoint::Neck.into());
        let waist = frame.joints.resolve(SyntheticJoint::Waist.into());
        if let (Some(neck), Some(waist)) = (neck, waist) {
            total += neck.distance(waist);
            count += 1;
        }
    }

    if count == 0 {
        return Err(RefineError::NoCalibrationData);
    }

    let mean = total / count as f32;
    if !(mean.is_finite() && mean > MIN_SPINE_LENGTH) {
        return Err(RefineError::DegenerateSpine { mean });
    }

    let scale = spine_length / mean;
    debug!(
        "Mean spine length {:.4} over {} frames, scale {:.4}",
        mean, count, scale
    );
    Ok((scale, count))
}

/// Multiply every joint of every frame by `scale`.
pub fn apply_scale(sequence: &Sequence, scale: f32) -> Sequence {
    sequence.map_joints(|_, frame| frame.joints.scaled(scale))
}
