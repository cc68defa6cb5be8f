//! Temporal refinement of a whole capture.
//!
//! Refinement needs global statistics, so it runs over the complete sequence
//! before any frame is retargeted:
//! 1. every joint coordinate is treated as an independent scalar channel
//!    (33 joints × 3 axes) and its gaps are filled,
//! 2. channels are optionally low-pass filtered,
//! 3. the whole capture is scaled so its mean spine length matches the
//!    configured reference.
//!
//! The input sequence is never modified; a new one is returned.

pub mod interpolate;
pub mod lowpass;
pub mod normalize;

pub use interpolate::fill_gaps;
pub use lowpass::lowpass;
pub use normalize::{apply_scale, spine_scale};

use crate::config::RefineConfig;
use glam::Vec3;
use mimic_data::{JointPositions, Landmark, Sequence};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

const AXES: usize = 3;
const CHANNEL_COUNT: usize = Landmark::COUNT * AXES;

/// Errors from the refinement pass.
#[derive(Debug, Error, PartialEq)]
pub enum RefineError {
    #[error("No calibration data: no frame has a complete joint set")]
    NoCalibrationData,

    #[error("Mean spine length {mean} is too small to calibrate against")]
    DegenerateSpine { mean: f32 },

    #[error("Reference spine length {value} must be positive and finite")]
    InvalidSpineLength { value: f32 },
}

/// Result of refinement.
#[derive(Debug, Clone)]
pub struct Refinement {
    pub sequence: Sequence,
    /// Factor every coordinate was multiplied by.
    pub scale: f32,
    /// Number of complete frames the scale was computed from.
    pub calibration_frames: usize,
}

/// Fill gaps, optionally smooth, and normalize the scale of `sequence`.
#[tracing::instrument(skip_all, fields(frames = sequence.len()))]
pub fn refine(sequence: &Sequence, config: &RefineConfig) -> Result<Refinement, RefineError> {
    let smoothed = if sequence.len() < config.min_sequence_len {
        debug!(
            "Sequence shorter than {} frames, skipping gap fill",
            config.min_sequence_len
        );
        sequence.clone()
    } else {
        fill_and_smooth(sequence, config)
    };

    let (scale, calibration_frames) = spine_scale(&smoothed, config.spine_length)?;
    info!(
        "Refined {} frames (scale {:.4} from {} calibration frames)",
        smoothed.len(),
        scale,
        calibration_frames
    );

    Ok(Refinement {
        sequence: apply_scale(&smoothed, scale),
        scale,
        calibration_frames,
    })
}

fn channel_of(joints: &JointPositions, channel: usize) -> Option<f32> {
    let landmark = Landmark::ALL[channel / AXES];
    joints.get(landmark).map(|p| p[channel % AXES])
}

fn fill_and_smooth(sequence: &Sequence, config: &RefineConfig) -> Sequence {
    let times: Vec<u32> = sequence.iter().map(|frame| frame.index).collect();
    let channels: Vec<Vec<Option<f32>>> = (0..CHANNEL_COUNT)
        .into_par_iter()
        .map(|c| {
            let mut channel: Vec<Option<f32>> = sequence
                .iter()
                .map(|frame| channel_of(&frame.joints, c))
                .collect();
            fill_gaps(&mut channel, &times);

            if let Some(lowpass_config) = &config.lowpass {
                let mut values: Vec<f32> = channel.iter().flatten().copied().collect();
                if values.len() == channel.len() {
                    lowpass(&mut values, lowpass_config);
                    channel = values.into_iter().map(Some).collect();
                }
            }
            channel
        })
        .collect();

    for landmark in Landmark::ALL {
        if channels[landmark.index() * AXES].iter().all(Option::is_none) {
            warn!("Landmark {} never detected; frames stay incomplete", landmark);
        }
    }

    sequence.map_joints(|i, _| {
        let mut joints = JointPositions::empty();
        for landmark in Landmark::ALL {
            let base = landmark.index() * AXES;
            let position = match (
                channels[base][i],
                channels[base + 1][i],
                channels[base + 2][i],
            ) {
                (Some(x), Some(y), Some(z)) => Some(Vec3::new(x, y, z)),
                _ => None,
            };
            joints.set(landmark, position);
        }
        joints
    })
}
