//! Motion assembly: bone frames for a whole refined sequence.

use crate::config::{CENTER_SCALE, MotionConfig};
use crate::retarget::{BoneFrame, RetargetError, retarget_frame};
use crate::skeleton::{Bone, IkBone};
use glam::{Quat, Vec3};
use mimic_data::{Frame, HipLandmarks2d, Sequence};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Visibility entry for one IK controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IkState {
    pub bone: IkBone,
    pub enabled: bool,
}

/// The single IK visibility record of a motion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IkVisibility {
    pub frame: u32,
    pub show: bool,
    pub ik: Vec<IkState>,
}

impl IkVisibility {
    /// Model shown, every IK controller switched off.
    pub fn all_disabled() -> Self {
        Self {
            frame: 0,
            show: true,
            ik: IkBone::ALL
                .iter()
                .map(|&bone| IkState {
                    bone,
                    enabled: false,
                })
                .collect(),
        }
    }
}

/// A source frame that produced no bone frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkippedFrame {
    pub index: u32,
    /// `None` when the frame had no detection at all.
    pub reason: Option<RetargetError>,
}

/// Retargeted motion ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    /// Bone frames in source frame order, catalog order within a frame.
    pub bone_frames: Vec<BoneFrame>,
    pub show_ik: IkVisibility,
    pub skipped: Vec<SkippedFrame>,
}

impl Motion {
    /// Bone frames of a single bone, in frame order.
    pub fn frames_of(&self, bone: Bone) -> impl Iterator<Item = &BoneFrame> {
        self.bone_frames.iter().filter(move |bf| bf.bone == bone)
    }
}

/// Center-bone translation from the 2D hip midpoint.
///
/// Image y grows downward, so it is inverted.
pub fn center_translation(hips: &HipLandmarks2d) -> Vec3 {
    let offset = hips.midpoint() - 0.5;
    Vec3::new(offset.x * CENTER_SCALE, -offset.y * CENTER_SCALE, 0.0)
}

fn frame_output(frame: &Frame, config: &MotionConfig) -> Result<Vec<BoneFrame>, SkippedFrame> {
    if frame.joints.is_empty() {
        return Err(SkippedFrame {
            index: frame.index,
            reason: None,
        });
    }

    let mut bone_frames = retarget_frame(frame).map_err(|e| SkippedFrame {
        index: frame.index,
        reason: Some(e),
    })?;

    if config.center_enabled {
        match &frame.hips_2d {
            Some(hips) => bone_frames.push(BoneFrame {
                bone: Bone::Center,
                frame: frame.index,
                rotation: Quat::IDENTITY,
                translation: Some(center_translation(hips)),
            }),
            None => debug!("Frame {} has no 2D hips, center not moved", frame.index),
        }
    }

    Ok(bone_frames)
}

/// Retarget every frame of `sequence` and append the IK visibility record.
///
/// Frames are solved in parallel; the output keeps source frame order.
/// Frames that cannot be solved are skipped, never aborting the batch.
#[tracing::instrument(skip_all, fields(frames = sequence.len()))]
pub fn build_motion(sequence: &Sequence, config: &MotionConfig) -> Motion {
    let results: Vec<Result<Vec<BoneFrame>, SkippedFrame>> = sequence
        .frames()
        .par_iter()
        .map(|frame| frame_output(frame, config))
        .collect();

    let mut bone_frames = Vec::new();
    let mut skipped = Vec::new();
    for result in results {
        match result {
            Ok(frames) => bone_frames.extend(frames),
            Err(skip) => {
                if let Some(reason) = &skip.reason {
                    warn!("Skipping frame {}: {}", skip.index, reason);
                }
                skipped.push(skip);
            }
        }
    }

    info!(
        "Built {} bone frames, skipped {} of {} source frames",
        bone_frames.len(),
        skipped.len(),
        sequence.len()
    );

    Motion {
        bone_frames,
        show_ik: IkVisibility::all_disabled(),
        skipped,
    }
}
