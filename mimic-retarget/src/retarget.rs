//! Per-frame skeleton retargeting.
//!
//! Walks [`CATALOG`] parents-first. For every bone the orientation built from
//! its forward/up segments is taken relative to the bind pose
//! (`adjusted = world * rest⁻¹`) and then expressed in the space of its parent
//! chain: `local = (root.local * … * parent.local)⁻¹ * adjusted`.
//! Composing the locals root-to-leaf therefore reproduces `adjusted`.

use crate::orient::{OrientError, orient_from_axes};
use crate::skeleton::{BONE_COUNT, Bone, CATALOG, Segment, catalog_index};
use glam::{Quat, Vec3};
use mimic_data::{Frame, JointPositions, JointRef};
use serde::Serialize;
use thiserror::Error;

/// Why a frame could not be retargeted.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum RetargetError {
    #[error("Joint {joint} is missing")]
    MissingJoint { joint: JointRef },

    #[error("Degenerate pose for bone {bone}: {source}")]
    Degenerate {
        bone: Bone,
        #[source]
        source: OrientError,
    },
}

/// Output record for one bone in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoneFrame {
    pub bone: Bone,
    pub frame: u32,
    /// Rotation relative to the parent bone.
    pub rotation: Quat,
    /// Only the center bone carries a translation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<Vec3>,
}

impl BoneFrame {
    pub fn rotation(bone: Bone, frame: u32, rotation: Quat) -> Self {
        Self {
            bone,
            frame,
            rotation,
            translation: None,
        }
    }
}

/// Orientations solved for one bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonePose {
    pub bone: Bone,
    /// Rotation relative to the parent's accumulated orientation.
    pub local: Quat,
    /// World orientation relative to the bind pose.
    pub adjusted: Quat,
}

/// Solved orientations of every catalog bone for one frame, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonPose {
    bones: [BonePose; BONE_COUNT],
}

impl SkeletonPose {
    pub fn get(&self, bone: Bone) -> Option<&BonePose> {
        catalog_index(bone).map(|i| &self.bones[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &BonePose> {
        self.bones.iter()
    }

    /// Product of the local rotations from the chain root down to `bone`.
    pub fn world(&self, bone: Bone) -> Option<Quat> {
        let index = catalog_index(bone)?;
        let parent = match CATALOG[index].parent {
            Some(parent) => self.world(parent)?,
            None => Quat::IDENTITY,
        };
        Some((parent * self.bones[index].local).normalize())
    }
}

fn point(joints: &JointPositions, joint: JointRef) -> Result<Vec3, RetargetError> {
    joints
        .resolve(joint)
        .ok_or(RetargetError::MissingJoint { joint })
}

fn segment_vector(joints: &JointPositions, segment: Segment) -> Result<Vec3, RetargetError> {
    Ok(point(joints, segment.to)? - point(joints, segment.from)?)
}

/// Solve a child's local rotation from its adjusted orientation and the
/// accumulated orientation of its ancestors.
fn local_rotation(ancestors: Quat, adjusted: Quat) -> Quat {
    (ancestors.inverse() * adjusted).normalize()
}

/// Solve every catalog bone for one joint set.
pub fn solve_pose(joints: &JointPositions) -> Result<SkeletonPose, RetargetError> {
    let identity = BonePose {
        bone: Bone::Center,
        local: Quat::IDENTITY,
        adjusted: Quat::IDENTITY,
    };
    let mut bones = [identity; BONE_COUNT];
    let mut accumulated = [Quat::IDENTITY; BONE_COUNT];

    for (i, def) in CATALOG.iter().enumerate() {
        let forward = segment_vector(joints, def.forward)?;
        let up = segment_vector(joints, def.up.0)?.cross(segment_vector(joints, def.up.1)?);
        let world = orient_from_axes(forward, up).map_err(|source| RetargetError::Degenerate {
            bone: def.bone,
            source,
        })?;
        let adjusted = (world * def.rest_orientation().inverse()).normalize();

        let ancestors = def
            .parent
            .and_then(catalog_index)
            .map(|p| accumulated[p])
            .unwrap_or(Quat::IDENTITY);
        let local = local_rotation(ancestors, adjusted);

        accumulated[i] = (ancestors * local).normalize();
        bones[i] = BonePose {
            bone: def.bone,
            local,
            adjusted,
        };
    }

    Ok(SkeletonPose { bones })
}

/// Bone frames of one source frame, in catalog order.
pub fn retarget_frame(frame: &Frame) -> Result<Vec<BoneFrame>, RetargetError> {
    let pose = solve_pose(&frame.joints)?;
    Ok(pose
        .iter()
        .map(|b| BoneFrame::rotation(b.bone, frame.index, b.local))
        .collect())
}
