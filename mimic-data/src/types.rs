//! Core pose data types.
//!
//! A [`Sequence`] is the whole capture: one [`Frame`] per source video frame,
//! each holding the joints detected in that frame. Positions are world-space
//! and y-up once they reach this crate.

use crate::landmark::{JointRef, Landmark};
use glam::{Vec2, Vec3};
use thiserror::Error;

/// Errors raised while assembling a sequence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Frame {current} follows frame {previous}; frame indices must strictly increase")]
    OutOfOrder { previous: u32, current: u32 },
}

/// Joint positions of one frame, keyed by [`Landmark`].
///
/// Absent entries mean the joint was not detected (or could not be resolved).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointPositions {
    positions: [Option<Vec3>; Landmark::COUNT],
}

impl JointPositions {
    /// A joint set with nothing detected.
    pub fn empty() -> Self {
        Self {
            positions: [None; Landmark::COUNT],
        }
    }

    /// Build a complete joint set from positions in ordinal order.
    pub fn from_array(positions: [Vec3; Landmark::COUNT]) -> Self {
        Self {
            positions: positions.map(Some),
        }
    }

    /// Build a complete joint set by evaluating `f` for every landmark.
    pub fn from_fn(mut f: impl FnMut(Landmark) -> Vec3) -> Self {
        Self {
            positions: Landmark::ALL.map(|landmark| Some(f(landmark))),
        }
    }

    pub fn get(&self, landmark: Landmark) -> Option<Vec3> {
        self.positions[landmark.index()]
    }

    pub fn set(&mut self, landmark: Landmark, position: Option<Vec3>) {
        self.positions[landmark.index()] = position;
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, landmark: Landmark, position: Vec3) -> Self {
        self.set(landmark, Some(position));
        self
    }

    /// Resolve a measured or synthetic joint.
    ///
    /// Synthetic joints need both of their source landmarks.
    pub fn resolve(&self, joint: JointRef) -> Option<Vec3> {
        match joint {
            JointRef::Landmark(landmark) => self.get(landmark),
            JointRef::Synthetic(synthetic) => {
                let (a, b) = synthetic.sources();
                Some((self.get(a)? + self.get(b)?) * 0.5)
            }
        }
    }

    /// True when all 33 landmarks are present.
    pub fn is_complete(&self) -> bool {
        self.positions.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.iter().all(Option::is_none)
    }

    pub fn present_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    /// Iterate over the landmarks that are present.
    pub fn iter(&self) -> impl Iterator<Item = (Landmark, Vec3)> + '_ {
        Landmark::ALL
            .iter()
            .filter_map(|&landmark| self.get(landmark).map(|p| (landmark, p)))
    }

    /// Copy of this joint set with every present position multiplied by `scale`.
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            positions: self.positions.map(|p| p.map(|v| v * scale)),
        }
    }
}

impl Default for JointPositions {
    fn default() -> Self {
        Self::empty()
    }
}

/// 2D hip landmarks in normalized image coordinates (0-1, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HipLandmarks2d {
    pub left: Vec2,
    pub right: Vec2,
}

impl HipLandmarks2d {
    pub fn new(left: Vec2, right: Vec2) -> Self {
        Self { left, right }
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.left + self.right) * 0.5
    }
}

/// One source video frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// 0-based video frame number.
    pub index: u32,
    pub joints: JointPositions,
    pub hips_2d: Option<HipLandmarks2d>,
}

impl Frame {
    pub fn new(index: u32, joints: JointPositions) -> Self {
        Self {
            index,
            joints,
            hips_2d: None,
        }
    }

    /// A frame in which the estimator detected nobody.
    pub fn empty(index: u32) -> Self {
        Self::new(index, JointPositions::empty())
    }

    pub fn with_hips_2d(mut self, hips: HipLandmarks2d) -> Self {
        self.hips_2d = Some(hips);
        self
    }
}

/// Ordered frames of a capture. Frame indices strictly increase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    frames: Vec<Frame>,
}

impl Sequence {
    pub fn new(frames: Vec<Frame>) -> Result<Self, SequenceError> {
        for pair in frames.windows(2) {
            if pair[1].index <= pair[0].index {
                return Err(SequenceError::OutOfOrder {
                    previous: pair[0].index,
                    current: pair[1].index,
                });
            }
        }
        Ok(Self { frames })
    }

    /// Build a sequence from one optional detection per video frame, numbering
    /// frames from zero. `None` becomes an empty frame.
    pub fn from_detections(detections: impl IntoIterator<Item = Option<JointPositions>>) -> Self {
        let frames = detections
            .into_iter()
            .zip(0u32..)
            .map(|(joints, index)| Frame::new(index, joints.unwrap_or_default()))
            .collect();
        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// New sequence with the same frame indices and 2D hips but joint sets
    /// produced by `f`. Ordering is preserved.
    pub fn map_joints(&self, mut f: impl FnMut(usize, &Frame) -> JointPositions) -> Self {
        let frames = self
            .frames
            .iter()
            .enumerate()
            .map(|(i, frame)| Frame {
                index: frame.index,
                joints: f(i, frame),
                hips_2d: frame.hips_2d,
            })
            .collect();
        Self { frames }
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::SyntheticJoint;

    #[test]
    fn test_empty_joint_positions() {
        let joints = JointPositions::empty();
        assert!(joints.is_empty());
        assert!(!joints.is_complete());
        assert_eq!(joints.present_count(), 0);
    }

    #[test]
    fn test_complete_joint_positions() {
        let joints = JointPositions::from_fn(|l| Vec3::splat(l.index() as f32));
        assert!(joints.is_complete());
        assert_eq!(joints.present_count(), Landmark::COUNT);
        assert_eq!(joints.get(Landmark::LeftHip), Some(Vec3::splat(23.0)));
    }

    #[test]
    fn test_resolve_synthetic_midpoint() {
        let joints = JointPositions::empty()
            .with(Landmark::LeftShoulder, Vec3::new(1.0, 2.0, 0.0))
            .with(Landmark::RightShoulder, Vec3::new(-1.0, 2.0, 0.0));
        assert_eq!(
            joints.resolve(SyntheticJoint::Neck.into()),
            Some(Vec3::new(0.0, 2.0, 0.0))
        );
        // Only one hip present: waist cannot be resolved
        let joints = joints.with(Landmark::LeftHip, Vec3::ZERO);
        assert_eq!(joints.resolve(SyntheticJoint::Waist.into()), None);
    }

    #[test]
    fn test_scaled_keeps_absent_joints() {
        let joints = JointPositions::empty().with(Landmark::Nose, Vec3::new(1.0, -2.0, 3.0));
        let scaled = joints.scaled(2.0);
        assert_eq!(scaled.get(Landmark::Nose), Some(Vec3::new(2.0, -4.0, 6.0)));
        assert_eq!(scaled.get(Landmark::LeftEar), None);
    }

    #[test]
    fn test_hip_midpoint() {
        let hips = HipLandmarks2d::new(Vec2::new(0.4, 0.6), Vec2::new(0.6, 0.8));
        assert!((hips.midpoint() - Vec2::new(0.5, 0.7)).length() < 1e-6);
    }

    #[test]
    fn test_sequence_rejects_out_of_order() {
        let frames = vec![Frame::empty(0), Frame::empty(2), Frame::empty(1)];
        assert_eq!(
            Sequence::new(frames),
            Err(SequenceError::OutOfOrder {
                previous: 2,
                current: 1
            })
        );
    }

    #[test]
    fn test_sequence_rejects_duplicate_index() {
        let frames = vec![Frame::empty(3), Frame::empty(3)];
        assert!(Sequence::new(frames).is_err());
    }

    #[test]
    fn test_from_detections_numbers_frames() {
        let seq = Sequence::from_detections(vec![
            None,
            Some(JointPositions::empty().with(Landmark::Nose, Vec3::ONE)),
            None,
        ]);
        let indices: Vec<u32> = seq.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(seq.frames()[0].joints.is_empty());
        assert_eq!(seq.frames()[1].joints.present_count(), 1);
    }

    #[test]
    fn test_map_joints_preserves_indices_and_hips() {
        let hips = HipLandmarks2d::new(Vec2::ZERO, Vec2::ONE);
        let seq = Sequence::new(vec![Frame::empty(4).with_hips_2d(hips), Frame::empty(9)]).unwrap();
        let mapped = seq.map_joints(|_, _| JointPositions::empty().with(Landmark::Nose, Vec3::X));
        assert_eq!(mapped.frames()[0].index, 4);
        assert_eq!(mapped.frames()[1].index, 9);
        assert_eq!(mapped.frames()[0].hips_2d, Some(hips));
        assert_eq!(mapped.frames()[1].joints.get(Landmark::Nose), Some(Vec3::X));
    }
}
