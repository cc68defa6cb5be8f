//! Landmark vocabulary of the upstream pose estimator.
//!
//! The estimator reports 33 joints per detected body, always in the same
//! ordinal order. Every lookup in the pipeline goes through [`Landmark`]
//! rather than a raw index.

/// The 33 tracked joints, in estimator output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum Landmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl Landmark {
    pub const COUNT: usize = 33;

    /// Every landmark in ordinal order.
    pub const ALL: [Landmark; Landmark::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    const NAMES: [&'static str; Landmark::COUNT] = [
        "nose",
        "left_eye_inner",
        "left_eye",
        "left_eye_outer",
        "right_eye_inner",
        "right_eye",
        "right_eye_outer",
        "left_ear",
        "right_ear",
        "mouth_left",
        "mouth_right",
        "left_shoulder",
        "right_shoulder",
        "left_elbow",
        "right_elbow",
        "left_wrist",
        "right_wrist",
        "left_pinky",
        "right_pinky",
        "left_index",
        "right_index",
        "left_thumb",
        "right_thumb",
        "left_hip",
        "right_hip",
        "left_knee",
        "right_knee",
        "left_ankle",
        "right_ankle",
        "left_heel",
        "right_heel",
        "left_foot_index",
        "right_foot_index",
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Estimator name of the landmark, e.g. `left_shoulder`.
    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .and_then(Self::from_index)
    }
}

impl std::fmt::Display for Landmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A joint that is never measured, only derived as the midpoint of two landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntheticJoint {
    /// Base of the neck, between the shoulders.
    Neck,
    /// Center of the pelvis, between the hips.
    Waist,
    /// Center of the head, between the ears.
    HeadCenter,
}

impl SyntheticJoint {
    /// The two landmarks whose midpoint defines this joint.
    pub fn sources(self) -> (Landmark, Landmark) {
        match self {
            Self::Neck => (Landmark::LeftShoulder, Landmark::RightShoulder),
            Self::Waist => (Landmark::LeftHip, Landmark::RightHip),
            Self::HeadCenter => (Landmark::LeftEar, Landmark::RightEar),
        }
    }
}

/// Reference to a point of the body, measured or synthetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointRef {
    Landmark(Landmark),
    Synthetic(SyntheticJoint),
}

impl std::fmt::Display for JointRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JointRef::Landmark(landmark) => f.write_str(landmark.name()),
            JointRef::Synthetic(SyntheticJoint::Neck) => f.write_str("neck"),
            JointRef::Synthetic(SyntheticJoint::Waist) => f.write_str("waist"),
            JointRef::Synthetic(SyntheticJoint::HeadCenter) => f.write_str("head_center"),
        }
    }
}

impl From<Landmark> for JointRef {
    fn from(landmark: Landmark) -> Self {
        JointRef::Landmark(landmark)
    }
}

impl From<SyntheticJoint> for JointRef {
    fn from(joint: SyntheticJoint) -> Self {
        JointRef::Synthetic(joint)
    }
}
