//! Data-driven bone catalog.
//!
//! Each entry says which joints define the bone's forward direction, which
//! pair of segments disambiguates its roll (`up = a × b`), which bone it hangs
//! from, and the forward/up axes of its bind pose.

use crate::orient::orient_from_axes;
use crate::skeleton::Bone;
use glam::{Quat, Vec3};
use mimic_data::{JointRef, Landmark, SyntheticJoint};
use std::sync::LazyLock;

/// Directed segment between two body points: `to - from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: JointRef,
    pub to: JointRef,
}

impl Segment {
    pub const fn new(from: JointRef, to: JointRef) -> Self {
        Self { from, to }
    }
}

/// One bone of the retargeting hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneDef {
    pub bone: Bone,
    /// `None` for the two torso roots.
    pub parent: Option<Bone>,
    pub forward: Segment,
    /// Up vector is `up.0 × up.1`.
    pub up: (Segment, Segment),
    pub rest_forward: Vec3,
    pub rest_up: Vec3,
}

impl BoneDef {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Bind-pose orientation of this bone.
    pub fn rest_orientation(&self) -> Quat {
        rest_orientation(self.bone)
    }
}

const fn lm(landmark: Landmark) -> JointRef {
    JointRef::Landmark(landmark)
}

const NECK: JointRef = JointRef::Synthetic(SyntheticJoint::Neck);
const WAIST: JointRef = JointRef::Synthetic(SyntheticJoint::Waist);
const HEAD_CENTER: JointRef = JointRef::Synthetic(SyntheticJoint::HeadCenter);

const fn seg(from: JointRef, to: JointRef) -> Segment {
    Segment::new(from, to)
}

/// Two-link limb `a -> b -> c`: both links share the up vector `(b-a) × (c-b)`.
const fn limb(
    proximal: Bone,
    distal: Bone,
    parent: Bone,
    joints: [Landmark; 3],
    rest_forward: Vec3,
    rest_up: Vec3,
) -> [BoneDef; 2] {
    let upper = seg(lm(joints[0]), lm(joints[1]));
    let lower = seg(lm(joints[1]), lm(joints[2]));
    [
        BoneDef {
            bone: proximal,
            parent: Some(parent),
            forward: upper,
            up: (upper, lower),
            rest_forward,
            rest_up,
        },
        BoneDef {
            bone: distal,
            parent: Some(proximal),
            forward: lower,
            up: (upper, lower),
            rest_forward,
            rest_up,
        },
    ]
}

const LEFT_ARM: [BoneDef; 2] = limb(
    Bone::LeftArm,
    Bone::LeftElbow,
    Bone::UpperBody,
    [Landmark::LeftShoulder, Landmark::LeftElbow, Landmark::LeftWrist],
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
);

const RIGHT_ARM: [BoneDef; 2] = limb(
    Bone::RightArm,
    Bone::RightElbow,
    Bone::UpperBody,
    [Landmark::RightShoulder, Landmark::RightElbow, Landmark::RightWrist],
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
);

const LEFT_LEG: [BoneDef; 2] = limb(
    Bone::LeftLeg,
    Bone::LeftKnee,
    Bone::LowerBody,
    [Landmark::LeftHip, Landmark::LeftKnee, Landmark::LeftAnkle],
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
);

const RIGHT_LEG: [BoneDef; 2] = limb(
    Bone::RightLeg,
    Bone::RightKnee,
    Bone::LowerBody,
    [Landmark::RightHip, Landmark::RightKnee, Landmark::RightAnkle],
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
);

/// Number of bones driven by the catalog.
pub const BONE_COUNT: usize = 11;

/// Every driven bone, parents before children.
pub const CATALOG: [BoneDef; BONE_COUNT] = [
    BoneDef {
        bone: Bone::UpperBody,
        parent: None,
        forward: seg(WAIST, NECK),
        up: (
            seg(WAIST, NECK),
            seg(lm(Landmark::LeftShoulder), lm(Landmark::RightShoulder)),
        ),
        rest_forward: Vec3::new(0.0, 1.0, 0.0),
        rest_up: Vec3::new(0.0, 0.0, 1.0),
    },
    BoneDef {
        bone: Bone::LowerBody,
        parent: None,
        forward: seg(NECK, WAIST),
        up: (
            seg(NECK, WAIST),
            seg(lm(Landmark::RightHip), lm(Landmark::LeftHip)),
        ),
        rest_forward: Vec3::new(0.0, -1.0, 0.0),
        rest_up: Vec3::new(0.0, 0.0, 1.0),
    },
    // The neck is not animated; the head turns directly under the upper body.
    BoneDef {
        bone: Bone::Head,
        parent: Some(Bone::UpperBody),
        forward: seg(NECK, HEAD_CENTER),
        up: (
            seg(NECK, lm(Landmark::Nose)),
            seg(lm(Landmark::Nose), HEAD_CENTER),
        ),
        rest_forward: Vec3::new(0.0, 1.0, 0.0),
        rest_up: Vec3::new(1.0, 0.0, 0.0),
    },
    LEFT_ARM[0],
    LEFT_ARM[1],
    RIGHT_ARM[0],
    RIGHT_ARM[1],
    LEFT_LEG[0],
    LEFT_LEG[1],
    RIGHT_LEG[0],
    RIGHT_LEG[1],
];

static REST_ORIENTATIONS: LazyLock<[Quat; BONE_COUNT]> = LazyLock::new(|| {
    CATALOG.map(|def| orient_from_axes(def.rest_forward, def.rest_up).expect("rest axes"))
});

/// Position of `bone` in [`CATALOG`], `None` for bones the catalog does not drive.
pub fn catalog_index(bone: Bone) -> Option<usize> {
    CATALOG.iter().position(|def| def.bone == bone)
}

/// Bind-pose orientation of a driven bone; identity for [`Bone::Center`].
pub fn rest_orientation(bone: Bone) -> Quat {
    catalog_index(bone)
        .map(|i| REST_ORIENTATIONS[i])
        .unwrap_or(Quat::IDENTITY)
}
