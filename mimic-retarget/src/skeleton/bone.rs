//! Bone names of the target skeleton.

use serde::Serialize;

/// Bones written to the motion output.
///
/// All variants except [`Bone::Center`] are driven by the catalog; `Center`
/// only carries a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bone {
    UpperBody,
    LowerBody,
    Head,
    LeftArm,
    LeftElbow,
    RightArm,
    RightElbow,
    LeftLeg,
    LeftKnee,
    RightLeg,
    RightKnee,
    Center,
}

impl Bone {
    /// Bone name as the target skeleton spells it.
    pub fn motion_name(self) -> &'static str {
        match self {
            Self::UpperBody => "上半身",
            Self::LowerBody => "下半身",
            Self::Head => "頭",
            Self::LeftArm => "左腕",
            Self::LeftElbow => "左ひじ",
            Self::RightArm => "右腕",
            Self::RightElbow => "右ひじ",
            Self::LeftLeg => "左足",
            Self::LeftKnee => "左ひざ",
            Self::RightLeg => "右足",
            Self::RightKnee => "右ひざ",
            Self::Center => "センター",
        }
    }
}

impl std::fmt::Display for Bone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.motion_name())
    }
}

/// IK controller bones of the target skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IkBone {
    LeftFootIk,
    RightFootIk,
    LeftToeIk,
    RightToeIk,
}

impl IkBone {
    pub const ALL: [IkBone; 4] = [
        Self::LeftFootIk,
        Self::RightFootIk,
        Self::LeftToeIk,
        Self::RightToeIk,
    ];

    pub fn motion_name(self) -> &'static str {
        match self {
            Self::LeftFootIk => "左足ＩＫ",
            Self::RightFootIk => "右足ＩＫ",
            Self::LeftToeIk => "左つま先ＩＫ",
            Self::RightToeIk => "右つま先ＩＫ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_names_are_unique() {
        let bones = [
            Bone::UpperBody,
            Bone::LowerBody,
            Bone::Head,
            Bone::LeftArm,
            Bone::LeftElbow,
            Bone::RightArm,
            Bone::RightElbow,
            Bone::LeftLeg,
            Bone::LeftKnee,
            Bone::RightLeg,
            Bone::RightKnee,
            Bone::Center,
        ];
        let mut names: Vec<&str> = bones.iter().map(|b| b.motion_name()).collect();
        names.extend(IkBone::ALL.iter().map(|b| b.motion_name()));
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_serialized_id() {
        assert_eq!(
            serde_json::to_string(&Bone::LeftElbow).unwrap(),
            "\"left_elbow\""
        );
        assert_eq!(
            serde_json::to_string(&IkBone::RightToeIk).unwrap(),
            "\"right_toe_ik\""
        );
    }
}
