//! Target skeleton: bone vocabulary and the retargeting catalog.

pub mod bone;
pub mod catalog;

pub use bone::{Bone, IkBone};
pub use catalog::{BONE_COUNT, BoneDef, CATALOG, Segment, catalog_index, rest_orientation};
