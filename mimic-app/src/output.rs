//! JSON motion document written by the converter.

use mimic_retarget::{BoneFrame, IkVisibility, Motion};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct BoneFrameRecord {
    /// Rig bone name as the target model spells it.
    pub name: &'static str,
    pub bone: mimic_retarget::Bone,
    pub frame: u32,
    /// `[x, y, z, w]`
    pub rotation: [f32; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f32; 3]>,
}

impl From<&BoneFrame> for BoneFrameRecord {
    fn from(bf: &BoneFrame) -> Self {
        Self {
            name: bf.bone.motion_name(),
            bone: bf.bone,
            frame: bf.frame,
            rotation: bf.rotation.to_array(),
            translation: bf.translation.map(|t| t.to_array()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IkRecord {
    pub name: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct ShowIkRecord {
    pub frame: u32,
    pub show: bool,
    pub ik: Vec<IkRecord>,
}

impl From<&IkVisibility> for ShowIkRecord {
    fn from(vis: &IkVisibility) -> Self {
        Self {
            frame: vis.frame,
            show: vis.show,
            ik: vis
                .ik
                .iter()
                .map(|state| IkRecord {
                    name: state.bone.motion_name(),
                    enabled: state.enabled,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MotionDocument {
    pub bone_frames: Vec<BoneFrameRecord>,
    pub show_ik: ShowIkRecord,
}

impl From<&Motion> for MotionDocument {
    fn from(motion: &Motion) -> Self {
        Self {
            bone_frames: motion.bone_frames.iter().map(BoneFrameRecord::from).collect(),
            show_ik: ShowIkRecord::from(&motion.show_ik),
        }
    }
}

pub fn write_motion(motion: &Motion, path: &Path) -> Result<(), crate::AppError> {
    let document = MotionDocument::from(motion);
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    info!(
        "Wrote {} bone frames to {}",
        document.bone_frames.len(),
        path.display()
    );
    Ok(())
}
