//! Serialized capture records, exactly as the pose estimator writes them.

use serde::{Deserialize, Serialize};

/// Top-level capture document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRecord {
    /// Source video frame rate, when the estimator knew it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f32>,
    pub frames: Vec<FrameRecord>,
}

/// One estimated video frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame: u32,
    /// 33 world landmarks in estimator coordinates (y-down), or null when
    /// nobody was detected. Individual landmarks may be null.
    #[serde(default)]
    pub world_landmarks: Option<Vec<Option<[f32; 3]>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hips_2d: Option<HipsRecord>,
}

/// Normalized image-space hip landmarks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HipsRecord {
    pub left: [f32; 2],
    pub right: [f32; 2],
}
