//! Capture file loading functions

use crate::capture::record::{CaptureRecord, FrameRecord};
use crate::landmark::Landmark;
use crate::types::{Frame, HipLandmarks2d, JointPositions, Sequence, SequenceError};
use glam::{Vec2, Vec3};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Errors that can occur while reading a capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Capture parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Frame {frame} has {count} landmarks, expected 0 or {expected}", expected = Landmark::COUNT)]
    LandmarkCount { frame: u32, count: usize },

    #[error("Invalid frame order: {0}")]
    Sequence(#[from] SequenceError),
}

/// A loaded capture: the frame sequence plus source metadata.
#[derive(Debug, Clone)]
pub struct Capture {
    pub fps: Option<f32>,
    pub sequence: Sequence,
}

/// Load a capture from a JSON file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_capture(path: impl AsRef<Path>) -> Result<Capture, CaptureError> {
    debug!("Loading capture from: {}", path.as_ref().display());
    let file = File::open(path.as_ref())?;
    let record: CaptureRecord = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        warn!("Failed to parse capture file: {}", e);
        e
    })?;
    capture_from_record(record)
}

/// Parse a capture from an in-memory JSON document.
pub fn parse_capture(json: &str) -> Result<Capture, CaptureError> {
    let record: CaptureRecord = serde_json::from_str(json)?;
    capture_from_record(record)
}

fn capture_from_record(record: CaptureRecord) -> Result<Capture, CaptureError> {
    let frames = record
        .frames
        .into_iter()
        .map(frame_from_record)
        .collect::<Result<Vec<_>, _>>()?;

    let detected = frames.iter().filter(|f| !f.joints.is_empty()).count();
    info!(
        "Capture parsed: {} frames, {} with detections",
        frames.len(),
        detected
    );

    Ok(Capture {
        fps: record.fps,
        sequence: Sequence::new(frames)?,
    })
}

fn frame_from_record(record: FrameRecord) -> Result<Frame, CaptureError> {
    let mut joints = JointPositions::empty();

    if let Some(landmarks) = record.world_landmarks.as_deref() {
        match landmarks.len() {
            0 => {}
            Landmark::COUNT => {
                for (landmark, raw) in Landmark::ALL.iter().zip(landmarks) {
                    joints.set(*landmark, (*raw).and_then(to_skeleton_space));
                }
            }
            count => {
                return Err(CaptureError::LandmarkCount {
                    frame: record.frame,
                    count,
                });
            }
        }
    }

    let mut frame = Frame::new(record.frame, joints);
    if let Some(hips) = record.hips_2d {
        frame = frame.with_hips_2d(HipLandmarks2d::new(
            Vec2::from_array(hips.left),
            Vec2::from_array(hips.right),
        ));
    }

    dump_frame(&frame);
    Ok(frame)
}

/// Estimator world space is y-down; the skeleton is y-up.
/// Non-finite samples are treated as undetected.
fn to_skeleton_space([x, y, z]: [f32; 3]) -> Option<Vec3> {
    let p = Vec3::new(x, -y, z);
    p.is_finite().then_some(p)
}

fn dump_frame(frame: &Frame) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    trace!("frame {} ({} landmarks)", frame.index, frame.joints.present_count());
    for (landmark, p) in frame.joints.iter() {
        trace!(
            "{},{},{:.4},{:.4},{:.4}",
            landmark.index(),
            landmark,
            p.x,
            p.y,
            p.z
        );
    }
}
