//! Mimic Application
//!
//! Converts a capture file of detected 3D joint positions into a JSON motion
//! document for a humanoid rig.

mod output;

use clap::Parser;
use mimic_data::{CaptureError, load_capture};
use mimic_retarget::{LowpassConfig, PipelineConfig, PipelineError, run};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Sample rate assumed when neither the capture nor the command line gives one.
const FALLBACK_FPS: f32 = 30.0;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to load capture: {0}")]
    Capture(#[from] CaptureError),

    #[error("Pipeline failed: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Mimic - pose capture to rig motion converter
#[derive(Parser, Debug)]
#[command(name = "mimic")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Capture JSON produced by the pose estimator
    capture: PathBuf,

    /// Motion JSON to write
    output: PathBuf,

    /// Translate the center bone from the 2D hip landmarks
    #[arg(long)]
    center: bool,

    /// Reference neck-to-waist length in model units
    #[arg(long, default_value_t = mimic_retarget::config::DEFAULT_SPINE_LENGTH)]
    spine_length: f32,

    /// Enable low-pass smoothing with this cutoff frequency
    #[arg(long)]
    lowpass_cutoff: Option<f32>,

    /// Capture frame rate, overriding the one stored in the capture
    #[arg(long)]
    fps: Option<f32>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn pipeline_config(&self, capture_fps: Option<f32>) -> PipelineConfig {
        let mut config = PipelineConfig::new()
            .with_center(self.center)
            .with_spine_length(self.spine_length);
        if let Some(cutoff_hz) = self.lowpass_cutoff {
            let sample_rate_hz = self.fps.or(capture_fps).unwrap_or(FALLBACK_FPS);
            config = config.with_lowpass(LowpassConfig {
                cutoff_hz,
                sample_rate_hz,
            });
        }
        config
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .init();
}

fn convert(args: &Args) -> Result<(), AppError> {
    let capture = load_capture(&args.capture)?;
    info!(
        "Loaded {} frames from {}",
        capture.sequence.len(),
        args.capture.display()
    );

    let config = args.pipeline_config(capture.fps);
    let motion = run(&capture.sequence, &config)?;
    if !motion.skipped.is_empty() {
        warn!("{} frames produced no motion", motion.skipped.len());
    }

    output::write_motion(&motion, &args.output)
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(e) = convert(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["mimic", "in.json", "out.json"]).unwrap();
        assert!(!args.center);
        assert_eq!(args.spine_length, 3.2);
        assert_eq!(args.log_level, "info");
        assert_eq!(args.pipeline_config(Some(60.0)), PipelineConfig::default());
    }

    #[test]
    fn test_lowpass_rate_prefers_flag_then_capture() {
        let args = Args::try_parse_from([
            "mimic",
            "in.json",
            "out.json",
            "--center",
            "--lowpass-cutoff",
            "4",
        ])
        .unwrap();
        let config = args.pipeline_config(Some(60.0));
        assert!(config.motion.center_enabled);
        assert_eq!(
            config.refine.lowpass,
            Some(LowpassConfig {
                cutoff_hz: 4.0,
                sample_rate_hz: 60.0
            })
        );
        assert_eq!(
            args.pipeline_config(None).refine.lowpass.map(|l| l.sample_rate_hz),
            Some(FALLBACK_FPS)
        );

        let args = Args::try_parse_from([
            "mimic",
            "in.json",
            "out.json",
            "--lowpass-cutoff",
            "4",
            "--fps",
            "24",
        ])
        .unwrap();
        assert_eq!(
            args.pipeline_config(Some(60.0)).refine.lowpass.map(|l| l.sample_rate_hz),
            Some(24.0)
        );
    }

    fn estimator_landmarks() -> serde_json::Value {
        use mimic_data::Landmark;
        let points: Vec<[f32; 3]> = Landmark::ALL
            .iter()
            .map(|landmark| match landmark {
                Landmark::Nose => [0.0, -1.2, -0.1],
                Landmark::LeftEar => [0.1, -1.3, 0.0],
                Landmark::RightEar => [-0.1, -1.3, 0.0],
                Landmark::LeftShoulder => [0.2, -1.0, 0.0],
                Landmark::RightShoulder => [-0.2, -1.0, 0.0],
                Landmark::LeftElbow => [0.4, -0.8, 0.0],
                Landmark::RightElbow => [-0.4, -0.8, 0.0],
                Landmark::LeftWrist => [0.4, -0.8, -0.2],
                Landmark::RightWrist => [-0.4, -0.8, -0.2],
                Landmark::LeftHip => [0.1, 0.0, 0.0],
                Landmark::RightHip => [-0.1, 0.0, 0.0],
                Landmark::LeftKnee => [0.1, 0.4, 0.0],
                Landmark::RightKnee => [-0.1, 0.4, 0.0],
                Landmark::LeftAnkle => [0.1, 0.4, 0.4],
                Landmark::RightAnkle => [-0.1, 0.4, 0.4],
                _ => [0.0, -0.5, 0.0],
            })
            .collect();
        serde_json::json!(points)
    }

    #[test]
    fn test_convert_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let capture_path = dir.path().join("capture.json");
        let output_path = dir.path().join("motion.json");
        let hips = serde_json::json!({ "left": [0.45, 0.5], "right": [0.55, 0.5] });
        let capture = serde_json::json!({
            "fps": 30.0,
            "frames": [
                { "frame": 0, "world_landmarks": estimator_landmarks(), "hips_2d": hips },
                { "frame": 1, "world_landmarks": null, "hips_2d": hips },
                { "frame": 2, "world_landmarks": estimator_landmarks(), "hips_2d": hips },
            ]
        });
        std::fs::write(&capture_path, capture.to_string()).unwrap();

        let args = Args::try_parse_from([
            "mimic".into(),
            capture_path.into_os_string(),
            output_path.clone().into_os_string(),
            "--center".into(),
        ])
        .unwrap();
        convert(&args).unwrap();

        let text = std::fs::read_to_string(&output_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        // 11 driven bones plus the center, for every frame after gap filling
        assert_eq!(value["bone_frames"].as_array().unwrap().len(), 3 * 12);
        assert_eq!(value["show_ik"]["ik"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_zero_spine_length_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let capture_path = dir.path().join("capture.json");
        let output_path = dir.path().join("motion.json");
        let frames: Vec<serde_json::Value> = (0..3)
            .map(|i| serde_json::json!({ "frame": i, "world_landmarks": estimator_landmarks() }))
            .collect();
        std::fs::write(&capture_path, serde_json::json!({ "frames": frames }).to_string()).unwrap();

        let args = Args::try_parse_from([
            "mimic".into(),
            capture_path.into_os_string(),
            output_path.clone().into_os_string(),
            "--spine-length".into(),
            "0".into(),
        ])
        .unwrap();
        assert!(matches!(convert(&args), Err(AppError::Pipeline(_))));
        assert!(!output_path.exists());
    }

    #[test]
    fn test_missing_capture_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args::try_parse_from([
            "mimic".into(),
            dir.path().join("absent.json"),
            dir.path().join("out.json"),
        ])
        .unwrap();
        assert!(matches!(convert(&args), Err(AppError::Capture(_))));
        assert!(!dir.path().join("out.json").exists());
    }
}
