//! Pipeline configuration.

/// Target neck-to-waist length of the skeleton, in model units.
pub const DEFAULT_SPINE_LENGTH: f32 = 3.2;

/// Sequences shorter than this skip gap filling and smoothing.
pub const DEFAULT_MIN_SEQUENCE_LEN: usize = 3;

/// Screen-to-scene scale applied to the 2D hip offset of the center bone.
pub const CENTER_SCALE: f32 = 22.5;

/// Zero-phase low-pass filter applied to every joint channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowpassConfig {
    pub cutoff_hz: f32,
    pub sample_rate_hz: f32,
}

impl Default for LowpassConfig {
    fn default() -> Self {
        Self {
            cutoff_hz: 5.0,
            sample_rate_hz: 30.0,
        }
    }
}

/// Configuration of the temporal refinement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefineConfig {
    /// Average spine length the whole capture is scaled to.
    pub spine_length: f32,
    pub min_sequence_len: usize,
    /// Disabled by default.
    pub lowpass: Option<LowpassConfig>,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            spine_length: DEFAULT_SPINE_LENGTH,
            min_sequence_len: DEFAULT_MIN_SEQUENCE_LEN,
            lowpass: None,
        }
    }
}

/// Configuration of motion assembly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionConfig {
    /// Emit a translated center bone from the 2D hip landmarks.
    pub center_enabled: bool,
}

/// Configuration for a full pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PipelineConfig {
    pub refine: RefineConfig,
    pub motion: MotionConfig,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable center-bone translation.
    pub fn with_center(mut self, enabled: bool) -> Self {
        self.motion.center_enabled = enabled;
        self
    }

    /// Set the reference spine length used for scale normalization.
    pub fn with_spine_length(mut self, spine_length: f32) -> Self {
        self.refine.spine_length = spine_length;
        self
    }

    /// Enable low-pass smoothing of joint channels.
    pub fn with_lowpass(mut self, lowpass: LowpassConfig) -> Self {
        self.refine.lowpass = Some(lowpass);
        self
    }
}
