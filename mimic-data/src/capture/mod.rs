//! Capture file loading and parsing

mod loader;
mod record;

pub use loader::{Capture, CaptureError, load_capture, parse_capture};
pub use record::{CaptureRecord, FrameRecord, HipsRecord};
