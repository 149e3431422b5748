use anyhow::{bail, Result};
use gestures::landmarks::LandmarkSet;
use serde::{Deserialize, Serialize};

/// Frame metadata handed to the detector. Pixel data stays with the camera
/// layer; the mirrored flag is carried through for upstream image
/// transforms and does not affect landmark geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFrame {
    pub seq: u64,
    pub width: u32,
    pub height: u32,
    pub mirrored: bool,
}

/// Opaque landmark model boundary: zero or more hands per frame, first one
/// wins downstream.
pub trait LandmarkDetector: Send + Sync {
    fn detect(&self, frame: &VideoFrame) -> Result<Vec<LandmarkSet>>;
}

/// Placeholder wiring for builds without a detection model.
pub struct MissingLandmarkDetector;

impl LandmarkDetector for MissingLandmarkDetector {
    fn detect(&self, frame: &VideoFrame) -> Result<Vec<LandmarkSet>> {
        bail!("landmark model unavailable for frame {}", frame.seq)
    }
}
