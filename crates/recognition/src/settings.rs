use serde::{Deserialize, Serialize};

/// Recognizer tunables. Defaults match the shipped constants; the simulator
/// can override them from its settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerSettings {
    /// Classifications below this confidence degrade to NONE.
    pub min_confidence: f32,
    /// Consecutive identical classifications required before emission.
    pub stability_frames: usize,
    /// Minimum gap between two emitted classifications.
    pub gesture_cooldown_ms: u64,
    /// Whether the sampler gate may drop frames under load.
    pub adaptive_processing: bool,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            min_confidence: 0.2,
            stability_frames: 1,
            gesture_cooldown_ms: 100,
            adaptive_processing: true,
        }
    }
}
