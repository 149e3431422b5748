use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of recognizable hand shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    #[default]
    None,
    OpenPalm,
    PeaceSign,
    ThumbsUp,
    OkSign,
    PinchZoomIn,
    PinchZoomOut,
    ThreeFingersUp,
}

/// Commands the dispatcher can hand to the camera executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraAction {
    CapturePhoto,
    StartVideoRecording,
    StopVideoRecording,
    SwitchCamera,
    OpenGallery,
    ZoomIn,
    ZoomOut,
    ToggleFlash,
}

/// Outcome reported by the external camera executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub action: CameraAction,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl ActionResult {
    pub fn ok(action: CameraAction, message: impl Into<String>) -> Self {
        Self {
            action,
            success: true,
            message: message.into(),
            payload: None,
        }
    }

    pub fn failed(action: CameraAction, message: impl Into<String>) -> Self {
        Self {
            action,
            success: false,
            message: message.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// One classification result per processed frame, NONE included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureObservation {
    pub label: GestureLabel,
    pub confidence: f32,
    pub observed_at: DateTime<Utc>,
}

impl GestureObservation {
    pub fn new(label: GestureLabel, confidence: f32) -> Self {
        Self {
            label,
            confidence,
            observed_at: Utc::now(),
        }
    }

    pub fn none() -> Self {
        Self::new(GestureLabel::None, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraFacing {
    #[default]
    Front,
    Back,
}

/// Snapshot of the camera hardware state, published by the executor side
/// through a single-writer watch channel and read by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub recording: bool,
    pub facing: CameraFacing,
    pub zoom_ratio: f32,
    pub flash_enabled: bool,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            recording: false,
            facing: CameraFacing::Front,
            zoom_ratio: 1.0,
            flash_enabled: false,
        }
    }
}
