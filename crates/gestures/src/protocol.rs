use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UI-facing status line: shown or cleared, error-styled or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    pub text: String,
    pub visible: bool,
    pub is_error: bool,
    pub emitted_at: DateTime<Utc>,
}

impl FeedbackMessage {
    pub fn shown(text: impl Into<String>, is_error: bool) -> Self {
        Self {
            text: text.into(),
            visible: true,
            is_error,
            emitted_at: Utc::now(),
        }
    }

    pub fn cleared() -> Self {
        Self {
            text: String::new(),
            visible: false,
            is_error: false,
            emitted_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceStatus {
    #[default]
    Optimal,
    Good,
    Acceptable,
    Poor,
}

/// Read-only snapshot of the frame-rate governor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceStats {
    pub current_fps: f64,
    pub average_fps: f64,
    pub status: PerformanceStatus,
    pub frame_skip_interval: u32,
    pub total_frames_processed: u64,
    pub total_frames_skipped: u64,
    pub skip_rate_percent: f64,
    pub uptime_seconds: f64,
}
