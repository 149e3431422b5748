use gestures::domain::CameraAction;
use serde::{Deserialize, Serialize};

pub const UNIVERSAL_COOLDOWN_MS: u64 = 3000;
pub const VIDEO_START_COOLDOWN_MS: u64 = 1000;
pub const VIDEO_STOP_COOLDOWN_MS: u64 = 2000;
pub const FLASH_TOGGLE_COOLDOWN_MS: u64 = 2000;
pub const CAMERA_SWITCH_COOLDOWN_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownKind {
    Universal,
    VideoStart,
    VideoStop,
    FlashToggle,
    CameraSwitch,
}

/// Last-fired timestamps in clock milliseconds; `None` means never fired.
/// Single-writer: only the dispatcher mutates it, and only after the
/// executor confirms success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooldownState {
    pub last_gesture: Option<u64>,
    pub last_video_start: Option<u64>,
    pub last_video_stop: Option<u64>,
    pub last_flash_toggle: Option<u64>,
    pub last_camera_switch: Option<u64>,
}

impl CooldownState {
    pub fn record_success(&mut self, action: CameraAction, now: u64) {
        self.last_gesture = Some(now);
        match action {
            CameraAction::StartVideoRecording => self.last_video_start = Some(now),
            CameraAction::StopVideoRecording => self.last_video_stop = Some(now),
            CameraAction::ToggleFlash => self.last_flash_toggle = Some(now),
            CameraAction::SwitchCamera => self.last_camera_switch = Some(now),
            _ => {}
        }
    }
}

/// Whole seconds left in the window, or `None` once it has elapsed or was
/// never started.
pub fn remaining_secs(last: Option<u64>, window_ms: u64, now: u64) -> Option<u64> {
    let last = last?;
    let elapsed = now.saturating_sub(last);
    if elapsed < window_ms {
        Some((window_ms - elapsed) / 1000)
    } else {
        None
    }
}
