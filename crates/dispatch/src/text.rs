//! UI-facing feedback strings. Kept in one place so the transient-message
//! clearing rule can compare against the exact idle texts.

pub const TRY_OTHER_GESTURE: &str = "Ready! Try another gesture";
pub const CAN_STOP_VIDEO: &str = "Show a peace sign to stop recording";
pub const BLOCKED_WHILE_RECORDING: &str = "Gestures are blocked while recording";
pub const FLASH_FRONT_CAMERA: &str = "Flash is not available on the front camera";

pub fn retry_in(secs: u64) -> String {
    format!("Next gesture in {secs}s")
}

pub fn video_stoppable_in(secs: u64) -> String {
    format!("Video can be stopped in {secs}s")
}

pub fn video_startable_in(secs: u64) -> String {
    format!("Video can be started in {secs}s")
}

pub fn flash_ready_in(secs: u64) -> String {
    format!("Flash ready in {secs}s")
}

pub fn switch_ready_in(secs: u64) -> String {
    format!("Camera switch ready in {secs}s")
}
