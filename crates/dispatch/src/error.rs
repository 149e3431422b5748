use gestures::domain::CameraAction;
use thiserror::Error;

/// Hard dispatch failures. Soft rejections (cooldowns, the front-camera
/// flash refusal) are `DispatchOutcome` variants, not errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("gestures are blocked while recording")]
    BlockedWhileRecording,
    #[error("recording must run for {remaining_secs}s more before it can stop")]
    MinRecordingDuration { remaining_secs: u64 },
    #[error("{action:?} failed: {message}")]
    ExecutorFailed {
        action: CameraAction,
        message: String,
    },
}
