use std::{sync::Arc, time::Duration};

use gestures::{
    clock::Clock,
    domain::{ActionResult, CameraAction, CameraFacing, CameraState, GestureLabel, GestureObservation},
    protocol::FeedbackMessage,
};
use serde::{Deserialize, Serialize};
use tokio::{
    sync::{broadcast, watch, Mutex},
    task::JoinHandle,
    time::sleep,
};
use tracing::{debug, info, warn};

use crate::{
    cooldown::{
        remaining_secs, CooldownKind, CooldownState, CAMERA_SWITCH_COOLDOWN_MS,
        FLASH_TOGGLE_COOLDOWN_MS, UNIVERSAL_COOLDOWN_MS, VIDEO_START_COOLDOWN_MS,
        VIDEO_STOP_COOLDOWN_MS,
    },
    error::DispatchError,
    executor::CameraExecutor,
    text,
};

const FEEDBACK_CHANNEL_CAPACITY: usize = 64;

/// Successful dispatch outcomes, including the soft "nothing happened"
/// paths. Hard failures are `DispatchError`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Executed(ActionResult),
    CooldownActive {
        cooldown: CooldownKind,
        remaining_secs: u64,
    },
    FlashUnavailable,
    NoGesture,
}

/// Top-level state machine: one gesture in, at most one camera action out.
/// Owns the cooldown record and the single countdown task; reads camera
/// hardware state through a watch snapshot published elsewhere.
pub struct GestureDispatcher {
    executor: Arc<dyn CameraExecutor>,
    clock: Arc<dyn Clock>,
    camera_state: watch::Receiver<CameraState>,
    feedback: broadcast::Sender<FeedbackMessage>,
    message: Arc<Mutex<Option<String>>>,
    cooldowns: CooldownState,
    countdown: Option<JoinHandle<()>>,
}

impl GestureDispatcher {
    pub fn new(
        executor: Arc<dyn CameraExecutor>,
        clock: Arc<dyn Clock>,
        camera_state: watch::Receiver<CameraState>,
    ) -> Self {
        let (feedback, _) = broadcast::channel(FEEDBACK_CHANNEL_CAPACITY);
        Self {
            executor,
            clock,
            camera_state,
            feedback,
            message: Arc::new(Mutex::new(None)),
            cooldowns: CooldownState::default(),
            countdown: None,
        }
    }

    pub fn subscribe_feedback(&self) -> broadcast::Receiver<FeedbackMessage> {
        self.feedback.subscribe()
    }

    /// Sender half of the feedback stream, for wiring layers that need to
    /// hand out subscriptions after the dispatcher moves into its task.
    pub fn feedback_channel(&self) -> broadcast::Sender<FeedbackMessage> {
        self.feedback.clone()
    }

    pub fn cooldowns(&self) -> &CooldownState {
        &self.cooldowns
    }

    /// Run one observation through the gate chain and, if it survives,
    /// hand the mapped action to the executor. Timestamps move only on
    /// confirmed success, so a failed action never penalizes the next one.
    pub async fn process(
        &mut self,
        observation: &GestureObservation,
    ) -> Result<DispatchOutcome, DispatchError> {
        let now = self.clock.now_millis();
        self.clear_transient_message().await;

        if let Some(remaining) = remaining_secs(self.cooldowns.last_gesture, UNIVERSAL_COOLDOWN_MS, now)
        {
            debug!(gesture = ?observation.label, remaining, "universal cooldown active");
            self.show(text::retry_in(remaining), false).await;
            return Ok(DispatchOutcome::CooldownActive {
                cooldown: CooldownKind::Universal,
                remaining_secs: remaining,
            });
        }

        let state = *self.camera_state.borrow();

        if state.recording {
            if observation.label != GestureLabel::PeaceSign {
                self.show(text::BLOCKED_WHILE_RECORDING, true).await;
                return Err(DispatchError::BlockedWhileRecording);
            }
            if let Some(remaining) =
                remaining_secs(self.cooldowns.last_video_start, VIDEO_START_COOLDOWN_MS, now)
            {
                self.show(text::video_stoppable_in(remaining), true).await;
                return Err(DispatchError::MinRecordingDuration {
                    remaining_secs: remaining,
                });
            }
        }

        let action = match observation.label {
            GestureLabel::None => return Ok(DispatchOutcome::NoGesture),
            GestureLabel::OpenPalm => CameraAction::CapturePhoto,
            GestureLabel::PeaceSign => {
                if state.recording {
                    CameraAction::StopVideoRecording
                } else if let Some(remaining) =
                    remaining_secs(self.cooldowns.last_video_stop, VIDEO_STOP_COOLDOWN_MS, now)
                {
                    self.show(text::video_startable_in(remaining), false).await;
                    return Ok(DispatchOutcome::CooldownActive {
                        cooldown: CooldownKind::VideoStop,
                        remaining_secs: remaining,
                    });
                } else {
                    CameraAction::StartVideoRecording
                }
            }
            GestureLabel::ThumbsUp => {
                if let Some(remaining) = remaining_secs(
                    self.cooldowns.last_camera_switch,
                    CAMERA_SWITCH_COOLDOWN_MS,
                    now,
                ) {
                    self.show(text::switch_ready_in(remaining), false).await;
                    return Ok(DispatchOutcome::CooldownActive {
                        cooldown: CooldownKind::CameraSwitch,
                        remaining_secs: remaining,
                    });
                }
                CameraAction::SwitchCamera
            }
            GestureLabel::OkSign => CameraAction::OpenGallery,
            GestureLabel::PinchZoomIn => CameraAction::ZoomIn,
            GestureLabel::PinchZoomOut => CameraAction::ZoomOut,
            GestureLabel::ThreeFingersUp => {
                if state.facing == CameraFacing::Front {
                    self.show(text::FLASH_FRONT_CAMERA, false).await;
                    return Ok(DispatchOutcome::FlashUnavailable);
                }
                if let Some(remaining) = remaining_secs(
                    self.cooldowns.last_flash_toggle,
                    FLASH_TOGGLE_COOLDOWN_MS,
                    now,
                ) {
                    self.show(text::flash_ready_in(remaining), false).await;
                    return Ok(DispatchOutcome::CooldownActive {
                        cooldown: CooldownKind::FlashToggle,
                        remaining_secs: remaining,
                    });
                }
                CameraAction::ToggleFlash
            }
        };

        let result = match self.executor.execute(action).await {
            Ok(result) => result,
            Err(err) => {
                let message = err.to_string();
                warn!(?action, error = %message, "camera executor failed");
                self.show(message.clone(), true).await;
                return Err(DispatchError::ExecutorFailed { action, message });
            }
        };

        if result.success {
            info!(?action, gesture = ?observation.label, "camera action dispatched");
            self.cooldowns.record_success(action, now);
            self.start_countdown(action);
        } else {
            warn!(?action, message = %result.message, "camera action refused");
            self.show(result.message.clone(), true).await;
        }

        Ok(DispatchOutcome::Executed(result))
    }

    /// Stop any in-flight recording and cancel the countdown task.
    pub async fn shutdown(mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
        if self.camera_state.borrow().recording {
            if let Err(err) = self.executor.execute(CameraAction::StopVideoRecording).await {
                warn!(error = %err, "failed to stop recording on shutdown");
            }
        }
    }

    /// The two idle texts are informational leftovers from a finished
    /// countdown; a new observation supersedes them immediately.
    async fn clear_transient_message(&self) {
        let mut message = self.message.lock().await;
        if matches!(
            message.as_deref(),
            Some(text::TRY_OTHER_GESTURE) | Some(text::CAN_STOP_VIDEO)
        ) {
            *message = None;
            let _ = self.feedback.send(FeedbackMessage::cleared());
        }
    }

    async fn show(&self, message: impl Into<String>, is_error: bool) {
        let message = message.into();
        *self.message.lock().await = Some(message.clone());
        let _ = self.feedback.send(FeedbackMessage::shown(message, is_error));
    }

    /// Single-owner countdown: at most one runs at a time, republishing the
    /// remaining-seconds message every second until the relevant cooldown
    /// elapses, then switching to the idle text.
    fn start_countdown(&mut self, action: CameraAction) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }

        let feedback = self.feedback.clone();
        let message = Arc::clone(&self.message);
        self.countdown = Some(tokio::spawn(async move {
            let mut remaining = countdown_duration_ms(action) / 1000;
            while remaining > 0 {
                let tick = countdown_text(action, remaining);
                *message.lock().await = Some(tick.clone());
                let _ = feedback.send(FeedbackMessage::shown(tick, false));
                sleep(Duration::from_secs(1)).await;
                remaining -= 1;
            }

            let idle = match action {
                CameraAction::StartVideoRecording => text::CAN_STOP_VIDEO,
                _ => text::TRY_OTHER_GESTURE,
            };
            *message.lock().await = Some(idle.to_string());
            let _ = feedback.send(FeedbackMessage::shown(idle, false));
        }));
    }
}

fn countdown_duration_ms(action: CameraAction) -> u64 {
    match action {
        CameraAction::StartVideoRecording => VIDEO_START_COOLDOWN_MS,
        CameraAction::StopVideoRecording => VIDEO_STOP_COOLDOWN_MS,
        CameraAction::ToggleFlash => FLASH_TOGGLE_COOLDOWN_MS,
        CameraAction::SwitchCamera => CAMERA_SWITCH_COOLDOWN_MS,
        _ => UNIVERSAL_COOLDOWN_MS,
    }
}

fn countdown_text(action: CameraAction, remaining: u64) -> String {
    match action {
        CameraAction::StartVideoRecording => text::video_stoppable_in(remaining),
        CameraAction::StopVideoRecording => text::video_startable_in(remaining),
        CameraAction::ToggleFlash => text::flash_ready_in(remaining),
        CameraAction::SwitchCamera => text::switch_ready_in(remaining),
        _ => text::retry_in(remaining),
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
