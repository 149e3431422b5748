use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use gestures::{
    clock::{Clock, ManualClock},
    domain::{
        ActionResult, CameraAction, CameraFacing, CameraState, GestureLabel, GestureObservation,
    },
};
use tokio::sync::watch;

use super::{DispatchOutcome, GestureDispatcher};
use crate::{
    cooldown::CooldownKind, error::DispatchError, executor::CameraExecutor, text,
};

#[derive(Default)]
struct RecordingExecutor {
    calls: StdMutex<Vec<CameraAction>>,
}

impl RecordingExecutor {
    fn calls(&self) -> Vec<CameraAction> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CameraExecutor for RecordingExecutor {
    async fn execute(&self, action: CameraAction) -> Result<ActionResult> {
        self.calls.lock().unwrap().push(action);
        Ok(ActionResult::ok(action, "done"))
    }
}

struct FailingExecutor;

#[async_trait]
impl CameraExecutor for FailingExecutor {
    async fn execute(&self, _action: CameraAction) -> Result<ActionResult> {
        Err(anyhow!("lens jammed"))
    }
}

struct RefusingExecutor;

#[async_trait]
impl CameraExecutor for RefusingExecutor {
    async fn execute(&self, action: CameraAction) -> Result<ActionResult> {
        Ok(ActionResult::failed(action, "storage full"))
    }
}

fn observed(label: GestureLabel) -> GestureObservation {
    GestureObservation::new(label, 0.9)
}

fn setup(
    state: CameraState,
) -> (
    Arc<ManualClock>,
    Arc<RecordingExecutor>,
    GestureDispatcher,
) {
    let clock = Arc::new(ManualClock::new());
    let executor = Arc::new(RecordingExecutor::default());
    let (_state_tx, state_rx) = watch::channel(state);
    let dispatcher = GestureDispatcher::new(
        Arc::clone(&executor) as Arc<dyn CameraExecutor>,
        Arc::clone(&clock) as Arc<dyn Clock>,
        state_rx,
    );
    (clock, executor, dispatcher)
}

fn back_camera() -> CameraState {
    CameraState {
        facing: CameraFacing::Back,
        ..CameraState::default()
    }
}

fn recording_state() -> CameraState {
    CameraState {
        recording: true,
        ..back_camera()
    }
}

#[tokio::test]
async fn universal_cooldown_gates_consecutive_gestures() {
    let (clock, executor, mut dispatcher) = setup(CameraState::default());
    let palm = observed(GestureLabel::OpenPalm);

    match dispatcher.process(&palm).await.unwrap() {
        DispatchOutcome::Executed(result) => {
            assert_eq!(result.action, CameraAction::CapturePhoto);
            assert!(result.success);
        }
        other => panic!("expected execution, got {other:?}"),
    }

    clock.set(1000);
    assert_eq!(
        dispatcher.process(&palm).await.unwrap(),
        DispatchOutcome::CooldownActive {
            cooldown: CooldownKind::Universal,
            remaining_secs: 2,
        }
    );

    clock.set(3100);
    assert!(matches!(
        dispatcher.process(&palm).await.unwrap(),
        DispatchOutcome::Executed(_)
    ));

    assert_eq!(
        executor.calls(),
        [CameraAction::CapturePhoto, CameraAction::CapturePhoto]
    );
}

#[tokio::test]
async fn recording_blocks_everything_but_the_stop_gesture() {
    let (_clock, executor, mut dispatcher) = setup(recording_state());

    let err = dispatcher
        .process(&observed(GestureLabel::ThumbsUp))
        .await
        .unwrap_err();
    assert_eq!(err, DispatchError::BlockedWhileRecording);
    assert!(executor.calls().is_empty());

    match dispatcher
        .process(&observed(GestureLabel::PeaceSign))
        .await
        .unwrap()
    {
        DispatchOutcome::Executed(result) => {
            assert_eq!(result.action, CameraAction::StopVideoRecording)
        }
        other => panic!("expected stop, got {other:?}"),
    }
    assert_eq!(executor.calls(), [CameraAction::StopVideoRecording]);
}

#[tokio::test]
async fn none_while_recording_is_also_blocked() {
    let (_clock, executor, mut dispatcher) = setup(recording_state());

    let err = dispatcher
        .process(&GestureObservation::none())
        .await
        .unwrap_err();
    assert_eq!(err, DispatchError::BlockedWhileRecording);
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn stopping_too_early_is_a_hard_error() {
    let (_clock, executor, mut dispatcher) = setup(recording_state());
    dispatcher.cooldowns.last_video_start = Some(0);

    let err = dispatcher
        .process(&observed(GestureLabel::PeaceSign))
        .await
        .unwrap_err();
    assert_eq!(err, DispatchError::MinRecordingDuration { remaining_secs: 1 });
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn video_restart_waits_out_the_post_stop_cooldown() {
    let (clock, executor, mut dispatcher) = setup(back_camera());
    dispatcher.cooldowns.last_video_stop = Some(0);
    clock.set(500);

    assert_eq!(
        dispatcher
            .process(&observed(GestureLabel::PeaceSign))
            .await
            .unwrap(),
        DispatchOutcome::CooldownActive {
            cooldown: CooldownKind::VideoStop,
            remaining_secs: 1,
        }
    );
    assert!(executor.calls().is_empty());

    clock.set(2100);
    match dispatcher
        .process(&observed(GestureLabel::PeaceSign))
        .await
        .unwrap()
    {
        DispatchOutcome::Executed(result) => {
            assert_eq!(result.action, CameraAction::StartVideoRecording)
        }
        other => panic!("expected start, got {other:?}"),
    }
}

#[tokio::test]
async fn flash_is_refused_on_the_front_camera() {
    let (_clock, executor, mut dispatcher) = setup(CameraState::default());
    let mut feedback = dispatcher.subscribe_feedback();

    assert_eq!(
        dispatcher
            .process(&observed(GestureLabel::ThreeFingersUp))
            .await
            .unwrap(),
        DispatchOutcome::FlashUnavailable
    );
    assert!(executor.calls().is_empty());

    let shown = feedback.recv().await.unwrap();
    assert_eq!(shown.text, text::FLASH_FRONT_CAMERA);
    assert!(!shown.is_error);
}

#[tokio::test]
async fn flash_toggle_has_its_own_cooldown() {
    let (clock, executor, mut dispatcher) = setup(back_camera());
    let three = observed(GestureLabel::ThreeFingersUp);

    assert!(matches!(
        dispatcher.process(&three).await.unwrap(),
        DispatchOutcome::Executed(_)
    ));

    // Sidestep the universal gate so the per-action window is what gates.
    dispatcher.cooldowns.last_gesture = None;
    clock.set(500);
    assert_eq!(
        dispatcher.process(&three).await.unwrap(),
        DispatchOutcome::CooldownActive {
            cooldown: CooldownKind::FlashToggle,
            remaining_secs: 1,
        }
    );
    assert_eq!(executor.calls(), [CameraAction::ToggleFlash]);
}

#[tokio::test]
async fn camera_switch_has_its_own_cooldown() {
    let (clock, executor, mut dispatcher) = setup(back_camera());
    let thumbs = observed(GestureLabel::ThumbsUp);

    assert!(matches!(
        dispatcher.process(&thumbs).await.unwrap(),
        DispatchOutcome::Executed(_)
    ));

    dispatcher.cooldowns.last_gesture = None;
    clock.set(1000);
    assert_eq!(
        dispatcher.process(&thumbs).await.unwrap(),
        DispatchOutcome::CooldownActive {
            cooldown: CooldownKind::CameraSwitch,
            remaining_secs: 2,
        }
    );
    assert_eq!(executor.calls(), [CameraAction::SwitchCamera]);
}

#[tokio::test]
async fn no_gesture_is_a_quiet_no_op() {
    let (_clock, executor, mut dispatcher) = setup(CameraState::default());
    assert_eq!(
        dispatcher.process(&GestureObservation::none()).await.unwrap(),
        DispatchOutcome::NoGesture
    );
    assert!(executor.calls().is_empty());
    assert_eq!(dispatcher.cooldowns().last_gesture, None);
}

#[tokio::test]
async fn executor_failure_leaves_cooldowns_untouched() {
    let clock = Arc::new(ManualClock::new());
    let (_state_tx, state_rx) = watch::channel(CameraState::default());
    let mut dispatcher = GestureDispatcher::new(
        Arc::new(FailingExecutor),
        Arc::clone(&clock) as Arc<dyn Clock>,
        state_rx,
    );
    let mut feedback = dispatcher.subscribe_feedback();

    let err = dispatcher
        .process(&observed(GestureLabel::OpenPalm))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::ExecutorFailed {
            action: CameraAction::CapturePhoto,
            message: "lens jammed".into(),
        }
    );

    assert_eq!(dispatcher.cooldowns().last_gesture, None);
    let shown = feedback.recv().await.unwrap();
    assert!(shown.is_error);
    assert_eq!(shown.text, "lens jammed");
}

#[tokio::test]
async fn refused_result_surfaces_without_stamping() {
    let clock = Arc::new(ManualClock::new());
    let (_state_tx, state_rx) = watch::channel(CameraState::default());
    let mut dispatcher = GestureDispatcher::new(
        Arc::new(RefusingExecutor),
        Arc::clone(&clock) as Arc<dyn Clock>,
        state_rx,
    );
    let mut feedback = dispatcher.subscribe_feedback();

    match dispatcher
        .process(&observed(GestureLabel::OpenPalm))
        .await
        .unwrap()
    {
        DispatchOutcome::Executed(result) => {
            assert!(!result.success);
            assert_eq!(result.message, "storage full");
        }
        other => panic!("expected refused execution, got {other:?}"),
    }

    assert_eq!(dispatcher.cooldowns().last_gesture, None);
    let shown = feedback.recv().await.unwrap();
    assert!(shown.is_error);
    assert_eq!(shown.text, "storage full");
}

#[tokio::test(start_paused = true)]
async fn countdown_counts_down_then_goes_idle() {
    let (_clock, _executor, mut dispatcher) = setup(CameraState::default());
    let mut feedback = dispatcher.subscribe_feedback();

    dispatcher
        .process(&observed(GestureLabel::OpenPalm))
        .await
        .unwrap();

    for secs in (1..=3).rev() {
        let tick = feedback.recv().await.unwrap();
        assert_eq!(tick.text, text::retry_in(secs));
    }
    let idle = feedback.recv().await.unwrap();
    assert_eq!(idle.text, text::TRY_OTHER_GESTURE);
}

#[tokio::test(start_paused = true)]
async fn video_start_countdown_ends_with_the_stop_hint() {
    let (_clock, _executor, mut dispatcher) = setup(back_camera());
    let mut feedback = dispatcher.subscribe_feedback();

    dispatcher
        .process(&observed(GestureLabel::PeaceSign))
        .await
        .unwrap();

    let tick = feedback.recv().await.unwrap();
    assert_eq!(tick.text, text::video_stoppable_in(1));
    let idle = feedback.recv().await.unwrap();
    assert_eq!(idle.text, text::CAN_STOP_VIDEO);
}

#[tokio::test(start_paused = true)]
async fn next_observation_clears_the_idle_message() {
    let (clock, _executor, mut dispatcher) = setup(CameraState::default());
    let mut feedback = dispatcher.subscribe_feedback();

    dispatcher
        .process(&observed(GestureLabel::OpenPalm))
        .await
        .unwrap();
    // Drain the three countdown ticks and the idle message.
    for _ in 0..4 {
        feedback.recv().await.unwrap();
    }

    clock.set(4000);
    assert_eq!(
        dispatcher.process(&GestureObservation::none()).await.unwrap(),
        DispatchOutcome::NoGesture
    );
    let cleared = feedback.recv().await.unwrap();
    assert!(!cleared.visible);
    assert!(cleared.text.is_empty());
}

#[tokio::test]
async fn shutdown_stops_an_in_flight_recording() {
    let (_clock, executor, dispatcher) = setup(recording_state());
    dispatcher.shutdown().await;
    assert_eq!(executor.calls(), [CameraAction::StopVideoRecording]);
}

#[tokio::test]
async fn shutdown_without_recording_touches_nothing() {
    let (_clock, executor, dispatcher) = setup(back_camera());
    dispatcher.shutdown().await;
    assert!(executor.calls().is_empty());
}
