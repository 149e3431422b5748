//! Stage wiring for the gesture control pipeline: latest-frame-wins intake
//! with adaptive sampling, landmark analysis, and action dispatch, each on
//! its own task so a slow stage drops frames instead of queueing them.

pub mod detector;

use std::sync::Arc;

use dispatch::{CameraExecutor, DispatchOutcome, GestureDispatcher};
use gestures::{
    clock::Clock,
    domain::{CameraState, GestureObservation},
    protocol::{FeedbackMessage, PerformanceStats},
};
use recognition::{FrameGovernor, GestureRecognizer, RecognizerSettings};
use serde::{Deserialize, Serialize};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{trace, warn};

pub use detector::{LandmarkDetector, MissingLandmarkDetector, VideoFrame};

const OBSERVATION_CHANNEL_CAPACITY: usize = 256;
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// One dispatcher decision per processed frame, published for observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchEvent {
    Resolved {
        observation: GestureObservation,
        outcome: DispatchOutcome,
    },
    Failed {
        observation: GestureObservation,
        error: String,
    },
}

/// Running pipeline. Dropping the handle detaches the tasks; call
/// [`PipelineHandle::shutdown`] to drain and stop them cleanly.
pub struct PipelineHandle {
    frames: watch::Sender<Option<VideoFrame>>,
    observations: broadcast::Sender<GestureObservation>,
    events: broadcast::Sender<DispatchEvent>,
    feedback: broadcast::Sender<FeedbackMessage>,
    stats: watch::Receiver<PerformanceStats>,
    intake: JoinHandle<()>,
    analysis: JoinHandle<()>,
    dispatch: JoinHandle<()>,
}

impl PipelineHandle {
    pub fn spawn(
        detector: Arc<dyn LandmarkDetector>,
        executor: Arc<dyn CameraExecutor>,
        clock: Arc<dyn Clock>,
        camera_state: watch::Receiver<CameraState>,
        settings: RecognizerSettings,
    ) -> Self {
        let (frames_tx, frames_rx) = watch::channel(None);
        let (analyzed_tx, analyzed_rx) = watch::channel(None);
        let (stats_tx, stats_rx) = watch::channel(PerformanceStats::default());
        let (observations_tx, _) = broadcast::channel(OBSERVATION_CHANNEL_CAPACITY);
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let mut governor = FrameGovernor::new(Arc::clone(&clock));
        governor.set_adaptive_enabled(settings.adaptive_processing);
        let recognizer = GestureRecognizer::new(Arc::clone(&clock), &settings);
        let dispatcher = GestureDispatcher::new(executor, clock, camera_state);
        let feedback = dispatcher.feedback_channel();

        let intake = tokio::spawn(intake_stage(frames_rx, analyzed_tx, stats_tx, governor));
        let analysis = tokio::spawn(analysis_stage(
            analyzed_rx,
            observations_tx.clone(),
            detector,
            recognizer,
        ));
        let dispatch = tokio::spawn(dispatch_stage(
            observations_tx.subscribe(),
            events_tx.clone(),
            dispatcher,
        ));

        Self {
            frames: frames_tx,
            observations: observations_tx,
            events: events_tx,
            feedback,
            stats: stats_rx,
            intake,
            analysis,
            dispatch,
        }
    }

    /// Latest-wins frame submission: a busy pipeline only ever sees the
    /// most recent frame, older ones are overwritten, never queued.
    pub fn submit_frame(&self, frame: VideoFrame) {
        let _ = self.frames.send(Some(frame));
    }

    pub fn subscribe_observations(&self) -> broadcast::Receiver<GestureObservation> {
        self.observations.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<DispatchEvent> {
        self.events.subscribe()
    }

    pub fn subscribe_feedback(&self) -> broadcast::Receiver<FeedbackMessage> {
        self.feedback.subscribe()
    }

    pub fn stats(&self) -> PerformanceStats {
        self.stats.borrow().clone()
    }

    /// Close the intake, let every stage drain in order, then run the
    /// dispatcher teardown (which stops an in-flight recording).
    pub async fn shutdown(self) {
        let Self {
            frames,
            observations,
            events: _events,
            feedback: _feedback,
            stats: _stats,
            intake,
            analysis,
            dispatch,
        } = self;

        drop(frames);
        if intake.await.is_err() {
            warn!("intake stage panicked during shutdown");
        }
        if analysis.await.is_err() {
            warn!("analysis stage panicked during shutdown");
        }
        drop(observations);
        if dispatch.await.is_err() {
            warn!("dispatch stage panicked during shutdown");
        }
    }
}

async fn intake_stage(
    mut frames: watch::Receiver<Option<VideoFrame>>,
    analyzed: watch::Sender<Option<VideoFrame>>,
    stats: watch::Sender<PerformanceStats>,
    mut governor: FrameGovernor,
) {
    while frames.changed().await.is_ok() {
        let Some(frame) = *frames.borrow_and_update() else {
            continue;
        };

        if governor.should_process_frame() {
            governor.on_frame_processed();
            let _ = analyzed.send(Some(frame));
        } else {
            trace!(seq = frame.seq, "frame skipped by governor");
            governor.on_frame_skipped();
        }
        let _ = stats.send(governor.stats());
    }
}

async fn analysis_stage(
    mut frames: watch::Receiver<Option<VideoFrame>>,
    observations: broadcast::Sender<GestureObservation>,
    detector: Arc<dyn LandmarkDetector>,
    mut recognizer: GestureRecognizer,
) {
    while frames.changed().await.is_ok() {
        let Some(frame) = *frames.borrow_and_update() else {
            continue;
        };

        let observation = match detector.detect(&frame) {
            Ok(hands) => recognizer.process_hands(&hands),
            Err(err) => {
                warn!(seq = frame.seq, error = %err, "landmark detection failed");
                GestureObservation::none()
            }
        };
        let _ = observations.send(observation);
    }
}

async fn dispatch_stage(
    mut observations: broadcast::Receiver<GestureObservation>,
    events: broadcast::Sender<DispatchEvent>,
    mut dispatcher: GestureDispatcher,
) {
    loop {
        match observations.recv().await {
            Ok(observation) => {
                let event = match dispatcher.process(&observation).await {
                    Ok(outcome) => DispatchEvent::Resolved {
                        observation,
                        outcome,
                    },
                    Err(err) => DispatchEvent::Failed {
                        observation,
                        error: err.to_string(),
                    },
                };
                let _ = events.send(event);
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "dispatch stage lagged behind observations");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    dispatcher.shutdown().await;
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
