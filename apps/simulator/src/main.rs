//! Feeds a scripted pose sequence through the full pipeline with a logging
//! camera backend, printing dispatch events as JSON lines and the final
//! performance snapshot at the end.

mod config;
mod poses;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use dispatch::CameraExecutor;
use gestures::{
    clock::SystemClock,
    domain::{ActionResult, CameraAction, CameraFacing, CameraState},
    landmarks::LandmarkSet,
};
use pipeline::{LandmarkDetector, PipelineHandle, VideoFrame};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

#[derive(Parser, Debug)]
struct Args {
    /// Number of synthetic frames to feed through the pipeline.
    #[arg(long, default_value_t = 360)]
    frames: u64,
    /// Synthetic camera frame rate.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
    /// Optional TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
}

struct ScriptedDetector;

impl LandmarkDetector for ScriptedDetector {
    fn detect(&self, frame: &VideoFrame) -> Result<Vec<LandmarkSet>> {
        Ok(poses::pose_for(frame.seq).into_iter().collect())
    }
}

/// Stands in for the camera hardware: applies each action to the shared
/// camera state snapshot and reports success.
struct LoggingExecutor {
    state: watch::Sender<CameraState>,
}

#[async_trait]
impl CameraExecutor for LoggingExecutor {
    async fn execute(&self, action: CameraAction) -> Result<ActionResult> {
        self.state.send_modify(|state| match action {
            CameraAction::StartVideoRecording => state.recording = true,
            CameraAction::StopVideoRecording => state.recording = false,
            CameraAction::SwitchCamera => {
                state.facing = match state.facing {
                    CameraFacing::Front => CameraFacing::Back,
                    CameraFacing::Back => CameraFacing::Front,
                }
            }
            CameraAction::ZoomIn => state.zoom_ratio = (state.zoom_ratio + 0.5).min(5.0),
            CameraAction::ZoomOut => state.zoom_ratio = (state.zoom_ratio - 0.5).max(1.0),
            CameraAction::ToggleFlash => state.flash_enabled = !state.flash_enabled,
            CameraAction::CapturePhoto | CameraAction::OpenGallery => {}
        });

        let state = *self.state.borrow();
        info!(?action, ?state, "camera action executed");
        Ok(ActionResult::ok(action, format!("{action:?} executed"))
            .with_payload(serde_json::json!({ "zoom_ratio": state.zoom_ratio })))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = config::load_settings(args.config.as_deref());

    let (state_tx, state_rx) = watch::channel(CameraState::default());
    let handle = PipelineHandle::spawn(
        Arc::new(ScriptedDetector),
        Arc::new(LoggingExecutor { state: state_tx }),
        Arc::new(SystemClock::new()),
        state_rx,
        settings,
    );

    let mut events = handle.subscribe_events();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => println!("{json}"),
                    Err(err) => warn!(error = %err, "failed to encode dispatch event"),
                },
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "event printer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let frame_interval = Duration::from_secs_f64(1.0 / args.fps.max(1.0));
    for seq in 0..args.frames {
        handle.submit_frame(VideoFrame {
            seq,
            width: 1280,
            height: 720,
            mirrored: true,
        });
        tokio::time::sleep(frame_interval).await;
    }

    // Let the last frame drain before tearing the stages down.
    tokio::time::sleep(frame_interval).await;
    let stats = handle.stats();
    handle.shutdown().await;
    printer.await?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
