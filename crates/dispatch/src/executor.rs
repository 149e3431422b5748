use anyhow::{bail, Result};
use async_trait::async_trait;
use gestures::domain::{ActionResult, CameraAction};

/// External camera boundary. The dispatcher calls it at most once per
/// dispatched gesture and treats any error as a non-fatal action failure.
#[async_trait]
pub trait CameraExecutor: Send + Sync {
    async fn execute(&self, action: CameraAction) -> Result<ActionResult>;
}

/// Placeholder wiring for builds without a camera backend.
pub struct MissingCameraExecutor;

#[async_trait]
impl CameraExecutor for MissingCameraExecutor {
    async fn execute(&self, action: CameraAction) -> Result<ActionResult> {
        bail!("camera backend unavailable, cannot run {action:?}")
    }
}
