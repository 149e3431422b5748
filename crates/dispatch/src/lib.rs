//! Gesture-to-camera-action dispatch: cooldown gating, the recording-mode
//! rule, executor hand-off and the countdown feedback timer.

pub mod cooldown;
pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod text;

pub use cooldown::{CooldownKind, CooldownState};
pub use dispatcher::{DispatchOutcome, GestureDispatcher};
pub use error::DispatchError;
pub use executor::{CameraExecutor, MissingCameraExecutor};
