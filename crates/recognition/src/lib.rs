pub mod classifier;
pub mod governor;
pub mod recognizer;
pub mod settings;
pub mod stability;
pub mod validator;

#[cfg(test)]
#[path = "tests/poses.rs"]
pub(crate) mod poses;

pub use classifier::{Classification, PinchTracker};
pub use governor::FrameGovernor;
pub use recognizer::GestureRecognizer;
pub use settings::RecognizerSettings;
pub use stability::StabilityFilter;
