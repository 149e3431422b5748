use std::sync::Arc;

use gestures::{
    clock::Clock,
    domain::GestureObservation,
    landmarks::{Landmark, LandmarkSet},
};
use tracing::trace;

use crate::{
    classifier::{self, Classification, PinchTracker},
    settings::RecognizerSettings,
    stability::StabilityFilter,
    validator,
};

/// Per-frame recognition facade: validate, classify, stabilize. Owned by
/// the analysis stage; all state is frame- or session-local.
pub struct GestureRecognizer {
    enabled: bool,
    stability: StabilityFilter,
    pinch: PinchTracker,
}

impl GestureRecognizer {
    pub fn new(clock: Arc<dyn Clock>, settings: &RecognizerSettings) -> Self {
        Self {
            enabled: true,
            stability: StabilityFilter::new(Arc::clone(&clock), settings),
            pinch: PinchTracker::new(clock),
        }
    }

    /// Classify one complete hand. Validation rejections and suppressed
    /// candidates degrade silently to a NONE observation; every processed
    /// frame yields exactly one observation.
    pub fn process(&mut self, hand: &LandmarkSet) -> GestureObservation {
        if !self.enabled {
            return GestureObservation::none();
        }

        if !validator::is_valid_pose(hand) {
            trace!("pose rejected by validator");
            return GestureObservation::none();
        }

        let candidate = classifier::classify(hand, &mut self.pinch);
        let emitted = self
            .stability
            .apply(candidate)
            .unwrap_or_else(Classification::none);

        GestureObservation::new(emitted.label, emitted.confidence)
    }

    /// Classify the hands reported by the detector; only the first hand is
    /// of interest. No hand means a NONE observation.
    pub fn process_hands(&mut self, hands: &[LandmarkSet]) -> GestureObservation {
        match hands.first() {
            Some(hand) => self.process(hand),
            None => GestureObservation::none(),
        }
    }

    /// Untyped boundary for raw detector output; incomplete landmark sets
    /// degrade to NONE.
    pub fn process_points(&mut self, points: Vec<Landmark>) -> GestureObservation {
        match LandmarkSet::try_from(points) {
            Ok(hand) => self.process(&hand),
            Err(_) => GestureObservation::none(),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn reset(&mut self) {
        self.stability.reset();
        self.pinch.reset();
    }
}

#[cfg(test)]
#[path = "tests/recognizer_tests.rs"]
mod tests;
