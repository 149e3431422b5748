use std::{collections::VecDeque, sync::Arc};

use gestures::{clock::Clock, domain::GestureLabel};

use crate::{classifier::Classification, settings::RecognizerSettings};

/// Requires a classification to persist across a run of frames and applies
/// a short emission cooldown. With the default window of one frame the run
/// check is pass-through, but the cooldown still debounces.
pub struct StabilityFilter {
    clock: Arc<dyn Clock>,
    window: usize,
    cooldown_ms: u64,
    min_confidence: f32,
    recent: VecDeque<GestureLabel>,
    last_emit_at: Option<u64>,
}

impl StabilityFilter {
    pub fn new(clock: Arc<dyn Clock>, settings: &RecognizerSettings) -> Self {
        Self {
            clock,
            window: settings.stability_frames.max(1),
            cooldown_ms: settings.gesture_cooldown_ms,
            min_confidence: settings.min_confidence,
            recent: VecDeque::new(),
            last_emit_at: None,
        }
    }

    /// Returns the emitted classification, or `None` when the candidate is
    /// suppressed by the run-length requirement or the cooldown. Candidates
    /// below the confidence floor still emit, degraded to NONE.
    pub fn apply(&mut self, candidate: Classification) -> Option<Classification> {
        self.recent.push_back(candidate.label);
        if self.recent.len() > self.window {
            self.recent.pop_front();
        }

        let now = self.clock.now_millis();
        let cooled = match self.last_emit_at {
            None => true,
            Some(at) => now.saturating_sub(at) >= self.cooldown_ms,
        };

        if !self.is_stable(candidate.label) || !cooled {
            return None;
        }

        self.last_emit_at = Some(now);

        if candidate.confidence >= self.min_confidence {
            Some(candidate)
        } else {
            Some(Classification::none())
        }
    }

    fn is_stable(&self, label: GestureLabel) -> bool {
        self.recent.len() >= self.window && self.recent.iter().all(|&l| l == label)
    }

    pub fn reset(&mut self) {
        self.recent.clear();
        self.last_emit_at = None;
    }
}

#[cfg(test)]
#[path = "tests/stability_tests.rs"]
mod tests;
