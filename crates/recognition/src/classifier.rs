use std::sync::Arc;

use gestures::{
    clock::Clock,
    domain::GestureLabel,
    landmarks::{self, index, LandmarkSet},
};

const STATIC_GESTURE_CONFIDENCE: f32 = 0.9;
const PINCH_PREEMPT_CONFIDENCE: f32 = 0.5;

const OK_SIGN_CLOSE_THRESHOLD: f32 = 0.15;
const OK_SIGN_CIRCLE_SLACK: f32 = 0.08;

const PINCH_SHAPE_MIN_DISTANCE: f32 = 0.1;
const PINCH_DISTANCE_THRESHOLD: f32 = 0.01;
const PINCH_MIN_DURATION_MS: u64 = 200;
const PINCH_COOLDOWN_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: GestureLabel,
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: GestureLabel, confidence: f32) -> Self {
        Self { label, confidence }
    }

    pub fn none() -> Self {
        Self::new(GestureLabel::None, 0.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct FingerState {
    thumb: bool,
    index: bool,
    middle: bool,
    ring: bool,
    pinky: bool,
}

fn finger_state(hand: &LandmarkSet) -> FingerState {
    FingerState {
        thumb: landmarks::is_thumb_extended(hand),
        index: landmarks::is_finger_extended(hand, index::INDEX_TIP, index::INDEX_PIP),
        middle: landmarks::is_finger_extended(hand, index::MIDDLE_TIP, index::MIDDLE_PIP),
        ring: landmarks::is_finger_extended(hand, index::RING_TIP, index::RING_PIP),
        pinky: landmarks::is_finger_extended(hand, index::PINKY_TIP, index::PINKY_PIP),
    }
}

/// Score every known shape for this hand. The pinch evaluator runs first
/// and wins outright when confident, because it is time-sensitive; static
/// poses are then scored and the highest confidence wins, ties resolved by
/// evaluation order.
pub fn classify(hand: &LandmarkSet, pinch: &mut PinchTracker) -> Classification {
    let pinch_result = pinch.evaluate(hand);
    if pinch_result.confidence > PINCH_PREEMPT_CONFIDENCE {
        return pinch_result;
    }

    let candidates = [
        Classification::new(GestureLabel::OpenPalm, detect_open_palm(hand)),
        Classification::new(GestureLabel::PeaceSign, detect_peace_sign(hand)),
        Classification::new(GestureLabel::ThumbsUp, detect_thumbs_up(hand)),
        Classification::new(GestureLabel::OkSign, detect_ok_sign(hand)),
        Classification::new(GestureLabel::ThreeFingersUp, detect_three_fingers_up(hand)),
    ];

    let mut best = Classification::none();
    for candidate in candidates {
        if candidate.confidence > best.confidence {
            best = candidate;
        }
    }
    best
}

fn detect_open_palm(hand: &LandmarkSet) -> f32 {
    let extended = landmarks::extended_finger_count(hand);
    let thumb = landmarks::is_thumb_extended(hand);
    if extended == 4 && thumb {
        STATIC_GESTURE_CONFIDENCE
    } else {
        0.0
    }
}

fn detect_peace_sign(hand: &LandmarkSet) -> f32 {
    let fingers = finger_state(hand);
    if fingers.index && fingers.middle && !fingers.ring && !fingers.pinky {
        STATIC_GESTURE_CONFIDENCE
    } else {
        0.0
    }
}

fn detect_thumbs_up(hand: &LandmarkSet) -> f32 {
    let fingers = finger_state(hand);
    if fingers.thumb && !fingers.index && !fingers.middle && !fingers.ring && !fingers.pinky {
        STATIC_GESTURE_CONFIDENCE
    } else {
        0.0
    }
}

fn detect_ok_sign(hand: &LandmarkSet) -> f32 {
    let fingers = finger_state(hand);

    let thumb_index_close = landmarks::fingertips_close(
        hand,
        index::THUMB_TIP,
        index::INDEX_TIP,
        OK_SIGN_CLOSE_THRESHOLD,
    );

    let shape = fingers.thumb
        && !fingers.index
        && fingers.middle
        && fingers.ring
        && fingers.pinky
        && thumb_index_close;

    // The curled index must stay near its PIP joint to count as a circle
    // rather than a fully dropped finger.
    let index_tip = hand.point(index::INDEX_TIP);
    let index_pip = hand.point(index::INDEX_PIP);
    let proper_circle = index_tip.y >= index_pip.y - OK_SIGN_CIRCLE_SLACK;

    if shape && proper_circle {
        STATIC_GESTURE_CONFIDENCE
    } else {
        0.0
    }
}

fn detect_three_fingers_up(hand: &LandmarkSet) -> f32 {
    let fingers = finger_state(hand);
    if fingers.index && fingers.thumb && fingers.pinky && !fingers.middle && !fingers.ring {
        STATIC_GESTURE_CONFIDENCE
    } else {
        0.0
    }
}

/// Temporal state machine for the continuous zoom gesture. The distance
/// recorded when the shape first becomes valid stays fixed while the shape
/// holds; drift accumulates against it and only a shape loss resets it.
pub struct PinchTracker {
    clock: Arc<dyn Clock>,
    armed_distance: Option<f32>,
    armed_at: u64,
    last_emit_at: Option<u64>,
}

impl PinchTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            armed_distance: None,
            armed_at: 0,
            last_emit_at: None,
        }
    }

    pub fn evaluate(&mut self, hand: &LandmarkSet) -> Classification {
        let fingers = finger_state(hand);
        let shape =
            fingers.thumb && fingers.index && !fingers.middle && !fingers.ring && !fingers.pinky;

        let current_distance =
            landmarks::distance(hand.point(index::THUMB_TIP), hand.point(index::INDEX_TIP));

        // A small thumb-index gap with this finger shape is an OK sign in
        // the making, not a pinch.
        if !shape || current_distance <= PINCH_SHAPE_MIN_DISTANCE {
            self.armed_distance = None;
            self.armed_at = 0;
            return Classification::none();
        }

        let now = self.clock.now_millis();

        let Some(armed_distance) = self.armed_distance else {
            self.armed_distance = Some(current_distance);
            self.armed_at = now;
            return Classification::none();
        };

        if now.saturating_sub(self.armed_at) < PINCH_MIN_DURATION_MS {
            return Classification::none();
        }

        if let Some(last_emit) = self.last_emit_at {
            if now.saturating_sub(last_emit) < PINCH_COOLDOWN_MS {
                return Classification::none();
            }
        }

        let drift = current_distance - armed_distance;
        if drift > PINCH_DISTANCE_THRESHOLD {
            self.last_emit_at = Some(now);
            Classification::new(GestureLabel::PinchZoomIn, STATIC_GESTURE_CONFIDENCE)
        } else if drift < -PINCH_DISTANCE_THRESHOLD {
            self.last_emit_at = Some(now);
            Classification::new(GestureLabel::PinchZoomOut, STATIC_GESTURE_CONFIDENCE)
        } else {
            Classification::none()
        }
    }

    pub fn reset(&mut self) {
        self.armed_distance = None;
        self.armed_at = 0;
        self.last_emit_at = None;
    }
}

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod tests;
