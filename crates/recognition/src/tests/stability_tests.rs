use std::sync::Arc;

use gestures::{
    clock::{Clock, ManualClock},
    domain::GestureLabel,
};

use crate::{
    classifier::Classification,
    settings::RecognizerSettings,
    stability::StabilityFilter,
};

fn filter_with(settings: RecognizerSettings) -> (Arc<ManualClock>, StabilityFilter) {
    let clock = Arc::new(ManualClock::new());
    let filter = StabilityFilter::new(Arc::clone(&clock) as Arc<dyn Clock>, &settings);
    (clock, filter)
}

fn peace() -> Classification {
    Classification::new(GestureLabel::PeaceSign, 0.9)
}

#[test]
fn first_candidate_emits_immediately() {
    let (_clock, mut filter) = filter_with(RecognizerSettings::default());
    assert_eq!(filter.apply(peace()), Some(peace()));
}

#[test]
fn repeat_within_cooldown_is_suppressed() {
    let (clock, mut filter) = filter_with(RecognizerSettings::default());
    assert!(filter.apply(peace()).is_some());

    clock.advance(50);
    assert_eq!(filter.apply(peace()), None);

    clock.advance(50);
    assert_eq!(filter.apply(peace()), Some(peace()));
}

#[test]
fn wider_window_requires_matching_run() {
    let settings = RecognizerSettings {
        stability_frames: 2,
        ..RecognizerSettings::default()
    };
    let (_clock, mut filter) = filter_with(settings);

    assert_eq!(filter.apply(peace()), None);
    assert_eq!(filter.apply(peace()), Some(peace()));
}

#[test]
fn label_change_breaks_the_run() {
    let settings = RecognizerSettings {
        stability_frames: 2,
        gesture_cooldown_ms: 0,
        ..RecognizerSettings::default()
    };
    let (_clock, mut filter) = filter_with(settings);

    assert_eq!(filter.apply(peace()), None);
    let palm = Classification::new(GestureLabel::OpenPalm, 0.9);
    assert_eq!(filter.apply(palm), None);
    assert_eq!(filter.apply(palm), Some(palm));
}

#[test]
fn low_confidence_emission_degrades_to_none() {
    let (_clock, mut filter) = filter_with(RecognizerSettings::default());
    let weak = Classification::new(GestureLabel::ThumbsUp, 0.1);
    assert_eq!(filter.apply(weak), Some(Classification::none()));
}

#[test]
fn degraded_emission_still_starts_cooldown() {
    let (clock, mut filter) = filter_with(RecognizerSettings::default());
    let weak = Classification::new(GestureLabel::ThumbsUp, 0.1);
    assert!(filter.apply(weak).is_some());

    clock.advance(50);
    assert_eq!(filter.apply(peace()), None);
}

#[test]
fn reset_clears_run_and_cooldown() {
    let settings = RecognizerSettings {
        stability_frames: 2,
        ..RecognizerSettings::default()
    };
    let (_clock, mut filter) = filter_with(settings);
    assert_eq!(filter.apply(peace()), None);

    filter.reset();
    assert_eq!(filter.apply(peace()), None);
    assert_eq!(filter.apply(peace()), Some(peace()));
}
