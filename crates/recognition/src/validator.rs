use gestures::landmarks::{self, index, LandmarkSet};

const EDGE_MARGIN: f32 = 0.05;
const MIN_HAND_SIZE: f32 = 0.03;
const MAX_HAND_SIZE: f32 = 0.6;

const BOX_LEFT: f32 = 0.15;
const BOX_RIGHT: f32 = 0.85;
const BOX_TOP: f32 = 0.175;
const BOX_BOTTOM: f32 = 0.825;

/// Wrist, the five fingertips and the five MCP joints must all sit inside
/// the interaction rectangle.
const KEY_LANDMARKS: [usize; 11] = [
    index::WRIST,
    index::THUMB_TIP,
    index::INDEX_TIP,
    index::MIDDLE_TIP,
    index::RING_TIP,
    index::PINKY_TIP,
    index::THUMB_MCP,
    index::INDEX_MCP,
    index::MIDDLE_MCP,
    index::RING_MCP,
    index::PINKY_MCP,
];

/// All checks are conjunctive; a failing hand short-circuits classification
/// to NONE with zero confidence.
pub fn is_valid_pose(hand: &LandmarkSet) -> bool {
    is_complete_hand_visible(hand) && is_hand_inside_interaction_box(hand)
}

fn is_complete_hand_visible(hand: &LandmarkSet) -> bool {
    let all_in_bounds = hand
        .points()
        .iter()
        .all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));

    let clear_of_edges = hand.points().iter().all(|p| {
        p.x >= EDGE_MARGIN && p.x <= 1.0 - EDGE_MARGIN && p.y >= EDGE_MARGIN && p.y <= 1.0 - EDGE_MARGIN
    });

    // Wrist-to-middle-fingertip span as a proxy for distance from camera.
    let hand_size = landmarks::distance(hand.point(index::WRIST), hand.point(index::MIDDLE_TIP));
    let reasonable_size = hand_size > MIN_HAND_SIZE && hand_size < MAX_HAND_SIZE;

    all_in_bounds && clear_of_edges && reasonable_size
}

fn is_hand_inside_interaction_box(hand: &LandmarkSet) -> bool {
    KEY_LANDMARKS.iter().all(|&i| {
        let p = hand.point(i);
        p.x >= BOX_LEFT && p.x <= BOX_RIGHT && p.y >= BOX_TOP && p.y <= BOX_BOTTOM
    })
}

#[cfg(test)]
#[path = "tests/validator_tests.rs"]
mod tests;
