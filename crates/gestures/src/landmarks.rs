use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A detected hand skeleton is always 21 points, index-addressed by
/// anatomical role (see [`index`]).
pub const LANDMARK_COUNT: usize = 21;

pub mod index {
    pub const WRIST: usize = 0;

    pub const THUMB_MCP: usize = 2;
    pub const THUMB_TIP: usize = 4;

    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;

    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;

    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;

    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;
}

/// A single landmark in normalized image space: x and y in [0, 1],
/// z relative depth. Smaller y is higher on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Error)]
#[error("expected {LANDMARK_COUNT} hand landmarks, got {actual}")]
pub struct IncompleteHand {
    pub actual: usize,
}

/// One complete hand observation. Constructing it proves the set holds
/// exactly 21 points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSet([Landmark; LANDMARK_COUNT]);

impl LandmarkSet {
    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.0
    }

    pub fn point(&self, index: usize) -> Landmark {
        self.0[index]
    }
}

impl From<[Landmark; LANDMARK_COUNT]> for LandmarkSet {
    fn from(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self(points)
    }
}

impl TryFrom<Vec<Landmark>> for LandmarkSet {
    type Error = IncompleteHand;

    fn try_from(points: Vec<Landmark>) -> Result<Self, Self::Error> {
        let actual = points.len();
        let points: [Landmark; LANDMARK_COUNT] =
            points.try_into().map_err(|_| IncompleteHand { actual })?;
        Ok(Self(points))
    }
}

/// Euclidean distance including the depth component.
pub fn distance(a: Landmark, b: Landmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

const EXTENSION_THRESHOLD: f32 = 0.005;
const THUMB_EXTENSION_MARGIN: f32 = 0.01;

/// A non-thumb finger is extended when its tip sits clearly above its PIP
/// joint on screen.
pub fn is_finger_extended(hand: &LandmarkSet, tip: usize, pip: usize) -> bool {
    hand.point(tip).y < hand.point(pip).y - EXTENSION_THRESHOLD
}

/// The thumb cannot be judged by vertical ordering; it is extended when its
/// tip is farther from the wrist than its MCP joint.
pub fn is_thumb_extended(hand: &LandmarkSet) -> bool {
    let wrist = hand.point(index::WRIST);
    let tip_distance = distance(hand.point(index::THUMB_TIP), wrist);
    let mcp_distance = distance(hand.point(index::THUMB_MCP), wrist);
    tip_distance > mcp_distance + THUMB_EXTENSION_MARGIN
}

pub fn fingertips_close(hand: &LandmarkSet, tip_a: usize, tip_b: usize, threshold: f32) -> bool {
    distance(hand.point(tip_a), hand.point(tip_b)) < threshold
}

/// Count of extended fingers among index, middle, ring and pinky.
pub fn extended_finger_count(hand: &LandmarkSet) -> usize {
    [
        (index::INDEX_TIP, index::INDEX_PIP),
        (index::MIDDLE_TIP, index::MIDDLE_PIP),
        (index::RING_TIP, index::RING_PIP),
        (index::PINKY_TIP, index::PINKY_PIP),
    ]
    .iter()
    .filter(|&&(tip, pip)| is_finger_extended(hand, tip, pip))
    .count()
}
