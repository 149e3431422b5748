//! Scripted synthetic hand poses, centered in the interaction rectangle.
//! The script loops: photo gesture, a recording start, a recording stop
//! once the universal cooldown has passed, then a slow pinch drift that
//! triggers a zoom step. Gaps between gestures are sized for a 30 fps
//! feed, so each 90-frame stretch of empty frames outlasts the 3 s
//! universal cooldown.

use gestures::landmarks::{index, Landmark, LandmarkSet, LANDMARK_COUNT};

const SCRIPT_LEN: u64 = 360;

pub fn pose_for(seq: u64) -> Option<LandmarkSet> {
    match seq % SCRIPT_LEN {
        0..=29 => Some(open_palm()),
        30..=119 => None,
        120..=149 => Some(peace_sign()),
        150..=209 => None,
        210..=239 => Some(peace_sign()),
        240..=299 => None,
        offset => {
            // Thumb drifts away from the index tip a little each frame.
            let distance = 0.15 + (offset - 300) as f32 * 0.002;
            Some(pinch(distance))
        }
    }
}

fn hand(thumb: bool, fingers: [bool; 4]) -> [Landmark; LANDMARK_COUNT] {
    let mut points = [Landmark::default(); LANDMARK_COUNT];
    points[index::WRIST] = Landmark::new(0.5, 0.78, 0.0);
    points[1] = Landmark::new(0.44, 0.72, 0.0);
    points[index::THUMB_MCP] = Landmark::new(0.40, 0.66, 0.0);
    let (ip, tip) = if thumb {
        ((0.35, 0.60), (0.30, 0.55))
    } else {
        ((0.42, 0.65), (0.44, 0.64))
    };
    points[3] = Landmark::new(ip.0, ip.1, 0.0);
    points[index::THUMB_TIP] = Landmark::new(tip.0, tip.1, 0.0);

    for (finger, (&x, &extended)) in [0.44, 0.50, 0.56, 0.62].iter().zip(fingers.iter()).enumerate()
    {
        let base = 5 + finger * 4;
        let (dip_y, tip_y) = if extended { (0.46, 0.40) } else { (0.54, 0.56) };
        points[base] = Landmark::new(x, 0.60, 0.0);
        points[base + 1] = Landmark::new(x, 0.52, 0.0);
        points[base + 2] = Landmark::new(x, dip_y, 0.0);
        points[base + 3] = Landmark::new(x, tip_y, 0.0);
    }
    points
}

fn open_palm() -> LandmarkSet {
    LandmarkSet::from(hand(true, [true, true, true, true]))
}

fn peace_sign() -> LandmarkSet {
    LandmarkSet::from(hand(false, [true, true, false, false]))
}

fn pinch(distance: f32) -> LandmarkSet {
    let mut points = hand(true, [true, false, false, false]);
    points[index::THUMB_TIP] = Landmark::new(0.44 - distance, 0.40, 0.0);
    LandmarkSet::from(points)
}
