//! Gesture recognition from hand landmarks and from the mouse.
//!
//! Both sources are folded into one latched [`GestureSignal`]. The session
//! never needs to know which source produced it; it only reads
//! [`GestureAdapter::signal`] once per tick.

use crate::constants::{FIST_RADIUS, PINCH_DISTANCE, POINTER_OPEN_DEADZONE, POINT_REACH};
use crate::error::InputError;
use glam::Vec2;

/// Number of points in one tracked hand.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Indices of the landmarks the classifier reads.
pub mod landmark {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_TIP: usize = 8;
    pub const PALM_CENTER: usize = 9;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_TIP: usize = 16;
    pub const PINKY_TIP: usize = 20;
}

/// One tracked point in normalized image space (`x`, `y` in \[0, 1\], `z` relative depth).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    fn planar_distance(self, other: Landmark) -> f32 {
        Vec2::new(self.x - other.x, self.y - other.y).length()
    }
}

/// A complete, validated set of landmarks for one hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; HAND_LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn from_slice(points: &[Landmark]) -> Result<Self, InputError> {
        if points.len() != HAND_LANDMARK_COUNT {
            return Err(InputError::LandmarkCount {
                expected: HAND_LANDMARK_COUNT,
                found: points.len(),
            });
        }
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return Err(InputError::NonFinite { index });
        }
        let mut out = [Landmark::default(); HAND_LANDMARK_COUNT];
        out.copy_from_slice(points);
        Ok(Self { points: out })
    }

    #[inline]
    pub fn get(&self, index: usize) -> Landmark {
        self.points[index]
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureClass {
    #[default]
    None,
    Open,
    Point,
    Pinch,
    Fist,
}

impl GestureClass {
    pub fn label(self) -> &'static str {
        match self {
            GestureClass::None => "none",
            GestureClass::Open => "open",
            GestureClass::Point => "point",
            GestureClass::Pinch => "pinch",
            GestureClass::Fist => "fist",
        }
    }
}

/// The canonical control signal consumed by the session.
///
/// `pointer` is in normalized device coordinates (\[-1, 1\], y up).
/// `steer` is the signed horizontal value that drives scrolling while open.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSignal {
    pub pointer: Vec2,
    pub class: GestureClass,
    pub steer: f32,
}

/// Thresholds for landmark and pointer classification.
#[derive(Clone, Debug)]
pub struct GestureTuning {
    pub fist_radius: f32,
    pub pinch_distance: f32,
    pub point_reach: f32,
    pub pointer_open_deadzone: f32,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            fist_radius: FIST_RADIUS,
            pinch_distance: PINCH_DISTANCE,
            point_reach: POINT_REACH,
            pointer_open_deadzone: POINTER_OPEN_DEADZONE,
        }
    }
}

/// Classify a hand. Fist wins over pinch, pinch over point/open.
pub fn classify_hand(hand: &HandLandmarks, tuning: &GestureTuning) -> GestureClass {
    use landmark::*;
    let wrist = hand.get(WRIST);
    let index = hand.get(INDEX_TIP);
    let index_reach = index.planar_distance(wrist);

    let curled = [MIDDLE_TIP, RING_TIP, PINKY_TIP]
        .iter()
        .all(|&i| hand.get(i).planar_distance(wrist) < tuning.fist_radius)
        && index_reach < tuning.fist_radius;
    if curled {
        return GestureClass::Fist;
    }
    if index.planar_distance(hand.get(THUMB_TIP)) < tuning.pinch_distance {
        return GestureClass::Pinch;
    }
    if index_reach > tuning.point_reach {
        GestureClass::Point
    } else {
        GestureClass::Open
    }
}

/// Full signal for a hand sample. The image is mirrored so moving the hand
/// right moves the pointer right.
pub fn read_hand(hand: &HandLandmarks, tuning: &GestureTuning) -> GestureSignal {
    let index = hand.get(landmark::INDEX_TIP);
    let palm = hand.get(landmark::PALM_CENTER);
    GestureSignal {
        pointer: Vec2::new((1.0 - index.x) * 2.0 - 1.0, -(index.y * 2.0 - 1.0)),
        class: classify_hand(hand, tuning),
        steer: (1.0 - palm.x) * 2.0 - 1.0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Mouse input, already normalized to device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move { x: f32, y: f32 },
    Down(PointerButton),
    Up,
}

/// Window pixel coordinates (y down) to normalized device coordinates (y up).
#[inline]
pub fn normalize_pointer(px: f32, py: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new((px / w) * 2.0 - 1.0, -(py / h) * 2.0 + 1.0)
}

/// Which source currently owns the signal. Leaving `AwaitingCamera` is final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    AwaitingCamera,
    Camera,
    Pointer,
}

pub struct GestureAdapter {
    mode: InputMode,
    signal: GestureSignal,
    tuning: GestureTuning,
}

impl GestureAdapter {
    pub fn new(tuning: GestureTuning) -> Self {
        Self {
            mode: InputMode::AwaitingCamera,
            signal: GestureSignal::default(),
            tuning,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn signal(&self) -> GestureSignal {
        self.signal
    }

    /// Returns true if this call switched the adapter to camera control.
    pub fn camera_started(&mut self) -> bool {
        if self.mode == InputMode::AwaitingCamera {
            self.mode = InputMode::Camera;
            log::info!("[input] camera stream live; gesture control enabled");
            return true;
        }
        false
    }

    /// Returns true if this call switched the adapter to pointer fallback.
    pub fn camera_failed(&mut self, reason: &str) -> bool {
        if self.mode == InputMode::AwaitingCamera {
            self.mode = InputMode::Pointer;
            log::warn!("[input] camera unavailable ({reason}); using mouse control");
            return true;
        }
        false
    }

    /// Apply one landmark sample. A sample implies the stream is live.
    pub fn landmarks(&mut self, hand: Option<&HandLandmarks>) {
        match self.mode {
            InputMode::Pointer => return,
            InputMode::AwaitingCamera => {
                self.camera_started();
            }
            InputMode::Camera => {}
        }
        match hand {
            Some(hand) => self.signal = read_hand(hand, &self.tuning),
            None => self.signal.class = GestureClass::None,
        }
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        if self.mode == InputMode::Camera {
            return;
        }
        match event {
            PointerEvent::Move { x, y } => {
                self.signal.pointer = Vec2::new(x, y);
                self.signal.steer = x;
                self.signal.class = if x.abs() > self.tuning.pointer_open_deadzone {
                    GestureClass::Open
                } else {
                    GestureClass::Point
                };
            }
            PointerEvent::Down(PointerButton::Secondary) => {
                self.signal.class = GestureClass::Fist;
            }
            PointerEvent::Down(PointerButton::Primary) => {
                if self.signal.class == GestureClass::Point {
                    self.signal.class = GestureClass::Pinch;
                }
            }
            PointerEvent::Up => self.signal.class = GestureClass::Point,
        }
    }
}

impl Default for GestureAdapter {
    fn default() -> Self {
        Self::new(GestureTuning::default())
    }
}
