// Host-side tests for landmark classification and the input adapter.

use deck_core::gesture::landmark::*;
use deck_core::*;
use glam::Vec2;

const WRIST_AT: (f32, f32) = (0.5, 0.8);

/// A hand with every point on the wrist except the given overrides.
fn hand(overrides: &[(usize, (f32, f32))]) -> HandLandmarks {
    let mut points = vec![Landmark::new(WRIST_AT.0, WRIST_AT.1, 0.0); HAND_LANDMARK_COUNT];
    for &(i, (x, y)) in overrides {
        points[i] = Landmark::new(x, y, 0.0);
    }
    HandLandmarks::from_slice(&points).unwrap()
}

fn fist() -> HandLandmarks {
    hand(&[
        (INDEX_TIP, (0.5, 0.7)),
        (MIDDLE_TIP, (0.52, 0.7)),
        (RING_TIP, (0.54, 0.72)),
        (PINKY_TIP, (0.56, 0.74)),
        (THUMB_TIP, (0.45, 0.7)),
    ])
}

fn pinch() -> HandLandmarks {
    hand(&[
        (INDEX_TIP, (0.5, 0.3)),
        (THUMB_TIP, (0.52, 0.3)),
        (MIDDLE_TIP, (0.5, 0.3)),
    ])
}

fn point() -> HandLandmarks {
    hand(&[
        (INDEX_TIP, (0.25, 0.25)),
        (THUMB_TIP, (0.7, 0.6)),
        (MIDDLE_TIP, (0.5, 0.3)),
        (PALM_CENTER, (0.5, 0.6)),
    ])
}

fn open(palm_x: f32) -> HandLandmarks {
    hand(&[
        (INDEX_TIP, (0.5, 0.5)),
        (THUMB_TIP, (0.8, 0.6)),
        (MIDDLE_TIP, (0.5, 0.3)),
        (PALM_CENTER, (palm_x, 0.6)),
    ])
}

#[test]
fn classifies_each_gesture() {
    let tuning = GestureTuning::default();
    assert_eq!(classify_hand(&fist(), &tuning), GestureClass::Fist);
    assert_eq!(classify_hand(&pinch(), &tuning), GestureClass::Pinch);
    assert_eq!(classify_hand(&point(), &tuning), GestureClass::Point);
    assert_eq!(classify_hand(&open(0.5), &tuning), GestureClass::Open);
}

#[test]
fn fist_wins_over_pinch() {
    // every point collapsed onto the wrist also has thumb and index touching
    let collapsed = hand(&[]);
    assert_eq!(
        classify_hand(&collapsed, &GestureTuning::default()),
        GestureClass::Fist
    );
}

#[test]
fn pointer_is_mirrored_and_y_up() {
    let signal = read_hand(&point(), &GestureTuning::default());
    assert_eq!(signal.pointer, Vec2::new(0.5, 0.5));
}

#[test]
fn steer_follows_mirrored_palm() {
    let tuning = GestureTuning::default();
    // palm on the right of the image is the user's left
    assert!(read_hand(&open(0.9), &tuning).steer < -0.5);
    assert!(read_hand(&open(0.1), &tuning).steer > 0.5);
    assert_eq!(read_hand(&open(0.5), &tuning).steer, 0.0);
}

#[test]
fn rejects_malformed_landmarks() {
    let short = vec![Landmark::default(); 5];
    assert_eq!(
        HandLandmarks::from_slice(&short),
        Err(InputError::LandmarkCount {
            expected: HAND_LANDMARK_COUNT,
            found: 5
        })
    );
    let mut bad = vec![Landmark::default(); HAND_LANDMARK_COUNT];
    bad[7].y = f32::NAN;
    assert_eq!(
        HandLandmarks::from_slice(&bad),
        Err(InputError::NonFinite { index: 7 })
    );
}

#[test]
fn normalize_pointer_maps_window_corners() {
    assert_eq!(normalize_pointer(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(normalize_pointer(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(normalize_pointer(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn mouse_emulates_gestures() {
    let mut adapter = GestureAdapter::default();
    assert!(adapter.camera_failed("no device"));

    adapter.pointer(PointerEvent::Move { x: 0.1, y: 0.2 });
    assert_eq!(adapter.signal().class, GestureClass::Point);
    assert_eq!(adapter.signal().pointer, Vec2::new(0.1, 0.2));

    adapter.pointer(PointerEvent::Down(PointerButton::Primary));
    assert_eq!(adapter.signal().class, GestureClass::Pinch);
    adapter.pointer(PointerEvent::Up);
    assert_eq!(adapter.signal().class, GestureClass::Point);

    adapter.pointer(PointerEvent::Down(PointerButton::Secondary));
    assert_eq!(adapter.signal().class, GestureClass::Fist);

    adapter.pointer(PointerEvent::Move { x: -0.8, y: 0.0 });
    assert_eq!(adapter.signal().class, GestureClass::Open);
    assert_eq!(adapter.signal().steer, -0.8);
}

#[test]
fn click_near_edge_does_not_pinch() {
    let mut adapter = GestureAdapter::default();
    adapter.camera_failed("denied");
    adapter.pointer(PointerEvent::Move { x: 0.9, y: 0.0 });
    adapter.pointer(PointerEvent::Down(PointerButton::Primary));
    assert_eq!(adapter.signal().class, GestureClass::Open);
}

#[test]
fn pointer_mode_ignores_landmarks() {
    let mut adapter = GestureAdapter::default();
    adapter.camera_failed("denied");
    adapter.pointer(PointerEvent::Move { x: 0.0, y: 0.0 });
    adapter.landmarks(Some(&pinch()));
    assert_eq!(adapter.mode(), InputMode::Pointer);
    assert_eq!(adapter.signal().class, GestureClass::Point);
    // a late start does not take over either
    assert!(!adapter.camera_started());
    assert_eq!(adapter.mode(), InputMode::Pointer);
}

#[test]
fn camera_mode_ignores_pointer() {
    let mut adapter = GestureAdapter::default();
    adapter.landmarks(Some(&fist()));
    assert_eq!(adapter.mode(), InputMode::Camera);
    adapter.pointer(PointerEvent::Move { x: 0.0, y: 0.0 });
    assert_eq!(adapter.signal().class, GestureClass::Fist);
    assert!(!adapter.camera_failed("late failure"));
}

#[test]
fn losing_the_hand_clears_the_class() {
    let mut adapter = GestureAdapter::default();
    adapter.camera_started();
    adapter.landmarks(Some(&point()));
    let pointer = adapter.signal().pointer;
    adapter.landmarks(None);
    assert_eq!(adapter.signal().class, GestureClass::None);
    assert_eq!(adapter.signal().pointer, pointer);
}
