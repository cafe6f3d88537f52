use glam::Vec3;

// Shared tuning constants for the deck engine and the native frontend.

// Card geometry
pub const CARD_WIDTH: f32 = 1.6;
pub const CARD_HEIGHT: f32 = 2.6;
pub const FRONT_FACE_REST_Z: f32 = -0.01; // front sits just behind the back until revealed
pub const FRONT_FACE_REVEALED_Z: f32 = 0.01;

// Spread layout
pub const CARD_SPACING: f32 = 0.9; // distance between neighbouring base offsets
pub const SCROLL_MARGIN: f32 = 2.0; // how far past either end the deck may scroll
pub const DEPTH_FACTOR: f32 = 0.35;
pub const DEPTH_EXPONENT: f32 = 1.2;
pub const DEPTH_FLOOR: f32 = -6.0; // deepest a resting card recedes
pub const YAW_FACTOR: f32 = 0.1;
pub const YAW_LIMIT: f32 = 0.6;
pub const FOCUS_SCALE: f32 = 1.15;
pub const FOCUS_Z_BOOST: f32 = 1.5;

// Smoothing (fraction of the remaining distance covered per tick)
pub const SCROLL_SMOOTHING: f32 = 0.1;
pub const CURSOR_SMOOTHING: f32 = 0.25;
pub const SETTLE_EPSILON: f32 = 1e-4; // below this the smoothed value snaps to its target

// Steering with an open hand
pub const SCROLL_SPEED: f32 = 0.15;
pub const STEER_DEADZONE: f32 = 0.15;
pub const STEER_GAIN: f32 = 3.0;

// Gesture classification (normalized landmark space)
pub const FIST_RADIUS: f32 = 0.25;
pub const PINCH_DISTANCE: f32 = 0.05;
pub const POINT_REACH: f32 = 0.35;
pub const POINTER_OPEN_DEADZONE: f32 = 0.6; // mouse x beyond this reads as an open hand

// Camera
pub const CAMERA_Z: f32 = 10.0;
pub const CAMERA_FOVY_DEGREES: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;
pub const CURSOR_PLANE_Z: f32 = 0.0;

// Reveal / burn timings (seconds)
pub const REVEAL_MOVE_SEC: f32 = 1.0;
pub const DISMISS_SEC: f32 = 0.8;
pub const DISMISS_Z: f32 = -50.0;
pub const DETAIL_DELAY_SEC: f32 = REVEAL_MOVE_SEC;
pub const DETAIL_FADE_SEC: f32 = 0.5; // detail panel goes from clear to opaque
pub const BURN_RECOVERY_SEC: f32 = 2.0;
pub const NOTICE_SEC: f32 = 2.0;
pub const REVEAL_FOCAL_OFFSET: f32 = 3.0; // revealed card stops this far in front of the camera

// Ash effect
pub const ASH_POINT_COUNT: usize = 5000;
pub const ASH_MAX_AGE: f32 = 2.5;
pub const ASH_GOLD: [f32; 3] = [0.831, 0.686, 0.216]; // #d4af37
pub const ASH_GREY: [f32; 3] = [0.667, 0.667, 0.667]; // #aaaaaa

// Backdrop
pub const STAR_COUNT: usize = 1000;
pub const STAR_FIELD_EXTENT: [f32; 3] = [100.0, 60.0, 50.0];
pub const STAR_FIELD_CENTER_Z: f32 = -20.0;
pub const STAR_SPIN_PER_TICK: f32 = 0.0002;

// Selections
pub const REVERSED_CHANCE: f64 = 0.5;

// Assets
pub const CARD_BACK_REF: &str = "tarot-card-back.jpg";
pub const IMAGE_BASE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/";
pub const PLACEHOLDER_SIZE: [u32; 2] = [512, 800];

#[inline]
pub fn reveal_focal_point() -> Vec3 {
    Vec3::new(0.0, 0.0, CAMERA_Z - REVEAL_FOCAL_OFFSET)
}
