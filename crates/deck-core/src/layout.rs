//! Spread layout: one scroll value in, a transform per card out.

use crate::constants::{
    DEPTH_EXPONENT, DEPTH_FACTOR, DEPTH_FLOOR, FOCUS_SCALE, FOCUS_Z_BOOST, SETTLE_EPSILON,
    YAW_FACTOR, YAW_LIMIT,
};
use crate::deck::{CardId, Deck, Transform};
use glam::Vec3;

/// Half the scroll range for a deck of `count` cards.
#[inline]
pub fn scroll_limit(count: usize, spacing: f32, margin: f32) -> f32 {
    count as f32 / 2.0 * spacing + margin
}

/// Exponentially smoothed scroll offset with a clamped target.
#[derive(Clone, Debug)]
pub struct ScrollState {
    current: f32,
    target: f32,
    limit: f32,
}

impl ScrollState {
    pub fn new(limit: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            limit: limit.abs(),
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target.clamp(-self.limit, self.limit);
    }

    pub fn nudge(&mut self, delta: f32) {
        self.set_target(self.target + delta);
    }

    /// Move `current` a fixed fraction of the way to `target`.
    ///
    /// `smoothing` must be in (0, 1); the remaining distance shrinks every call
    /// and snaps to zero once below [`SETTLE_EPSILON`].
    pub fn step(&mut self, smoothing: f32) {
        let gap = self.target - self.current;
        if gap.abs() < SETTLE_EPSILON {
            self.current = self.target;
        } else {
            self.current += gap * smoothing;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

/// Signed scroll change for an open-hand steer value.
///
/// Hand on the left scrolls the deck right and vice versa; nothing inside the deadzone.
pub fn steer_delta(steer: f32, speed: f32, gain: f32, deadzone: f32) -> f32 {
    let amount = speed * steer.abs() * gain;
    if steer < -deadzone {
        amount
    } else if steer > deadzone {
        -amount
    } else {
        0.0
    }
}

/// Resting transform for a card whose spread position is `world_x`.
pub fn rest_transform(world_x: f32) -> Transform {
    let depth = -(world_x.abs() * DEPTH_FACTOR).powf(DEPTH_EXPONENT);
    Transform {
        position: Vec3::new(world_x, 0.0, depth.clamp(DEPTH_FLOOR, 0.0)),
        rotation: Vec3::new(0.0, (-world_x * YAW_FACTOR).clamp(-YAW_LIMIT, YAW_LIMIT), 0.0),
        scale: 1.0,
    }
}

/// Lay out every card for the current scroll; `focus` is lifted toward the viewer.
pub fn apply_layout(deck: &mut Deck, scroll: f32, focus: Option<CardId>) {
    for card in deck.iter_mut() {
        let mut t = rest_transform(card.base_offset + scroll);
        if focus == Some(card.id) {
            t.scale = FOCUS_SCALE;
            t.position.z += FOCUS_Z_BOOST;
            t.rotation.y = 0.0;
        }
        card.transform = t;
    }
}
