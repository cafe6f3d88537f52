//! Ash bursts left behind by burned cards.
//!
//! The engine only does bookkeeping: it samples the points once, ages every
//! burst by the tick's duration and drops bursts past their max age. The
//! renderer's shader turns `age` and each point's `seed` into dispersal and fade.

use crate::constants::{ASH_GOLD, ASH_GREY, CARD_HEIGHT, CARD_WIDTH};
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct AshPoint {
    /// Offset from the burst origin.
    pub offset: Vec3,
    pub seed: f32,
    pub color: [f32; 3],
}

#[derive(Clone, Debug)]
pub struct AshBurst {
    pub origin: Vec3,
    pub age: f32,
    pub points: Vec<AshPoint>,
}

impl AshBurst {
    pub fn sample<R: Rng>(origin: Vec3, count: usize, rng: &mut R) -> Self {
        let points = (0..count)
            .map(|_| AshPoint {
                offset: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * CARD_WIDTH,
                    (rng.gen::<f32>() - 0.5) * CARD_HEIGHT,
                    0.0,
                ),
                seed: rng.gen(),
                color: if rng.gen_bool(0.5) { ASH_GOLD } else { ASH_GREY },
            })
            .collect();
        Self {
            origin,
            age: 0.0,
            points,
        }
    }
}

pub struct AshField {
    bursts: Vec<AshBurst>,
    point_count: usize,
    max_age: f32,
}

impl AshField {
    pub fn new(point_count: usize, max_age: f32) -> Self {
        Self {
            bursts: Vec::new(),
            point_count,
            max_age,
        }
    }

    pub fn spawn<R: Rng>(&mut self, origin: Vec3, rng: &mut R) {
        self.bursts
            .push(AshBurst::sample(origin, self.point_count, rng));
    }

    /// Age every burst and retire the expired ones. Returns how many retired.
    pub fn advance(&mut self, dt_sec: f32) -> usize {
        let before = self.bursts.len();
        let max_age = self.max_age;
        for burst in &mut self.bursts {
            burst.age += dt_sec;
        }
        self.bursts.retain(|b| b.age <= max_age);
        before - self.bursts.len()
    }

    pub fn bursts(&self) -> &[AshBurst] {
        &self.bursts
    }

    pub fn max_age(&self) -> f32 {
        self.max_age
    }

    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }
}
