use crate::constants::{STAR_FIELD_CENTER_Z, STAR_FIELD_EXTENT, STAR_SPIN_PER_TICK};
use glam::{Quat, Vec3};
use rand::Rng;

/// Slowly turning field of background stars.
pub struct Starfield {
    stars: Vec<Vec3>,
    rotation_y: f32,
}

impl Starfield {
    pub fn new<R: Rng>(count: usize, rng: &mut R) -> Self {
        let [w, h, d] = STAR_FIELD_EXTENT;
        let stars = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * w,
                    (rng.gen::<f32>() - 0.5) * h,
                    (rng.gen::<f32>() - 0.5) * d + STAR_FIELD_CENTER_Z,
                )
            })
            .collect();
        Self {
            stars,
            rotation_y: 0.0,
        }
    }

    pub fn advance(&mut self) {
        self.rotation_y = (self.rotation_y + STAR_SPIN_PER_TICK) % std::f32::consts::TAU;
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Star positions with the current spin applied.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        let spin = Quat::from_rotation_y(self.rotation_y);
        self.stars.iter().map(move |p| spin * *p)
    }
}
