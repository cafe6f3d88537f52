use crate::camera::{Camera, Ray};
use crate::constants::{CARD_HEIGHT, CARD_WIDTH};
use crate::deck::{CardId, Deck, PartId};
use glam::{Mat4, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub card: CardId,
    pub part: PartId,
    pub distance: f32,
}

/// Distance along `ray` to a `size`-sized rectangle centred in the local XY plane of `model`.
#[inline]
pub fn ray_rect(ray: &Ray, model: &Mat4, size: Vec2) -> Option<f32> {
    let inv = model.inverse();
    let o = inv.transform_point3(ray.origin);
    let d = inv.transform_vector3(ray.dir);
    if d.z.abs() <= 1e-8 {
        return None;
    }
    // t is measured in world units because `d` keeps the world parameterisation
    let t = -o.z / d.z;
    if t < 0.0 {
        return None;
    }
    let p = o + d * t;
    let half = size * 0.5;
    (p.x.abs() <= half.x && p.y.abs() <= half.y).then_some(t)
}

/// Nearest card part under `ray`.
pub fn pick_ray(deck: &Deck, ray: &Ray) -> Option<PickHit> {
    let size = Vec2::new(CARD_WIDTH, CARD_HEIGHT);
    let mut best = None::<(PartId, f32)>;
    for card in deck.iter() {
        for part in card.parts() {
            if let Some(t) = ray_rect(ray, &part.matrix(&card.transform), size) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((part.id, t)),
                }
            }
        }
    }
    let (part, distance) = best?;
    let card = deck.owner_of(part)?;
    Some(PickHit {
        card,
        part,
        distance,
    })
}

/// Card under a pointer given in normalized device coordinates.
pub fn pick(deck: &Deck, camera: &Camera, pointer: Vec2) -> Option<PickHit> {
    pick_ray(deck, &camera.ray_through(pointer))
}
