//! Card entities and the deck that owns them.

use crate::assets::FaceImage;
use crate::constants::{FRONT_FACE_REST_Z, FRONT_FACE_REVEALED_Z};
use crate::content::CardInfo;
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Quat, Vec3};
use smallvec::SmallVec;

/// Stable card identity: the card's index in the content table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

/// Identity of one pickable visual part of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PartId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles applied in XYZ order.
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

#[derive(Clone, Debug)]
pub struct FacePart {
    pub id: PartId,
    /// Depth offset in the card's local frame.
    pub offset_z: f32,
    pub visible: bool,
}

impl FacePart {
    pub fn matrix(&self, card: &Transform) -> Mat4 {
        card.matrix() * Mat4::from_translation(Vec3::new(0.0, 0.0, self.offset_z))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceSide {
    Back,
    Front,
}

#[derive(Clone, Debug)]
pub struct CardEntity {
    pub id: CardId,
    pub info: CardInfo,
    pub base_offset: f32,
    pub transform: Transform,
    pub back: FacePart,
    pub front: FacePart,
    pub front_image: FaceImage,
}

impl CardEntity {
    pub fn side(&self) -> FaceSide {
        if self.back.visible {
            FaceSide::Back
        } else {
            FaceSide::Front
        }
    }

    pub fn parts(&self) -> [&FacePart; 2] {
        [&self.back, &self.front]
    }

    /// Hide the back and bring the front forward.
    pub fn turn_face_up(&mut self) {
        self.back.visible = false;
        self.front.offset_z = FRONT_FACE_REVEALED_Z;
    }
}

/// Ordered cards, shrinking only by removal.
///
/// Keeps an explicit index from every part to its owning card so hit tests
/// never have to walk a scene graph.
pub struct Deck {
    cards: Vec<CardEntity>,
    owners: FnvHashMap<PartId, CardId>,
    initial_len: usize,
}

impl Deck {
    pub fn new(infos: Vec<CardInfo>, spacing: f32) -> Self {
        let count = infos.len();
        let half = count as f32 / 2.0;
        let mut owners = FnvHashMap::default();
        let mut cards = Vec::with_capacity(count);
        for (i, info) in infos.into_iter().enumerate() {
            let id = CardId(i);
            let back = PartId((i * 2) as u32);
            let front = PartId((i * 2 + 1) as u32);
            owners.insert(back, id);
            owners.insert(front, id);
            let base_offset = (i as f32 - half) * spacing;
            cards.push(CardEntity {
                id,
                info,
                base_offset,
                transform: Transform {
                    position: Vec3::new(base_offset, 0.0, 0.0),
                    ..Transform::default()
                },
                back: FacePart {
                    id: back,
                    offset_z: 0.0,
                    visible: true,
                },
                front: FacePart {
                    id: front,
                    offset_z: FRONT_FACE_REST_Z,
                    visible: true,
                },
                front_image: FaceImage::Blank,
            });
        }
        Self {
            cards,
            owners,
            initial_len: count,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card count at creation; the scroll range is derived from it.
    pub fn initial_len(&self) -> usize {
        self.initial_len
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardEntity> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardEntity> {
        self.cards.iter_mut()
    }

    fn position(&self, id: CardId) -> Option<usize> {
        // ids are creation indices and removal preserves order
        self.cards.binary_search_by_key(&id, |c| c.id).ok()
    }

    pub fn get(&self, id: CardId) -> Option<&CardEntity> {
        self.position(id).map(|i| &self.cards[i])
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut CardEntity> {
        self.position(id).map(move |i| &mut self.cards[i])
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.position(id).is_some()
    }

    pub fn owner_of(&self, part: PartId) -> Option<CardId> {
        self.owners.get(&part).copied()
    }

    pub fn parts_of(&self, id: CardId) -> SmallVec<[PartId; 2]> {
        self.get(id)
            .map(|c| c.parts().iter().map(|p| p.id).collect())
            .unwrap_or_default()
    }

    /// Remove a card for good, dropping its parts from the index.
    pub fn remove(&mut self, id: CardId) -> Option<CardEntity> {
        let index = self.position(id)?;
        let card = self.cards.remove(index);
        for part in card.parts() {
            self.owners.remove(&part.id);
        }
        Some(card)
    }
}
