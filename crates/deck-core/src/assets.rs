//! Face images, asset requests and procedural fallbacks.

use crate::constants::PLACEHOLDER_SIZE;
use crate::content::CardInfo;
use crate::deck::CardId;

/// A resolved image resource handed back by an asset loader.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageHandle {
    pub reference: String,
    pub byte_len: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProceduralKind {
    CardBack,
    CardFront { title: String, subtitle: String },
}

/// Description of a generated substitute image; the renderer decides how to draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct ProceduralImage {
    pub kind: ProceduralKind,
    pub size: [u32; 2],
    pub background: [f32; 3],
    pub ink: [f32; 3],
}

impl ProceduralImage {
    /// Dark field, gold border and a circle.
    pub fn card_back() -> Self {
        Self {
            kind: ProceduralKind::CardBack,
            size: PLACEHOLDER_SIZE,
            background: [0.039, 0.039, 0.039],
            ink: [0.651, 0.486, 0.0],
        }
    }

    /// Parchment with the card's name and category.
    pub fn card_front(info: &CardInfo) -> Self {
        Self {
            kind: ProceduralKind::CardFront {
                title: info.name.clone(),
                subtitle: info.category.clone(),
            },
            size: PLACEHOLDER_SIZE,
            background: [0.961, 0.941, 0.882],
            ink: [0.067, 0.067, 0.067],
        }
    }

    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            ProceduralKind::CardFront { title, .. } => Some(title),
            ProceduralKind::CardBack => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FaceImage {
    #[default]
    Blank,
    Procedural(ProceduralImage),
    Loaded(ImageHandle),
}

impl FaceImage {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, FaceImage::Procedural(_))
    }
}

/// What a loaded image is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetTarget {
    CardBack,
    Front(CardId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssetRequest {
    pub target: AssetTarget,
    pub reference: String,
}
