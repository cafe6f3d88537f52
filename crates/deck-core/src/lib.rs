pub mod assets;
pub mod backdrop;
pub mod camera;
pub mod constants;
pub mod content;
pub mod deck;
pub mod error;
pub mod gesture;
pub mod hud;
pub mod inbox;
pub mod layout;
pub mod particles;
pub mod picking;
pub mod session;
pub mod tween;

// Shaders bundled as string constants
pub static SPRITE_WGSL: &str = include_str!("../shaders/sprite.wgsl");
pub static ASH_WGSL: &str = include_str!("../shaders/ash.wgsl");

pub use assets::*;
pub use camera::{Camera, CursorMarker, Ray};
pub use constants::*;
pub use content::{tarot_deck, CardInfo};
pub use deck::{CardEntity, CardId, Deck, FaceSide, PartId, Transform};
pub use error::{AssetError, InputError};
pub use gesture::*;
pub use hud::{DetailPanel, Hud, Notice};
pub use inbox::{InboxMessage, InboxSender};
pub use session::*;
