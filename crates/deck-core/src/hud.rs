//! Heads-up display state the frontend mirrors into its UI.

use crate::constants::DETAIL_FADE_SEC;
use crate::content::CardInfo;
use crate::gesture::GestureClass;

#[derive(Clone, Debug, PartialEq)]
pub struct DetailPanel {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    /// Session clock when the panel appeared.
    pub shown_at: f64,
}

impl DetailPanel {
    pub fn for_card(info: &CardInfo, shown_at: f64) -> Self {
        Self {
            title: info.name.clone(),
            subtitle: info.category.clone(),
            description: info.description.clone(),
            shown_at,
        }
    }

    /// Fade-in opacity at session time `clock`, 0 when shown and 1 once settled.
    pub fn opacity(&self, clock: f64) -> f32 {
        (((clock - self.shown_at) / DETAIL_FADE_SEC as f64) as f32).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Waiting for the camera to come up.
    Loading,
    /// Camera failed; mouse controls are in use.
    PointerFallback,
}

impl Notice {
    pub fn text(self) -> &'static str {
        match self {
            Notice::Loading => "Starting camera…",
            Notice::PointerFallback => {
                "Camera unavailable, mouse mode: move to browse · click to draw · right-click to burn"
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Hud {
    pub deck_count: usize,
    pub detail: Option<DetailPanel>,
    pub burn_hint: bool,
    pub fist_icon: bool,
    pub active_gesture: GestureClass,
    pub notice: Option<Notice>,
}

impl Hud {
    pub fn new(deck_count: usize) -> Self {
        Self {
            deck_count,
            detail: None,
            burn_hint: false,
            fist_icon: false,
            active_gesture: GestureClass::None,
            notice: Some(Notice::Loading),
        }
    }

    pub fn deck_label(&self) -> String {
        format!("CARDS: {}", self.deck_count)
    }
}
