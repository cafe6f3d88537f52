//! The card table the deck is built from.
//!
//! The engine treats this as read-only data injected at session creation;
//! [`tarot_deck`] supplies the standard 78-card Rider–Waite–Smith table.

use crate::constants::IMAGE_BASE_URL;

/// Descriptive payload of one card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardInfo {
    pub name: String,
    pub category: String,
    pub description: String,
    pub image_ref: String,
}

pub const MAJOR_ARCANA: &str = "Major Arcana";
pub const MINOR_ARCANA: &str = "Minor Arcana";

// (name, keywords, image path under the commons base)
const MAJORS: [(&str, &str, &str); 22] = [
    ("The Fool", "New beginnings · adventure · innocence", "9/90/RWS_Tarot_00_Fool.jpg"),
    ("The Magician", "Creativity · will · manifestation", "d/de/RWS_Tarot_01_Magician.jpg"),
    ("The High Priestess", "Intuition · mystery · the unconscious", "8/88/RWS_Tarot_02_High_Priestess.jpg"),
    ("The Empress", "Abundance · nature · nurture", "d/d2/RWS_Tarot_03_Empress.jpg"),
    ("The Emperor", "Authority · structure · control", "c/c3/RWS_Tarot_04_Emperor.jpg"),
    ("The Hierophant", "Tradition · belief · teaching", "8/8d/RWS_Tarot_05_Hierophant.jpg"),
    ("The Lovers", "Love · harmony · choice", "3/3a/TheLovers.jpg"),
    ("The Chariot", "Victory · willpower · discipline", "9/9b/RWS_Tarot_07_Chariot.jpg"),
    ("Strength", "Courage · patience · compassion", "f/f5/RWS_Tarot_08_Strength.jpg"),
    ("The Hermit", "Introspection · solitude · guidance", "4/4d/RWS_Tarot_09_Hermit.jpg"),
    ("Wheel of Fortune", "Cycles · change · luck", "3/3c/RWS_Tarot_10_Wheel_of_Fortune.jpg"),
    ("Justice", "Fairness · truth · cause and effect", "e/e0/RWS_Tarot_11_Justice.jpg"),
    ("The Hanged Man", "Sacrifice · new perspective · letting go", "2/2b/RWS_Tarot_12_Hanged_Man.jpg"),
    ("Death", "Endings · transformation · rebirth", "d/d7/RWS_Tarot_13_Death.jpg"),
    ("Temperance", "Balance · moderation · blending", "f/f8/RWS_Tarot_14_Temperance.jpg"),
    ("The Devil", "Bondage · desire · temptation", "5/55/RWS_Tarot_15_Devil.jpg"),
    ("The Tower", "Upheaval · chaos · awakening", "5/53/RWS_Tarot_16_Tower.jpg"),
    ("The Star", "Hope · inspiration · healing", "d/db/RWS_Tarot_17_Star.jpg"),
    ("The Moon", "Illusion · unease · the unconscious", "7/7f/RWS_Tarot_18_Moon.jpg"),
    ("The Sun", "Joy · success · vitality", "1/17/RWS_Tarot_19_Sun.jpg"),
    ("Judgement", "Renewal · awakening · calling", "d/dd/RWS_Tarot_20_Judgement.jpg"),
    ("The World", "Completion · integration · fulfilment", "f/ff/RWS_Tarot_21_World.jpg"),
];

// (suit, keywords, file-name stem)
const SUITS: [(&str, &str, &str); 4] = [
    ("Wands", "Action · fire", "Wands"),
    ("Cups", "Emotion · water", "Cups"),
    ("Swords", "Thought · air", "Swords"),
    ("Pentacles", "Material · earth", "Pents"),
];

// (rank, meaning)
const RANKS: [(&str, &str); 14] = [
    ("Ace", "a fresh start"),
    ("2", "balance and decision"),
    ("3", "collaboration"),
    ("4", "stability"),
    ("5", "conflict"),
    ("6", "victory"),
    ("7", "perseverance"),
    ("8", "change"),
    ("9", "resilience"),
    ("10", "completion"),
    ("Page", "curiosity"),
    ("Knight", "action"),
    ("Queen", "understanding"),
    ("King", "mastery"),
];

/// The full 78-card table: the Major Arcana in order, then each suit Ace to King.
pub fn tarot_deck() -> Vec<CardInfo> {
    let majors = MAJORS.iter().map(|(name, keywords, path)| CardInfo {
        name: (*name).to_string(),
        category: MAJOR_ARCANA.to_string(),
        description: (*keywords).to_string(),
        image_ref: (*path).to_string(),
    });
    let minors = SUITS.iter().flat_map(|(suit, keywords, stem)| {
        RANKS.iter().map(move |(rank, meaning)| CardInfo {
            name: format!("{rank} of {suit}"),
            category: MINOR_ARCANA.to_string(),
            description: format!("{keywords} · {meaning}"),
            image_ref: format!("RWS_Tarot_{stem}_{rank}.jpg"),
        })
    });
    majors.chain(minors).collect()
}

/// Turn a card's image reference into something an asset loader can fetch.
///
/// Absolute URLs pass through; anything else is a path under the commons base.
pub fn resolve_image_ref(path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{IMAGE_BASE_URL}{path}")
    }
}
