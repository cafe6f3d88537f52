//! Timed animation tasks and deferred cues, advanced from one scheduler.

use crate::deck::{CardId, Deck};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    CubicOut,
    BackOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::BackOut => {
                const S: f32 = 1.70158;
                let u = t - 1.0;
                u * u * ((S + 1.0) * u + S) + 1.0
            }
        }
    }
}

/// Which transform field a tween drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Position,
    Rotation,
}

#[derive(Clone, Debug)]
pub struct Tween {
    pub card: CardId,
    pub channel: Channel,
    pub from: Vec3,
    pub to: Vec3,
    pub start: f64,
    pub duration: f32,
    pub easing: Easing,
}

impl Tween {
    fn value_at(&self, now: f64) -> (Vec3, bool) {
        if self.duration <= 0.0 {
            return (self.to, true);
        }
        let t = ((now - self.start) / self.duration as f64) as f32;
        if t >= 1.0 {
            return (self.to, true);
        }
        (self.from.lerp(self.to, self.easing.apply(t)), false)
    }
}

/// Deferred session actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    ShowDetails(CardId),
    ReturnToBrowsing,
    ClearNotice,
}

impl Cue {
    fn card(self) -> Option<CardId> {
        match self {
            Cue::ShowDetails(card) => Some(card),
            Cue::ReturnToBrowsing | Cue::ClearNotice => None,
        }
    }
}

#[derive(Default)]
pub struct Timeline {
    tweens: Vec<Tween>,
    cues: Vec<(f64, Cue)>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween from the card's current value of `channel`.
    pub fn animate(
        &mut self,
        deck: &Deck,
        card: CardId,
        channel: Channel,
        to: Vec3,
        now: f64,
        duration: f32,
        easing: Easing,
    ) {
        let Some(entity) = deck.get(card) else {
            return;
        };
        let from = match channel {
            Channel::Position => entity.transform.position,
            Channel::Rotation => entity.transform.rotation,
        };
        self.tweens.push(Tween {
            card,
            channel,
            from,
            to,
            start: now,
            duration,
            easing,
        });
    }

    pub fn schedule(&mut self, due: f64, cue: Cue) {
        self.cues.push((due, cue));
    }

    /// Drop every tween and cue that targets `card`.
    pub fn cancel_card(&mut self, card: CardId) {
        self.tweens.retain(|tw| tw.card != card);
        self.cues.retain(|(_, cue)| cue.card() != Some(card));
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty() && self.cues.is_empty()
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn pending(&self, cue: Cue) -> bool {
        self.cues.iter().any(|(_, c)| *c == cue)
    }

    /// Write tweened values into the deck and return the cues now due, in schedule order.
    pub fn advance(&mut self, now: f64, deck: &mut Deck) -> SmallVec<[Cue; 4]> {
        self.tweens.retain(|tw| {
            let Some(card) = deck.get_mut(tw.card) else {
                return false;
            };
            let (value, done) = tw.value_at(now);
            match tw.channel {
                Channel::Position => card.transform.position = value,
                Channel::Rotation => card.transform.rotation = value,
            }
            !done
        });

        let mut fired = SmallVec::new();
        self.cues.retain(|(due, cue)| {
            if *due <= now {
                fired.push(*cue);
                false
            } else {
                true
            }
        });
        fired
    }
}
