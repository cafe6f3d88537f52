//! The interaction state machine and everything it drives.
//!
//! A [`Session`] owns one deck and all per-session state. Frontends feed it
//! through an [`InboxSender`], call [`Session::tick`] once per frame and read
//! the results back through the accessors.

use crate::assets::{AssetRequest, AssetTarget, FaceImage, ImageHandle, ProceduralImage};
use crate::backdrop::Starfield;
use crate::camera::{Camera, CursorMarker};
use crate::constants::*;
use crate::content::{resolve_image_ref, CardInfo};
use crate::deck::{CardId, Deck};
use crate::error::AssetError;
use crate::gesture::{GestureAdapter, GestureClass, GestureSignal, GestureTuning, InputMode};
use crate::hud::{DetailPanel, Hud, Notice};
use crate::inbox::{Inbox, InboxMessage, InboxSender};
use crate::layout::{apply_layout, scroll_limit, steer_delta, ScrollState};
use crate::particles::AshField;
use crate::picking;
use crate::tween::{Channel, Cue, Easing, Timeline};
use glam::{Vec2, Vec3};
use rand::prelude::*;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionState {
    Browsing,
    Focusing,
    Revealed,
    Burning,
}

#[derive(Clone, Debug)]
pub struct DeckParams {
    pub spacing: f32,
    pub scroll_margin: f32,
    pub scroll_smoothing: f32,
    pub scroll_speed: f32,
    pub steer_gain: f32,
    pub steer_deadzone: f32,
    pub cursor_smoothing: f32,
    pub reveal_sec: f32,
    pub dismiss_sec: f32,
    pub detail_delay_sec: f32,
    pub burn_recovery_sec: f32,
    pub notice_sec: f32,
    pub ash_point_count: usize,
    pub ash_max_age: f32,
    pub star_count: usize,
    pub reversed_chance: f64,
    pub gesture: GestureTuning,
}

impl Default for DeckParams {
    fn default() -> Self {
        Self {
            spacing: CARD_SPACING,
            scroll_margin: SCROLL_MARGIN,
            scroll_smoothing: SCROLL_SMOOTHING,
            scroll_speed: SCROLL_SPEED,
            steer_gain: STEER_GAIN,
            steer_deadzone: STEER_DEADZONE,
            cursor_smoothing: CURSOR_SMOOTHING,
            reveal_sec: REVEAL_MOVE_SEC,
            dismiss_sec: DISMISS_SEC,
            detail_delay_sec: DETAIL_DELAY_SEC,
            burn_recovery_sec: BURN_RECOVERY_SEC,
            notice_sec: NOTICE_SEC,
            ash_point_count: ASH_POINT_COUNT,
            ash_max_age: ASH_MAX_AGE,
            star_count: STAR_COUNT,
            reversed_chance: REVERSED_CHANCE,
            gesture: GestureTuning::default(),
        }
    }
}

/// A card the user drew, as a reading request would list it.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub card: CardId,
    pub name: String,
    pub reversed: bool,
}

pub struct Session {
    params: DeckParams,
    camera: Camera,
    deck: Deck,
    state: InteractionState,
    scroll: ScrollState,
    hovered: Option<CardId>,
    revealed: Option<CardId>,
    cursor: CursorMarker,
    gestures: GestureAdapter,
    inbox: Inbox,
    timeline: Timeline,
    ash: AshField,
    stars: Starfield,
    hud: Hud,
    back_image: FaceImage,
    selections: Vec<Selection>,
    outbox: Vec<AssetRequest>,
    clock: f64,
    rng: StdRng,
}

impl Session {
    pub fn new(cards: Vec<CardInfo>, mut params: DeckParams, seed: u64) -> Self {
        let chance = params.reversed_chance;
        if !(0.0..=1.0).contains(&chance) {
            params.reversed_chance = if chance.is_nan() {
                REVERSED_CHANCE
            } else {
                chance.clamp(0.0, 1.0)
            };
            log::warn!(
                "[deck] reversed_chance {chance} outside [0, 1], using {}",
                params.reversed_chance
            );
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::new(cards, params.spacing);
        let limit = scroll_limit(deck.initial_len(), params.spacing, params.scroll_margin);
        let stars = Starfield::new(params.star_count, &mut rng);
        log::info!(
            "[deck] session ready: cards={} scroll_limit=±{:.2}",
            deck.len(),
            limit
        );
        Self {
            camera: Camera::default(),
            state: InteractionState::Browsing,
            scroll: ScrollState::new(limit),
            hovered: None,
            revealed: None,
            cursor: CursorMarker::default(),
            gestures: GestureAdapter::new(params.gesture.clone()),
            inbox: Inbox::new(),
            timeline: Timeline::new(),
            ash: AshField::new(params.ash_point_count, params.ash_max_age),
            stars,
            hud: Hud::new(deck.len()),
            back_image: FaceImage::Procedural(ProceduralImage::card_back()),
            selections: Vec::new(),
            outbox: vec![AssetRequest {
                target: AssetTarget::CardBack,
                reference: CARD_BACK_REF.to_string(),
            }],
            clock: 0.0,
            rng,
            deck,
            params,
        }
    }

    pub fn sender(&self) -> InboxSender {
        self.inbox.sender()
    }

    /// Advance one frame.
    pub fn tick(&mut self, dt: Duration) {
        self.clock += dt.as_secs_f64();
        self.drain_inbox();

        for cue in self.timeline.advance(self.clock, &mut self.deck) {
            self.fire(cue);
        }

        let signal = self.gestures.signal();
        self.cursor
            .follow(signal.pointer, self.params.cursor_smoothing, &self.camera);
        self.update_layout();
        self.handle_gesture(signal);

        self.ash.advance(dt.as_secs_f32());
        self.stars.advance();
    }

    // ---------------- inbox ----------------

    fn drain_inbox(&mut self) {
        let messages: Vec<InboxMessage> = self.inbox.drain().collect();
        for message in messages {
            match message {
                InboxMessage::CameraStarted => {
                    self.gestures.camera_started();
                }
                InboxMessage::CameraFailed(reason) => {
                    if self.gestures.camera_failed(&reason) {
                        self.hud.notice = Some(Notice::PointerFallback);
                        self.timeline.schedule(
                            self.clock + self.params.notice_sec as f64,
                            Cue::ClearNotice,
                        );
                    }
                }
                InboxMessage::Landmarks(hand) => self.gestures.landmarks(hand.as_ref()),
                InboxMessage::Pointer(event) => self.gestures.pointer(event),
                InboxMessage::AssetLoaded { target, result } => self.bind_asset(target, result),
            }
            if self.gestures.mode() == InputMode::Camera && self.hud.notice == Some(Notice::Loading)
            {
                self.hud.notice = None;
            }
        }
    }

    fn bind_asset(&mut self, target: AssetTarget, result: Result<ImageHandle, AssetError>) {
        match target {
            AssetTarget::CardBack => match result {
                Ok(handle) => {
                    log::info!("[assets] card back loaded ({} bytes)", handle.byte_len);
                    self.back_image = FaceImage::Loaded(handle);
                }
                Err(e) => log::warn!("[assets] {e}; keeping procedural card back"),
            },
            AssetTarget::Front(id) => {
                let Some(card) = self.deck.get_mut(id) else {
                    log::debug!("[assets] artwork for removed card {} dropped", id.0);
                    return;
                };
                card.front_image = match result {
                    Ok(handle) => FaceImage::Loaded(handle),
                    Err(e) => {
                        log::warn!("[assets] {e}; drawing placeholder for {}", card.info.name);
                        FaceImage::Procedural(ProceduralImage::card_front(&card.info))
                    }
                };
            }
        }
    }

    fn fire(&mut self, cue: Cue) {
        match cue {
            Cue::ShowDetails(id) => {
                if let Some(card) = self.deck.get(id) {
                    self.hud.detail = Some(DetailPanel::for_card(&card.info, self.clock));
                }
            }
            Cue::ReturnToBrowsing => {
                if self.state == InteractionState::Burning {
                    self.enter_browsing();
                    log::info!("[deck] browsing resumed, {} cards left", self.deck.len());
                }
            }
            Cue::ClearNotice => self.hud.notice = None,
        }
    }

    // ---------------- layout ----------------

    fn update_layout(&mut self) {
        self.scroll.step(self.params.scroll_smoothing);
        let focus = match self.state {
            InteractionState::Browsing => None,
            InteractionState::Focusing => self.hovered,
            InteractionState::Revealed | InteractionState::Burning => return,
        };
        apply_layout(&mut self.deck, self.scroll.current(), focus);
    }

    fn steer(&mut self, steer: f32) {
        let p = &self.params;
        let delta = steer_delta(steer, p.scroll_speed, p.steer_gain, p.steer_deadzone);
        self.scroll.nudge(delta);
    }

    // ---------------- state machine ----------------

    fn handle_gesture(&mut self, signal: GestureSignal) {
        if self.state == InteractionState::Burning {
            return;
        }
        self.hud.active_gesture = signal.class;

        match self.state {
            InteractionState::Browsing | InteractionState::Focusing => match signal.class {
                GestureClass::Open => {
                    self.steer(signal.steer);
                    self.enter_browsing();
                }
                GestureClass::Point | GestureClass::Pinch => {
                    if self.state == InteractionState::Browsing {
                        self.enter_focusing();
                    }
                    self.hovered = self.pick(signal.pointer);
                    if signal.class == GestureClass::Pinch {
                        if let Some(card) = self.hovered {
                            self.reveal(card);
                        }
                    }
                }
                GestureClass::None | GestureClass::Fist => {}
            },
            InteractionState::Revealed => {
                if signal.class == GestureClass::Fist {
                    self.burn();
                }
            }
            InteractionState::Burning => {}
        }
    }

    fn enter_browsing(&mut self) {
        self.state = InteractionState::Browsing;
        self.hovered = None;
        self.cursor.visible = false;
    }

    fn enter_focusing(&mut self) {
        self.state = InteractionState::Focusing;
        self.cursor.visible = true;
    }

    fn reveal(&mut self, id: CardId) {
        if self.state == InteractionState::Revealed {
            return;
        }
        let Some(card) = self.deck.get_mut(id) else {
            return;
        };
        card.turn_face_up();
        let info = card.info.clone();

        self.state = InteractionState::Revealed;
        self.revealed = Some(id);
        self.cursor.visible = false;
        self.hud.fist_icon = true;
        self.hud.burn_hint = true;

        let reversed = self.rng.gen_bool(self.params.reversed_chance);
        self.selections.push(Selection {
            card: id,
            name: info.name.clone(),
            reversed,
        });
        self.outbox.push(AssetRequest {
            target: AssetTarget::Front(id),
            reference: resolve_image_ref(&info.image_ref),
        });

        let now = self.clock;
        let p = &self.params;
        let tl = &mut self.timeline;
        tl.animate(
            &self.deck,
            id,
            Channel::Position,
            reveal_focal_point(),
            now,
            p.reveal_sec,
            Easing::CubicOut,
        );
        tl.animate(
            &self.deck,
            id,
            Channel::Rotation,
            Vec3::ZERO,
            now,
            p.reveal_sec,
            Easing::BackOut,
        );
        let others: Vec<(CardId, Vec3)> = self
            .deck
            .iter()
            .filter(|c| c.id != id)
            .map(|c| (c.id, c.transform.position))
            .collect();
        for (other, pos) in others {
            let away = Vec3::new(pos.x, pos.y, DISMISS_Z);
            tl.animate(
                &self.deck,
                other,
                Channel::Position,
                away,
                now,
                p.dismiss_sec,
                Easing::Linear,
            );
        }
        tl.schedule(now + p.detail_delay_sec as f64, Cue::ShowDetails(id));

        log::info!(
            "[deck] reveal card {} ({}){}",
            id.0,
            info.name,
            if reversed { " reversed" } else { "" }
        );
    }

    fn burn(&mut self) {
        if self.state == InteractionState::Burning {
            return;
        }
        let Some(id) = self.revealed.take() else {
            return;
        };
        self.state = InteractionState::Burning;
        self.timeline.cancel_card(id);
        if let Some(card) = self.deck.remove(id) {
            self.ash.spawn(card.transform.position, &mut self.rng);
            log::info!("[deck] burned card {} ({})", id.0, card.info.name);
        }
        self.hovered = None;
        self.hud.detail = None;
        self.hud.burn_hint = false;
        self.hud.fist_icon = false;
        self.hud.deck_count = self.deck.len();
        self.timeline.schedule(
            self.clock + self.params.burn_recovery_sec as f64,
            Cue::ReturnToBrowsing,
        );
    }

    // ---------------- queries ----------------

    /// Card under a pointer in normalized device coordinates.
    pub fn pick(&self, pointer: Vec2) -> Option<CardId> {
        picking::pick(&self.deck, &self.camera, pointer).map(|hit| hit.card)
    }

    /// Set the scroll target directly (clamped like gesture scrolling).
    pub fn scroll_to(&mut self, target: f32) {
        self.scroll.set_target(target);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    /// Asset loads requested since the last call.
    pub fn take_asset_requests(&mut self) -> Vec<AssetRequest> {
        std::mem::take(&mut self.outbox)
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hovered(&self) -> Option<CardId> {
        self.hovered
    }

    pub fn revealed(&self) -> Option<CardId> {
        self.revealed
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn cursor(&self) -> &CursorMarker {
        &self.cursor
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn gesture(&self) -> GestureSignal {
        self.gestures.signal()
    }

    pub fn input_mode(&self) -> InputMode {
        self.gestures.mode()
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// Current opacity of the detail panel, 0 while hidden.
    pub fn detail_opacity(&self) -> f32 {
        self.hud
            .detail
            .as_ref()
            .map_or(0.0, |d| d.opacity(self.clock))
    }

    pub fn ash(&self) -> &AshField {
        &self.ash
    }

    pub fn stars(&self) -> &Starfield {
        &self.stars
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn back_image(&self) -> &FaceImage {
        &self.back_image
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn params(&self) -> &DeckParams {
        &self.params
    }

    /// Seconds of session time elapsed.
    pub fn clock(&self) -> f64 {
        self.clock
    }
}
