// Host-side tests for the interaction state machine, driven through the inbox
// exactly as a frontend would.

use deck_core::gesture::landmark::{INDEX_TIP, MIDDLE_TIP, THUMB_TIP};
use deck_core::tween::Cue;
use deck_core::*;
use glam::Vec2;
use std::time::Duration;

// a quarter second is exact in binary, so the session clock never drifts
const TICK: Duration = Duration::from_millis(250);
const CENTRE: CardId = CardId(39);

fn session() -> Session {
    Session::new(tarot_deck(), DeckParams::default(), 7)
}

fn pointer_session() -> (Session, InboxSender) {
    pointer_session_with(DeckParams::default())
}

fn pointer_session_with(params: DeckParams) -> (Session, InboxSender) {
    let s = Session::new(tarot_deck(), params, 7);
    let tx = s.sender();
    tx.send(InboxMessage::CameraFailed("no camera in tests".into()));
    (s, tx)
}

fn ticks(s: &mut Session, n: usize) {
    for _ in 0..n {
        s.tick(TICK);
    }
}

/// A pinching hand with the index tip at the middle of the mirrored frame.
fn pinch_at_centre() -> HandLandmarks {
    let mut points = vec![Landmark::new(0.5, 0.8, 0.0); HAND_LANDMARK_COUNT];
    points[INDEX_TIP] = Landmark::new(0.5, 0.5, 0.0);
    points[THUMB_TIP] = Landmark::new(0.52, 0.5, 0.0);
    points[MIDDLE_TIP] = Landmark::new(0.5, 0.3, 0.0);
    HandLandmarks::from_slice(&points).unwrap()
}

/// Hover the centre card, then click it. Returns with the card revealed.
fn reveal_centre(s: &mut Session, tx: &InboxSender) {
    tx.pointer(PointerEvent::Move { x: 0.0, y: 0.0 });
    s.tick(TICK);
    assert_eq!(s.state(), InteractionState::Focusing);
    assert_eq!(s.hovered(), Some(CENTRE));
    tx.pointer(PointerEvent::Down(PointerButton::Primary));
    s.tick(TICK);
    assert_eq!(s.state(), InteractionState::Revealed);
    assert_eq!(s.revealed(), Some(CENTRE));
}

#[test]
fn new_session_is_browsing_full_deck() {
    let mut s = session();
    assert_eq!(s.state(), InteractionState::Browsing);
    assert_eq!(s.deck().len(), 78);
    assert_eq!(s.hud().deck_label(), "CARDS: 78");
    assert_eq!(s.hud().notice, Some(Notice::Loading));
    assert_eq!(s.input_mode(), InputMode::AwaitingCamera);
    assert_eq!(s.stars().len(), STAR_COUNT);
    let requests = s.take_asset_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].target, AssetTarget::CardBack);
    assert_eq!(requests[0].reference, CARD_BACK_REF);
    assert!(s.take_asset_requests().is_empty());
}

#[test]
fn scroll_past_the_end_settles_on_the_clamp() {
    let mut s = session();
    let n = s.deck().len();
    s.scroll_to(-1.0e6);
    let mut gap = (s.scroll().target() - s.scroll().current()).abs();
    for _ in 0..400 {
        s.tick(TICK);
        let next = (s.scroll().target() - s.scroll().current()).abs();
        assert!(next < gap || next == 0.0);
        gap = next;
    }
    assert_eq!(s.state(), InteractionState::Browsing);
    assert_eq!(
        s.scroll().current(),
        -(n as f32 / 2.0 * CARD_SPACING + SCROLL_MARGIN)
    );
}

#[test]
fn pinch_reveals_hovered_card_once() {
    let (mut s, tx) = pointer_session();
    s.take_asset_requests();
    reveal_centre(&mut s, &tx);

    assert!(!s.cursor().visible);
    assert!(s.hud().fist_icon);
    assert!(s.hud().burn_hint);
    assert_eq!(s.deck().get(CENTRE).unwrap().side(), FaceSide::Front);
    assert_eq!(s.selections().len(), 1);
    let requests = s.take_asset_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].target, AssetTarget::Front(CENTRE));

    // a second pinch changes nothing
    tx.pointer(PointerEvent::Up);
    tx.pointer(PointerEvent::Move { x: 0.0, y: 0.0 });
    tx.pointer(PointerEvent::Down(PointerButton::Primary));
    s.tick(TICK);
    assert_eq!(s.state(), InteractionState::Revealed);
    assert_eq!(s.revealed(), Some(CENTRE));
    assert_eq!(s.selections().len(), 1);
    assert!(s.take_asset_requests().is_empty());
}

#[test]
fn pinch_straight_from_browsing_reveals_in_one_tick() {
    let (mut s, tx) = pointer_session();
    assert_eq!(s.state(), InteractionState::Browsing);
    tx.pointer(PointerEvent::Move { x: 0.0, y: 0.0 });
    tx.pointer(PointerEvent::Down(PointerButton::Primary));
    s.tick(TICK);
    assert_eq!(s.state(), InteractionState::Revealed);
    assert_eq!(s.revealed(), Some(CENTRE));
    assert_eq!(s.selections().len(), 1);
}

#[test]
fn pinch_over_empty_space_only_focuses() {
    let (mut s, tx) = pointer_session();
    tx.pointer(PointerEvent::Move { x: 0.0, y: 0.95 });
    tx.pointer(PointerEvent::Down(PointerButton::Primary));
    s.tick(TICK);
    assert_eq!(s.state(), InteractionState::Focusing);
    assert_eq!(s.hovered(), None);
    assert_eq!(s.revealed(), None);
    assert!(s.cursor().visible);
    assert!(s.selections().is_empty());
}

#[test]
fn held_camera_pinch_draws_one_card() {
    let mut s = session();
    let tx = s.sender();
    s.take_asset_requests();
    tx.send(InboxMessage::CameraStarted);
    for _ in 0..6 {
        tx.landmarks(Some(pinch_at_centre()));
        s.tick(TICK);
    }
    assert_eq!(s.input_mode(), InputMode::Camera);
    assert_eq!(s.state(), InteractionState::Revealed);
    assert_eq!(s.revealed(), Some(CENTRE));
    assert_eq!(s.selections().len(), 1);
    let requests = s.take_asset_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].target, AssetTarget::Front(CENTRE));
}

#[test]
fn revealed_card_lands_on_focal_point_and_shows_details() {
    let (mut s, tx) = pointer_session();
    reveal_centre(&mut s, &tx);
    let revealed_at = s.clock();

    ticks(&mut s, 3);
    assert!(s.hud().detail.is_none());
    s.tick(TICK);
    assert_eq!(s.clock(), revealed_at + 1.0);

    let card = s.deck().get(CENTRE).unwrap();
    assert_eq!(card.transform.position, reveal_focal_point());
    assert_eq!(card.transform.rotation, glam::Vec3::ZERO);
    let detail = s.hud().detail.as_ref().unwrap();
    assert_eq!(detail.title, card.info.name);

    for other in s.deck().iter().filter(|c| c.id != CENTRE) {
        assert_eq!(other.transform.position.z, DISMISS_Z);
    }
}

#[test]
fn fist_burns_then_returns_to_browsing_after_delay() {
    let (mut s, tx) = pointer_session();
    reveal_centre(&mut s, &tx);
    let before = s.deck().len();

    tx.pointer(PointerEvent::Down(PointerButton::Secondary));
    s.tick(TICK);
    assert_eq!(s.state(), InteractionState::Burning);
    assert_eq!(s.deck().len(), before - 1);
    assert!(!s.deck().contains(CENTRE));
    assert_eq!(s.revealed(), None);
    assert_eq!(s.hud().deck_count, before - 1);
    assert!(!s.hud().fist_icon && !s.hud().burn_hint);
    assert_eq!(s.ash().bursts().len(), 1);

    // seven more quarter-seconds is 1.75s: still burning, clicks ignored
    tx.pointer(PointerEvent::Down(PointerButton::Primary));
    ticks(&mut s, 7);
    assert_eq!(s.state(), InteractionState::Burning);
    s.tick(TICK);
    assert_eq!(s.state(), InteractionState::Browsing);
    assert_eq!(s.deck().len(), before - 1);
}

#[test]
fn burning_cancels_pending_details() {
    let (mut s, tx) = pointer_session();
    reveal_centre(&mut s, &tx);
    assert!(s.timeline().pending(Cue::ShowDetails(CENTRE)));

    tx.pointer(PointerEvent::Down(PointerButton::Secondary));
    s.tick(TICK);
    assert!(!s.timeline().pending(Cue::ShowDetails(CENTRE)));
    ticks(&mut s, 12);
    assert!(s.hud().detail.is_none());
}

#[test]
fn camera_failure_hands_control_to_the_mouse() {
    let (mut s, tx) = pointer_session();
    tx.pointer(PointerEvent::Move { x: 0.2, y: 0.1 });
    s.tick(TICK);
    assert_eq!(s.input_mode(), InputMode::Pointer);
    assert_eq!(s.gesture().class, GestureClass::Point);
    assert_eq!(s.hud().notice, Some(Notice::PointerFallback));

    let closed: Vec<Landmark> = vec![Landmark::new(0.5, 0.5, 0.0); HAND_LANDMARK_COUNT];
    let fist = HandLandmarks::from_slice(&closed).unwrap();
    tx.send(InboxMessage::CameraStarted);
    tx.landmarks(Some(fist));
    tx.landmarks(None);
    s.tick(TICK);
    assert_eq!(s.input_mode(), InputMode::Pointer);
    assert_eq!(s.gesture().class, GestureClass::Point);
    assert_eq!(s.gesture().pointer, Vec2::new(0.2, 0.1));

    tx.pointer(PointerEvent::Down(PointerButton::Secondary));
    s.tick(TICK);
    assert_eq!(s.gesture().class, GestureClass::Fist);

    // the fallback notice clears itself
    ticks(&mut s, 8);
    assert_eq!(s.hud().notice, None);
}

#[test]
fn camera_start_clears_loading_notice() {
    let mut s = session();
    s.sender().send(InboxMessage::CameraStarted);
    s.tick(TICK);
    assert_eq!(s.input_mode(), InputMode::Camera);
    assert_eq!(s.hud().notice, None);
}

#[test]
fn failed_artwork_gets_named_placeholder_and_details_still_arrive() {
    let (mut s, tx) = pointer_session();
    reveal_centre(&mut s, &tx);
    let name = s.deck().get(CENTRE).unwrap().info.name.clone();

    tx.send(InboxMessage::AssetLoaded {
        target: AssetTarget::Front(CENTRE),
        result: Err(AssetError::NotFound("nope.jpg".into())),
    });
    s.tick(TICK);
    let card = s.deck().get(CENTRE).unwrap();
    assert!(card.front_image.is_placeholder());
    match &card.front_image {
        FaceImage::Procedural(img) => assert_eq!(img.title(), Some(name.as_str())),
        other => panic!("expected placeholder, got {other:?}"),
    }

    ticks(&mut s, 3);
    assert_eq!(s.hud().detail.as_ref().map(|d| d.title.as_str()), Some(name.as_str()));
    assert_eq!(s.deck().get(CENTRE).unwrap().transform.position, reveal_focal_point());
}

#[test]
fn loaded_artwork_and_back_bind() {
    let (mut s, tx) = pointer_session();
    reveal_centre(&mut s, &tx);
    let handle = ImageHandle {
        reference: "front.jpg".into(),
        byte_len: 10,
    };
    tx.send(InboxMessage::AssetLoaded {
        target: AssetTarget::Front(CENTRE),
        result: Ok(handle.clone()),
    });
    tx.send(InboxMessage::AssetLoaded {
        target: AssetTarget::CardBack,
        result: Err(AssetError::NotFound(CARD_BACK_REF.into())),
    });
    s.tick(TICK);
    assert_eq!(s.deck().get(CENTRE).unwrap().front_image, FaceImage::Loaded(handle));
    assert!(s.back_image().is_placeholder());
}

#[test]
fn artwork_for_burned_card_is_dropped() {
    let (mut s, tx) = pointer_session();
    reveal_centre(&mut s, &tx);
    tx.pointer(PointerEvent::Down(PointerButton::Secondary));
    s.tick(TICK);
    tx.send(InboxMessage::AssetLoaded {
        target: AssetTarget::Front(CENTRE),
        result: Ok(ImageHandle {
            reference: "late.jpg".into(),
            byte_len: 1,
        }),
    });
    s.tick(TICK);
    assert!(!s.deck().contains(CENTRE));
    assert_eq!(s.state(), InteractionState::Burning);
}

#[test]
fn open_hand_leaves_focus_and_steers() {
    let (mut s, tx) = pointer_session();
    tx.pointer(PointerEvent::Move { x: 0.0, y: 0.0 });
    s.tick(TICK);
    assert_eq!(s.state(), InteractionState::Focusing);

    tx.pointer(PointerEvent::Move { x: -0.9, y: 0.0 });
    s.tick(TICK);
    assert_eq!(s.state(), InteractionState::Browsing);
    assert_eq!(s.hovered(), None);
    assert!(!s.cursor().visible);
    assert!(s.scroll().target() > 0.0);
}

#[test]
fn pick_is_stable_for_a_still_pointer() {
    let mut s = session();
    s.tick(TICK);
    for p in [Vec2::ZERO, Vec2::new(0.4, 0.1), Vec2::new(-0.5, -0.3)] {
        assert_eq!(s.pick(p), s.pick(p));
    }
    assert_eq!(s.pick(Vec2::ZERO), Some(CENTRE));
}

#[test]
fn same_seed_draws_same_orientation() {
    let run = || {
        let (mut s, tx) = pointer_session();
        reveal_centre(&mut s, &tx);
        s.selections()[0].clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn out_of_range_reversed_chance_is_clamped() {
    let always = DeckParams {
        reversed_chance: 1.5,
        ..DeckParams::default()
    };
    let (mut s, tx) = pointer_session_with(always);
    assert_eq!(s.params().reversed_chance, 1.0);
    reveal_centre(&mut s, &tx);
    assert!(s.selections()[0].reversed);

    let never = DeckParams {
        reversed_chance: -0.5,
        ..DeckParams::default()
    };
    let (mut s, tx) = pointer_session_with(never);
    reveal_centre(&mut s, &tx);
    assert!(!s.selections()[0].reversed);
}

#[test]
fn detail_panel_fades_in() {
    let (mut s, tx) = pointer_session();
    reveal_centre(&mut s, &tx);
    let revealed_at = s.clock();
    assert_eq!(s.detail_opacity(), 0.0);

    ticks(&mut s, 4);
    assert_eq!(s.hud().detail.as_ref().unwrap().shown_at, revealed_at + 1.0);
    assert_eq!(s.detail_opacity(), 0.0);
    s.tick(TICK);
    assert_eq!(s.detail_opacity(), 0.5);
    s.tick(TICK);
    assert_eq!(s.detail_opacity(), 1.0);
    ticks(&mut s, 4);
    assert_eq!(s.detail_opacity(), 1.0);
}
