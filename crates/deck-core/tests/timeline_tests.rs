// Host-side tests for easing, the animation timeline and ash bookkeeping.

use deck_core::particles::AshField;
use deck_core::tween::*;
use deck_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn small_deck() -> Deck {
    Deck::new(tarot_deck().into_iter().take(3).collect(), CARD_SPACING)
}

#[test]
fn easings_start_at_zero_and_end_at_one() {
    for easing in [Easing::Linear, Easing::CubicOut, Easing::BackOut] {
        assert!(easing.apply(0.0).abs() < 1e-5, "{easing:?} at 0");
        assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        // clamped outside the unit range
        assert_eq!(easing.apply(2.0), easing.apply(1.0));
    }
    assert!(Easing::CubicOut.apply(0.5) > 0.5);
    // back-out overshoots before settling
    assert!(Easing::BackOut.apply(0.8) > 1.0);
}

#[test]
fn tween_lands_exactly_on_target() {
    let mut deck = small_deck();
    let mut tl = Timeline::new();
    let to = Vec3::new(1.0, 2.0, 3.0);
    tl.animate(&deck, CardId(1), Channel::Position, to, 0.0, 1.0, Easing::CubicOut);
    assert_eq!(tl.tween_count(), 1);

    tl.advance(0.5, &mut deck);
    let mid = deck.get(CardId(1)).unwrap().transform.position;
    assert!(mid != to);
    tl.advance(1.0, &mut deck);
    assert_eq!(deck.get(CardId(1)).unwrap().transform.position, to);
    assert!(tl.is_idle());
}

#[test]
fn tween_for_removed_card_is_dropped() {
    let mut deck = small_deck();
    let mut tl = Timeline::new();
    tl.animate(&deck, CardId(2), Channel::Rotation, Vec3::ONE, 0.0, 1.0, Easing::Linear);
    deck.remove(CardId(2));
    tl.advance(0.25, &mut deck);
    assert_eq!(tl.tween_count(), 0);
}

#[test]
fn cues_fire_once_in_order_when_due() {
    let mut deck = small_deck();
    let mut tl = Timeline::new();
    tl.schedule(1.0, Cue::ShowDetails(CardId(0)));
    tl.schedule(0.5, Cue::ClearNotice);
    tl.schedule(2.0, Cue::ReturnToBrowsing);

    assert!(tl.advance(0.25, &mut deck).is_empty());
    let fired = tl.advance(1.0, &mut deck);
    assert_eq!(fired.as_slice(), &[Cue::ShowDetails(CardId(0)), Cue::ClearNotice]);
    assert!(tl.advance(1.5, &mut deck).is_empty());
    assert_eq!(tl.advance(2.0, &mut deck).as_slice(), &[Cue::ReturnToBrowsing]);
    assert!(tl.is_idle());
}

#[test]
fn cancel_card_drops_its_tweens_and_cues_only() {
    let deck = small_deck();
    let mut tl = Timeline::new();
    tl.animate(&deck, CardId(0), Channel::Position, Vec3::ONE, 0.0, 1.0, Easing::Linear);
    tl.animate(&deck, CardId(1), Channel::Position, Vec3::ONE, 0.0, 1.0, Easing::Linear);
    tl.schedule(1.0, Cue::ShowDetails(CardId(0)));
    tl.schedule(2.0, Cue::ReturnToBrowsing);

    tl.cancel_card(CardId(0));
    assert_eq!(tl.tween_count(), 1);
    assert!(!tl.pending(Cue::ShowDetails(CardId(0))));
    assert!(tl.pending(Cue::ReturnToBrowsing));
}

#[test]
fn ash_bursts_retire_after_max_age() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut ash = AshField::new(200, ASH_MAX_AGE);
    ash.spawn(Vec3::new(0.0, 0.0, 7.0), &mut rng);

    let burst = &ash.bursts()[0];
    assert_eq!(burst.points.len(), 200);
    for p in &burst.points {
        assert!(p.offset.x.abs() <= CARD_WIDTH / 2.0);
        assert!(p.offset.y.abs() <= CARD_HEIGHT / 2.0);
        assert!(p.color == ASH_GOLD || p.color == ASH_GREY);
        assert!((0.0..1.0).contains(&p.seed));
    }

    // ten quarter-second steps reach exactly the max age
    for _ in 0..10 {
        assert_eq!(ash.advance(0.25), 0);
    }
    assert_eq!(ash.bursts().len(), 1);
    assert_eq!(ash.advance(0.25), 1);
    assert!(ash.is_empty());
}

#[test]
fn starfield_turns_slowly() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut stars = deck_core::backdrop::Starfield::new(50, &mut rng);
    let before: Vec<Vec3> = stars.positions().collect();
    stars.advance();
    assert!((stars.rotation_y() - STAR_SPIN_PER_TICK).abs() < 1e-9);
    let after: Vec<Vec3> = stars.positions().collect();
    for (a, b) in before.iter().zip(&after) {
        assert!((a.length() - b.length()).abs() < 1e-3);
        assert!((a.y - b.y).abs() < 1e-4);
    }
}
