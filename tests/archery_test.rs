//! Tests for the archery match flow.

mod common;

use std::time::Duration;

use common::ScriptedOpponent;
use kenny_games::tuning::{
    ARCHERY_JITTER, ARCHERY_WIND_MAX, ARCHERY_WIND_MIN, ARROWS_PER_ROUND, ROUNDS,
};
use kenny_games::{
    ArcheryGame, ArcheryPhase, Point, TurnOwner, landing_point, score_for_distance,
};

fn game(opponent: ScriptedOpponent) -> ArcheryGame {
    ArcheryGame::new(Box::new(opponent), Some(99)).with_wind(0)
}

#[test]
fn test_center_aim_without_wind_scores_ten() {
    for seed in 0..20 {
        let mut archery = ArcheryGame::new(Box::new(ScriptedOpponent::harmless()), Some(seed))
            .with_wind(0);
        assert!(archery.release());
        archery.tick(Duration::from_millis(800));
        assert!(matches!(
            archery.phase(),
            ArcheryPhase::ShowingHit { points: 10, .. }
        ));
        assert_eq!(*archery.state().my_score(), 10);
    }
}

#[test]
fn test_scores_always_in_range() {
    for d in 0..200 {
        let points = score_for_distance(f64::from(d) * 0.25);
        assert!(points <= 10);
    }
}

#[test]
fn test_every_landing_scores_in_range() {
    let jitters = [
        (-ARCHERY_JITTER, -ARCHERY_JITTER),
        (-ARCHERY_JITTER, ARCHERY_JITTER),
        (0.0, 0.0),
        (ARCHERY_JITTER, -ARCHERY_JITTER),
        (ARCHERY_JITTER, ARCHERY_JITTER),
    ];
    for x in (0..=100).step_by(5) {
        for y in (0..=100).step_by(5) {
            let aim = Point::clamped(f64::from(x), f64::from(y));
            for wind in [ARCHERY_WIND_MIN, 0, ARCHERY_WIND_MAX] {
                for jitter in jitters {
                    let landing = landing_point(aim, wind, jitter);
                    let points = score_for_distance(landing.distance_to(Point::center()));
                    assert!(points <= 10, "aim {aim:?} wind {wind} jitter {jitter:?}");
                }
            }
        }
    }
}

#[test]
fn test_out_of_range_aim_is_scored_from_clamped_point() {
    let mut archery = ArcheryGame::new(Box::new(ScriptedOpponent::harmless()), Some(4))
        .with_wind(ARCHERY_WIND_MAX);
    archery.aim_at(-400.0, 900.0);
    assert_eq!(archery.aim(), Point::new(0.0, 100.0));
    assert!(archery.release());
    archery.tick(Duration::from_millis(800));
    let landed = archery.arrow().expect("arrow on the target");
    assert!(landed.distance_to(Point::new(3.5, 100.0)) <= ARCHERY_JITTER * 2.0_f64.sqrt());
    assert_eq!(archery.last_hit(), Some(0));
}

#[test]
fn test_release_locks_input_until_hit_clears() {
    let mut archery = game(ScriptedOpponent::harmless());
    assert!(archery.release());
    assert!(!archery.release());
    assert_eq!(*archery.state().attempts_remaining(), ARROWS_PER_ROUND - 1);

    archery.tick(Duration::from_millis(2799));
    assert!(!archery.accepts_input());
    archery.tick(Duration::from_millis(1));
    assert!(archery.accepts_input());
    assert_eq!(archery.arrow(), None);
}

#[test]
fn test_aim_is_clamped() {
    let mut archery = game(ScriptedOpponent::harmless());
    archery.aim_at(150.0, -5.0);
    assert_eq!(archery.aim(), Point::new(100.0, 0.0));
    archery.nudge_aim(-300.0, 30.0);
    assert_eq!(archery.aim(), Point::new(0.0, 30.0));
}

#[test]
fn test_full_match_runs_three_rounds() {
    let mut archery = game(ScriptedOpponent::deadly());
    let mut releases = 0;
    for _ in 0..100 {
        if *archery.phase() == ArcheryPhase::Finished {
            break;
        }
        if archery.release() {
            releases += 1;
        }
        archery.tick(Duration::from_secs(5));
    }
    assert_eq!(*archery.phase(), ArcheryPhase::Finished);
    assert_eq!(releases, ARROWS_PER_ROUND * ROUNDS);
    assert_eq!(*archery.state().round(), ROUNDS);
    assert_eq!(*archery.state().opponent_score(), 20 * ROUNDS);
    assert_eq!(*archery.state().my_score(), 10 * ARROWS_PER_ROUND * ROUNDS);
    assert_eq!(archery.state().leader(), Some(TurnOwner::Player));
    assert!(!archery.release());
}

#[test]
fn test_opponent_volley_waits_for_last_arrow() {
    let mut archery = game(ScriptedOpponent::deadly());
    for _ in 0..ARROWS_PER_ROUND {
        archery.release();
        archery.tick(Duration::from_millis(2800));
    }
    assert!(matches!(archery.phase(), ArcheryPhase::OpponentVolley { .. }));
    assert_eq!(*archery.state().turn_owner(), TurnOwner::Opponent);
    archery.tick(Duration::from_millis(1000));
    assert_eq!(*archery.state().opponent_score(), 20);
    assert_eq!(*archery.state().round(), 2);
    assert_eq!(*archery.state().attempts_remaining(), ARROWS_PER_ROUND);
}

#[test]
fn test_abandon_cancels_pending_transitions() {
    let mut archery = game(ScriptedOpponent::deadly());
    archery.release();
    archery.abandon();
    archery.tick(Duration::from_secs(60));
    assert_eq!(*archery.phase(), ArcheryPhase::Abandoned);
    assert_eq!(*archery.state().my_score(), 0);
    assert!(!archery.release());
}

#[test]
fn test_wind_is_drawn_in_range() {
    for seed in 0..50 {
        let archery = ArcheryGame::new(Box::new(ScriptedOpponent::harmless()), Some(seed));
        assert!((-8..=7).contains(&archery.wind()));
    }
}
