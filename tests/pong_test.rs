//! Tests for Rosé Pong throws and turn flow.

mod common;

use std::time::Duration;

use common::ScriptedOpponent;
use kenny_games::tuning::{CUPS_PER_RACK, MAX_POWER, TRAJECTORY_STEPS};
use kenny_games::{Point, PongGame, PongPhase, Swipe, TurnOwner};

const FLIGHT: Duration = Duration::from_millis(1000);
const FULL_EXCHANGE: Duration = Duration::from_millis(1000 + 500 + 1000 + 800);

fn on_target() -> Swipe {
    Swipe::from_launch(0.0, -40.0)
}

fn game(opponent: ScriptedOpponent) -> PongGame {
    PongGame::new(Box::new(opponent), Some(5))
}

#[test]
fn test_short_swipe_is_ignored() {
    let mut pong = game(ScriptedOpponent::harmless());
    assert!(!pong.throw(Swipe::from_launch(3.0, -3.0)));
    assert_eq!(*pong.phase(), PongPhase::Aiming);
    assert_eq!(*pong.state().attempts_remaining(), 1);
}

#[test]
fn test_power_is_length_over_fifty_capped() {
    let swipe = Swipe::new(Point::new(50.0, 80.0), Point::new(50.0, 55.0));
    assert!((swipe.power() - 0.5).abs() < 1e-9);
    let long = Swipe::new(Point::new(0.0, 100.0), Point::new(0.0, 0.0));
    assert_eq!(long.power(), MAX_POWER);
}

#[test]
fn test_hit_window() {
    assert!(on_target().is_on_target());
    // Power exactly 0.5 is outside the open window.
    assert!(!Swipe::from_launch(0.0, -25.0).is_on_target());
    // Too strong.
    assert!(!Swipe::from_launch(0.0, -65.0).is_on_target());
    // Leaning far right.
    assert!(!Swipe::from_launch(30.0, -30.0).is_on_target());
    // Slight lean still lands.
    assert!(Swipe::from_launch(8.0, -40.0).is_on_target());
}

#[test]
fn test_trajectory_has_one_point_per_step() {
    let path = on_target().trajectory();
    assert_eq!(path.len(), TRAJECTORY_STEPS + 1);
}

#[test]
fn test_hit_knocks_one_opponent_cup() {
    let mut pong = game(ScriptedOpponent::harmless());
    assert!(pong.throw(on_target()));
    assert!(pong.ball_position().is_some());
    assert!(!pong.throw(on_target()));

    pong.tick(FLIGHT);
    assert!(matches!(pong.phase(), PongPhase::Settling { .. }));
    assert_eq!(*pong.state().my_score(), 1);
    assert_eq!(pong.opponent_rack().standing().len(), CUPS_PER_RACK - 1);
    assert_eq!(pong.my_rack().standing().len(), CUPS_PER_RACK);
}

#[test]
fn test_miss_scores_nothing() {
    let mut pong = game(ScriptedOpponent::harmless());
    assert!(pong.throw(Swipe::from_launch(30.0, -30.0)));
    pong.tick(FLIGHT);
    assert_eq!(*pong.state().my_score(), 0);
    assert_eq!(pong.opponent_rack().standing().len(), CUPS_PER_RACK);
}

#[test]
fn test_exchange_returns_to_player() {
    let mut pong = game(ScriptedOpponent::deadly());
    pong.throw(on_target());
    pong.tick(Duration::from_millis(1500));
    assert!(matches!(pong.phase(), PongPhase::OpponentWindup { .. }));
    assert_eq!(*pong.state().turn_owner(), TurnOwner::Opponent);

    pong.tick(Duration::from_millis(1000));
    assert_eq!(*pong.state().opponent_score(), 1);
    assert!(pong.my_rack().cups()[0].hit);
    assert_eq!(pong.my_rack().standing().len(), CUPS_PER_RACK - 1);

    pong.tick(Duration::from_millis(800));
    assert_eq!(*pong.phase(), PongPhase::Aiming);
    assert_eq!(*pong.state().round(), 2);
    assert_eq!(*pong.state().turn_owner(), TurnOwner::Player);
}

#[test]
fn test_clearing_the_rack_finishes() {
    let mut pong = game(ScriptedOpponent::harmless());
    for _ in 0..CUPS_PER_RACK {
        assert!(pong.throw(on_target()));
        pong.tick(FULL_EXCHANGE);
    }
    assert_eq!(*pong.phase(), PongPhase::Finished);
    assert!(pong.opponent_rack().is_cleared());
    assert_eq!(*pong.state().my_score(), CUPS_PER_RACK as u32);
    assert!(!pong.throw(on_target()));
}

#[test]
fn test_opponent_can_win() {
    let mut pong = game(ScriptedOpponent::deadly());
    for _ in 0..CUPS_PER_RACK {
        if *pong.phase() == PongPhase::Finished {
            break;
        }
        pong.throw(Swipe::from_launch(30.0, -30.0));
        pong.tick(FULL_EXCHANGE);
    }
    assert_eq!(*pong.phase(), PongPhase::Finished);
    assert!(pong.my_rack().is_cleared());
    assert_eq!(pong.state().leader(), Some(TurnOwner::Opponent));
}

#[test]
fn test_abandon_cancels_pending_transitions() {
    let mut pong = game(ScriptedOpponent::deadly());
    pong.throw(on_target());
    pong.abandon();
    pong.tick(Duration::from_secs(30));
    assert_eq!(*pong.phase(), PongPhase::Abandoned);
    assert_eq!(*pong.state().my_score(), 0);
    assert_eq!(pong.my_rack().standing().len(), CUPS_PER_RACK);
}
