//! Tests for headless simulated matches.

use kenny_games::tuning::{CUPS_PER_RACK, ROUNDS, STARTING_HEALTH};
use kenny_games::{GameId, SIMULATED_OPPONENT, ShipKind, simulate};

#[test]
fn test_archery_plays_every_round() {
    let report = simulate(GameId::Archery, Some(3));
    assert_eq!(*report.rounds(), ROUNDS);
    assert_eq!(report.opponent(), SIMULATED_OPPONENT);
    assert!(*report.my_score() <= ROUNDS * 3 * 10);
}

#[test]
fn test_pong_ends_with_a_cleared_rack() {
    let report = simulate(GameId::Pong, Some(5));
    let cups = CUPS_PER_RACK as u32;
    assert!(*report.my_score() == cups || *report.opponent_score() == cups);
    // Straight swipes at medium power never miss.
    assert_eq!(*report.my_score(), cups);
}

#[test]
fn test_thunder_ends_when_health_runs_out() {
    let report = simulate(GameId::Thunder, Some(8));
    assert!(*report.my_score() <= STARTING_HEALTH);
    assert!(*report.opponent_score() <= STARTING_HEALTH);
    assert!(
        *report.my_score() == STARTING_HEALTH || *report.opponent_score() == STARTING_HEALTH
    );
}

#[test]
fn test_naval_ends_when_a_fleet_is_gone() {
    let fleet: u32 = ShipKind::ALL.iter().map(|s| s.length() as u32).sum();
    let report = simulate(GameId::Naval, Some(11));
    assert!(*report.my_score() == fleet || *report.opponent_score() == fleet);
}

#[test]
fn test_same_seed_same_report() {
    assert_eq!(
        simulate(GameId::Archery, Some(21)),
        simulate(GameId::Archery, Some(21))
    );
}

#[test]
fn test_report_mentions_both_sides() {
    let text = simulate(GameId::Thunder, Some(1)).to_string();
    assert!(text.starts_with("thunder vs Sandy"));
}
