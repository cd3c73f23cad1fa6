//! Tests for naval placement and battle.

mod common;

use std::time::Duration;

use common::ScriptedOpponent;
use kenny_games::{
    AttackError, Board, CellState, Coord, FleetIntact, GRID_SIZE, Invariant, NavalGame,
    NavalPhase, Orientation, PlacementError, ShipKind, ShotOutcome, seeded_rng,
};

fn game() -> NavalGame {
    NavalGame::new(Box::new(ScriptedOpponent::harmless()), Some(17))
}

fn coord(row: usize, col: usize) -> Coord {
    Coord::new(row, col).expect("on the board")
}

#[test]
fn test_overlapping_placement_is_rejected() {
    let mut board = Board::new();
    board
        .place(ShipKind::Carrier, 0, 0, Orientation::Horizontal)
        .expect("carrier fits");
    let before = board.clone();
    let result = board.place(ShipKind::Battleship, 0, 3, Orientation::Horizontal);
    assert!(matches!(result, Err(PlacementError::Overlap { .. })));
    assert_eq!(board, before);
}

#[test]
fn test_can_place_rejects_out_of_bounds_and_overlap() {
    let mut board = Board::new();
    assert!(!board.can_place(0, 6, Orientation::Horizontal, 5));
    assert!(board.can_place(0, 5, Orientation::Horizontal, 5));
    assert!(!board.can_place(6, 0, Orientation::Vertical, 5));
    assert!(board.can_place(5, 0, Orientation::Vertical, 5));

    board
        .place(ShipKind::Cruiser, 4, 4, Orientation::Vertical)
        .expect("cruiser fits");
    assert!(!board.can_place(5, 2, Orientation::Horizontal, 3));
    assert!(board.can_place(7, 2, Orientation::Horizontal, 3));
}

#[test]
fn test_can_place_matches_place_everywhere() {
    let mut board = Board::new();
    board
        .place(ShipKind::Battleship, 3, 3, Orientation::Horizontal)
        .expect("battleship fits");
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                let expected = board.can_place(row, col, orientation, ShipKind::Submarine.length());
                let mut trial = board.clone();
                let placed = trial.place(ShipKind::Submarine, row, col, orientation).is_ok();
                assert_eq!(expected, placed, "({row}, {col}) {orientation}");
            }
        }
    }
}

#[test]
fn test_random_fleet_is_complete() {
    let mut rng = seeded_rng(Some(3));
    for _ in 0..20 {
        let board = Board::random_fleet(&mut rng);
        assert!(FleetIntact::holds(&board));
        let ship_cells = Coord::all()
            .filter(|&c| board.cell(c).state == CellState::Ship)
            .count();
        assert_eq!(ship_cells, 17);
        assert!(ShipKind::ALL.iter().all(|&s| board.contains_ship(s)));
    }
}

#[test]
fn test_selecting_placed_ship_has_no_effect() {
    let mut naval = game();
    assert_eq!(naval.selected(), Some(ShipKind::Carrier));
    naval.place_selected(0, 0).expect("carrier fits");
    assert_eq!(naval.selected(), Some(ShipKind::Battleship));

    assert!(!naval.select_ship(ShipKind::Carrier));
    assert_eq!(naval.selected(), Some(ShipKind::Battleship));
    assert!(naval.select_ship(ShipKind::Destroyer));
    assert_eq!(naval.selected(), Some(ShipKind::Destroyer));
}

#[test]
fn test_selection_moves_to_first_unplaced_ship() {
    let mut naval = game();
    naval.select_ship(ShipKind::Cruiser);
    naval.place_selected(2, 0).expect("cruiser fits");
    assert_eq!(naval.selected(), Some(ShipKind::Carrier));
}

#[test]
fn test_rejected_placement_leaves_board_untouched() {
    let mut naval = game();
    naval.place_selected(0, 0).expect("carrier fits");
    let result = naval.place_selected(0, 3);
    assert!(matches!(result, Err(PlacementError::Overlap { .. })));
    assert_eq!(naval.placed(), &[ShipKind::Carrier]);
    naval.toggle_orientation();
    assert!(naval.can_place(1, 3));
    assert!(!naval.can_place(7, 3));
}

#[test]
fn test_battle_needs_full_fleet() {
    let mut naval = game();
    assert!(!naval.start_battle());
    assert_eq!(
        naval.attack(coord(0, 0)),
        Err(AttackError::WrongPhase)
    );
    naval.auto_place_remaining();
    assert!(naval.all_placed());
    assert!(naval.start_battle());
    assert_eq!(naval.phase(), NavalPhase::Playing);
    assert_eq!(naval.place_selected(0, 0), Err(PlacementError::WrongPhase));
}

#[test]
fn test_opponent_ships_hidden_from_view() {
    let naval = game();
    assert!(Coord::all().all(|c| naval.opponent_view(c) == CellState::Empty));
}

#[test]
fn test_attack_locks_until_opponent_answers() {
    let mut naval = game();
    naval.auto_place_remaining();
    naval.start_battle();

    let first = naval.attack(coord(0, 0)).expect("first shot");
    assert!(naval.awaiting_opponent());
    assert_eq!(
        naval.attack(coord(0, 1)),
        Err(AttackError::AwaitingOpponent)
    );

    naval.tick(Duration::from_millis(999));
    assert!(naval.last_incoming().is_none());
    naval.tick(Duration::from_millis(1));
    let incoming = naval.last_incoming().expect("opponent fired");
    assert_eq!(incoming.coord, coord(0, 0));
    assert!(naval.my_board().cell(incoming.coord).state.is_attacked());

    let expected = match first {
        ShotOutcome::Hit => CellState::Hit,
        ShotOutcome::Miss => CellState::Miss,
    };
    assert_eq!(naval.opponent_view(coord(0, 0)), expected);
    assert!(matches!(
        naval.attack(coord(0, 0)),
        Err(AttackError::AlreadyTargeted { .. })
    ));
}

#[test]
fn test_sweeping_the_board_finds_every_ship() {
    let mut naval = game();
    naval.auto_place_remaining();
    naval.start_battle();
    for target in Coord::all() {
        naval.attack(target).expect("fresh cell");
        naval.tick(Duration::from_millis(1000));
    }
    assert_eq!(*naval.state().my_score(), 17);
    assert_eq!(*naval.state().opponent_score(), 17);
    assert_eq!(naval.my_board().open_cells().len(), 0);
}

#[test]
fn test_abandon_cancels_opponent_answer() {
    let mut naval = game();
    naval.auto_place_remaining();
    naval.start_battle();
    naval.attack(coord(4, 4)).expect("first shot");
    naval.abandon();
    naval.tick(Duration::from_secs(5));
    assert!(naval.last_incoming().is_none());
    assert_eq!(naval.phase(), NavalPhase::Abandoned);
}
