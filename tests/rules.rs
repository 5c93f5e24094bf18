//! Rules: push effect, make/undo, terminal detection, and snapshots

mod common;

use common::{position, random_playout, sq};
use push_battle::{
    Error,
    rules::{Cell, ExternalState, GameState, MIN_VIABLE_PIECES, Move, NUM_PIECES, Player},
};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

#[test]
fn test_undo_restores_every_random_position() {
    for seed in 0..20 {
        let (mut state, _) = random_playout(seed, 40);
        if state.is_terminal() {
            continue;
        }
        let before = state;
        for mv in state.legal_moves() {
            let undo = state.apply(mv);
            state.undo(undo);
            assert_eq!(state, before, "seed {seed}: {mv} was not undone");
        }
    }
}

#[test]
fn test_nested_undo_unwinds_in_reverse() {
    let (mut state, _) = random_playout(7, 10);
    let before = state;
    let mut undos = Vec::new();
    for _ in 0..6 {
        if state.is_terminal() {
            break;
        }
        let mv = state.legal_moves()[0];
        undos.push(state.apply(mv));
    }
    while let Some(undo) = undos.pop() {
        state.undo(undo);
    }
    assert_eq!(state, before);
}

#[test]
fn test_move_guard_undoes_on_drop() {
    let mut state = GameState::new();
    {
        let guard = state.play(Move::place(3, 3).unwrap());
        assert_eq!(guard.board().get(sq(3, 3)), Cell::One);
        assert_eq!(guard.to_move(), Player::Two);
    }
    assert_eq!(state, GameState::new());
}

#[test]
fn test_pieces_are_conserved_by_pushes() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new();
        for ply in 0..60 {
            if state.is_terminal() {
                break;
            }
            let mv = *state.legal_moves().choose(&mut rng).unwrap();
            state.apply(mv);
            for player in [Player::One, Player::Two] {
                assert_eq!(
                    state.pieces_on_board(player),
                    state.placed(player) as usize,
                    "seed {seed} after ply {ply} ({mv})"
                );
            }
        }
    }
}

#[test]
fn test_placement_pushes_all_free_neighbours() {
    let mut state = position(
        "......../......../..2.1.../......../..1.2.../......../......../........",
        [2, 2],
        Player::One,
    );
    let undo = state.place(sq(3, 3)).unwrap();
    let board = state.board();
    assert_eq!(board.get(sq(3, 3)), Cell::One);
    assert_eq!(board.get(sq(1, 1)), Cell::Two);
    assert_eq!(board.get(sq(1, 5)), Cell::One);
    assert_eq!(board.get(sq(5, 1)), Cell::One);
    assert_eq!(board.get(sq(5, 5)), Cell::Two);
    assert_eq!(undo.pushes().len(), 4);
    assert_eq!(state.pieces_on_board(Player::One), 3);
}

#[test]
fn test_blocked_push_leaves_piece_in_place() {
    let mut state = position(
        "......../......../......../...22.../......../......../......../........",
        [0, 2],
        Player::One,
    );
    state.place(sq(3, 2)).unwrap();
    assert_eq!(state.board().get(sq(3, 3)), Cell::Two);
    assert_eq!(state.board().get(sq(3, 4)), Cell::Two);
}

#[test]
fn test_push_wraps_around_the_edge() {
    let mut state = position(
        "2......./......../......../......../......../......../......../........",
        [0, 1],
        Player::One,
    );
    state.place(sq(1, 1)).unwrap();
    assert_eq!(state.board().get(sq(0, 0)), Cell::Empty);
    assert_eq!(state.board().get(sq(7, 7)), Cell::Two);
}

#[test]
fn test_moved_piece_can_push_into_its_vacated_square() {
    // P1 moves (3, 1) to (3, 3); the P2 piece at (3, 2) is pushed into (3, 1).
    let mut state = position(
        "1......./......../1......./.12...1./......../......../.....1../.1.....1",
        [NUM_PIECES, 1],
        Player::One,
    );
    assert!(!state.in_placement(Player::One));
    state.move_piece(sq(3, 1), sq(3, 3)).unwrap();
    assert_eq!(state.board().get(sq(3, 3)), Cell::One);
    assert_eq!(state.board().get(sq(3, 2)), Cell::Empty);
    assert_eq!(state.board().get(sq(3, 1)), Cell::Two);
}

#[test]
fn test_illegal_actions_are_rejected_without_change() {
    let mut state = position(
        "1......./......../......../......../......../......../......../........",
        [1, 0],
        Player::Two,
    );
    let before = state;
    assert!(matches!(state.place(sq(0, 0)), Err(Error::IllegalMove { .. })));
    assert!(matches!(
        state.move_piece(sq(0, 0), sq(4, 4)),
        Err(Error::IllegalMove { .. })
    ));
    assert_eq!(state, before);
}

#[test]
fn test_movement_phase_generates_source_destination_pairs() {
    let (state, _) = random_playout(3, 16);
    if state.is_terminal() || state.in_placement(state.to_move()) {
        return;
    }
    let own = state.pieces_on_board(state.to_move());
    let empty = state.board().empty_squares().count();
    assert_eq!(state.legal_moves().len(), own * empty);
}

#[test]
fn test_last_mover_wins_when_both_have_lines() {
    let state = position(
        "111...../......../......../222...../......../......../......../........",
        [3, 3],
        Player::Two,
    );
    assert_eq!(state.check_winner(), Some(Player::One));
    let mirrored = position(
        "111...../......../......../222...../......../......../......../........",
        [3, 3],
        Player::One,
    );
    assert_eq!(mirrored.check_winner(), Some(Player::Two));
}

#[test]
fn test_too_few_pieces_after_placement_loses() {
    let state = position(
        "11....../......../......../..2.2.2./......../......../......../........",
        [NUM_PIECES, 3],
        Player::Two,
    );
    assert!(state.pieces_on_board(Player::One) < MIN_VIABLE_PIECES);
    assert_eq!(state.check_winner(), Some(Player::Two));

    // Still placing: no penalty.
    let placing = GameState::from_parts(*state.board(), [2, 3], Player::Two);
    assert_eq!(placing.check_winner(), None);
}

#[test]
fn test_external_snapshot_roundtrip_and_validation() {
    let (state, _) = random_playout(11, 12);
    let external = state.to_external();
    assert_eq!(GameState::from_external(&external).unwrap(), state);

    let json = serde_json::to_string(&external).unwrap();
    let parsed: ExternalState = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, external);

    let mut bad_player = external.clone();
    bad_player.current_player = 0;
    assert!(matches!(
        GameState::from_external(&bad_player),
        Err(Error::InvalidSnapshot { .. })
    ));

    let mut short = external.clone();
    short.board.pop();
    assert!(GameState::from_external(&short).is_err());

    let mut overcount = external;
    overcount.p1_pieces = NUM_PIECES + 1;
    assert!(GameState::from_external(&overcount).is_err());
}
