//! Move selection across the three difficulties.

use rand::SeedableRng;
use rand::rngs::StdRng;
use strum::IntoEnumIterator;
use tictactoe_engine::{Board, Difficulty, Player, best_move, win_or_block};

fn board_from(marks: &[(usize, Player)]) -> Board {
    let mut board = Board::new();
    for &(index, player) in marks {
        board.place(index, player);
    }
    board
}

#[test]
fn test_every_strategy_picks_an_empty_cell() {
    let board = board_from(&[(0, Player::X), (4, Player::O), (8, Player::X)]);
    for difficulty in Difficulty::iter() {
        for seed in 0..10 {
            let mut bot = difficulty.strategy(StdRng::seed_from_u64(seed));
            let cell = bot.select_move(&board, Player::O);
            assert!(board.is_empty(cell), "{} chose occupied {}", difficulty, cell);
            assert_eq!(bot.difficulty(), difficulty);
        }
    }
}

#[test]
fn test_last_free_cell_is_forced() {
    let board = board_from(&[
        (0, Player::X),
        (1, Player::O),
        (2, Player::X),
        (3, Player::X),
        (4, Player::O),
        (5, Player::O),
        (6, Player::O),
        (7, Player::X),
    ]);
    for difficulty in Difficulty::iter() {
        let mut bot = difficulty.strategy(StdRng::seed_from_u64(1));
        assert_eq!(bot.select_move(&board, Player::X), 8);
    }
}

#[test]
fn test_win_beats_block() {
    // O can win at 5; X threatens 2.
    let board = board_from(&[(0, Player::X), (3, Player::O), (1, Player::X), (4, Player::O)]);
    assert_eq!(win_or_block(&board, Player::O), Some(5));

    for difficulty in [Difficulty::Intermediate, Difficulty::Advanced] {
        let mut bot = difficulty.strategy(StdRng::seed_from_u64(0));
        assert_eq!(bot.select_move(&board, Player::O), 5);
    }
}

#[test]
fn test_no_threats_means_no_forced_move() {
    let board = board_from(&[(4, Player::X)]);
    assert_eq!(win_or_block(&board, Player::O), None);
}

#[test]
fn test_advanced_answers_centre_with_corner() {
    let board = board_from(&[(4, Player::X)]);
    let (cell, score) = best_move(&board, Player::O).expect("moves available");
    assert!([0, 2, 6, 8].contains(&cell), "edge reply {} loses", cell);
    assert_eq!(score, 0);
}

#[test]
fn test_advanced_stops_fork() {
    // X holds opposite corners; O must take an edge, not a corner.
    let board = board_from(&[(0, Player::X), (4, Player::O), (8, Player::X)]);
    let mut bot = Difficulty::Advanced.strategy(StdRng::seed_from_u64(0));
    let cell = bot.select_move(&board, Player::O);
    assert!([1, 3, 5, 7].contains(&cell), "corner reply {} allows a fork", cell);
}

#[test]
fn test_search_leaves_board_untouched() {
    let board = board_from(&[(0, Player::X), (4, Player::O)]);
    let before = board;
    let _ = best_move(&board, Player::X);
    let _ = win_or_block(&board, Player::X);
    assert_eq!(board, before);
}
