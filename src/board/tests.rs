use super::*;
use crate::error::Error;
use crate::rules::{GameOutcome, WIN_LINES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 26 marks with no line for either player; only the centre is open
const NO_LINE_LAYOUT: &[u8; CELL_COUNT] = b"AABBBAABABBAB.BABBABAABBBAA";

fn board_from_layout(layout: &[u8; CELL_COUNT]) -> Board {
    let mut board = Board::new();
    for (idx, &mark) in layout.iter().enumerate() {
        match mark {
            b'A' => board.apply(idx, Player::A).unwrap(),
            b'B' => board.apply(idx, Player::B).unwrap(),
            _ => {}
        }
    }
    board
}

#[test]
fn test_player_opponent() {
    assert_eq!(Player::A.opponent(), Player::B);
    assert_eq!(Player::B.opponent(), Player::A);
    assert_eq!(Player::A.seat(), 1);
    assert_eq!(Player::B.seat(), 2);
}

#[test]
fn test_cell_owner() {
    assert_eq!(Cell::default(), Cell::Empty);
    assert_eq!(Cell::Empty.owner(), None);
    assert_eq!(Cell::from(Player::A).owner(), Some(Player::A));
    assert_eq!(Cell::from(Player::B).owner(), Some(Player::B));
    assert!(Cell::Empty.is_empty());
    assert!(!Cell::A.is_empty());
}

#[test]
fn test_board_constants() {
    assert_eq!(CUBE_SIZE, 3);
    assert_eq!(CELL_COUNT, 27);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(1, 1, 1); // Center
    assert_eq!(pos.to_index(), 13);

    let pos = Pos::new(2, 0, 1);
    assert_eq!(pos.to_index(), 2 * 9 + 1);
    assert_eq!(Pos::from_index(19), Some(pos));

    for idx in 0..CELL_COUNT {
        assert_eq!(Pos::from_index(idx).map(Pos::to_index), Some(idx));
    }
    assert_eq!(Pos::from_index(CELL_COUNT), None);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0, 0));
    assert!(Pos::is_valid(2, 2, 2));
    assert!(!Pos::is_valid(-1, 0, 0));
    assert!(!Pos::is_valid(0, 3, 0));
    assert!(!Pos::is_valid(0, 0, 3));
}

#[test]
fn test_pos_ordering() {
    assert!(Pos::new(0, 0, 2) < Pos::new(0, 1, 0));
    assert!(Pos::new(0, 2, 2) < Pos::new(1, 0, 0));
}

#[test]
fn test_new_board() {
    let board = Board::new();
    assert_eq!(board.empty_count(), CELL_COUNT);
    assert_eq!(board.filled_count(), 0);
    assert!(board.history().is_empty());
    assert_eq!(board.last_move(), None);
    assert_eq!(board.active_player(), Player::A);
    assert_eq!(board.outcome(), GameOutcome::Ongoing);
    assert!(board.cells().iter().all(|c| c.is_empty()));
    assert_eq!(board, Board::default());
}

#[test]
fn test_apply_and_undo() {
    let mut board = Board::new();
    board.apply(13, Player::A).unwrap();

    assert_eq!(board.get(13), Some(Cell::A));
    assert!(!board.is_empty(13));
    assert_eq!(board.empty_count(), 26);
    assert_eq!(board.history(), &[13]);
    assert_eq!(board.last_move(), Some(13));
    assert_eq!(board.active_player(), Player::B);

    assert_eq!(board.undo(), Ok(13));
    assert_eq!(board, Board::new());
}

#[test]
fn test_apply_rejects_bad_cells() {
    let mut board = Board::new();
    board.apply(5, Player::A).unwrap();
    let before = board.clone();

    assert_eq!(board.apply(5, Player::B), Err(Error::InvalidMove { index: 5 }));
    assert_eq!(board.apply(27, Player::B), Err(Error::CellOutOfRange { index: 27 }));
    assert_eq!(board, before);
    assert_eq!(board.get(27), None);
}

#[test]
fn test_undo_empty_history() {
    let mut board = Board::new();
    assert_eq!(board.undo(), Err(Error::EmptyHistory));
    assert_eq!(board, Board::new());
}

#[test]
fn test_reset() {
    let mut board = Board::new();
    for idx in [0, 4, 8] {
        board.apply(idx, board.active_player()).unwrap();
    }
    board.reset();
    assert_eq!(board, Board::new());
}

#[test]
fn test_empty_cells_ascending() {
    let mut board = Board::new();
    board.apply(0, Player::A).unwrap();
    board.apply(26, Player::B).unwrap();
    let empty: Vec<usize> = board.empty_cells().collect();
    assert_eq!(empty.len(), 25);
    assert_eq!(empty.first(), Some(&1));
    assert_eq!(empty.last(), Some(&25));
    assert!(empty.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_random_apply_undo_sequences() {
    let mut rng = StdRng::seed_from_u64(0x3d3d);

    for _ in 0..200 {
        let mut board = Board::new();
        let mut snapshots = vec![board.clone()];

        let moves = rng.random_range(1..=CELL_COUNT);
        for _ in 0..moves {
            let empty: Vec<usize> = board.empty_cells().collect();
            let idx = empty[rng.random_range(0..empty.len())];
            board.apply(idx, board.active_player()).unwrap();
            assert_eq!(board.empty_count() + board.history().len(), CELL_COUNT);
            snapshots.push(board.clone());
        }

        // Undo in LIFO order restores every intermediate board
        snapshots.pop();
        while let Some(expected) = snapshots.pop() {
            board.undo().unwrap();
            assert_eq!(board, expected);
            assert_eq!(board.empty_count() + board.history().len(), CELL_COUNT);
        }
        assert_eq!(board.undo(), Err(Error::EmptyHistory));
    }
}

#[test]
fn test_single_line_wins() {
    for line in WIN_LINES.iter() {
        for player in [Player::A, Player::B] {
            let mut board = Board::new();
            for &idx in line {
                board.apply(idx as usize, player).unwrap();
            }
            assert_eq!(board.outcome(), GameOutcome::Win(player), "line {line:?}");
        }
    }
}

#[test]
fn test_one_empty_cell_without_line_is_ongoing() {
    let board = board_from_layout(NO_LINE_LAYOUT);
    assert_eq!(board.empty_count(), 1);
    assert_eq!(board.empty_cells().collect::<Vec<_>>(), vec![13]);
    assert_eq!(board.outcome(), GameOutcome::Ongoing);
}

#[test]
fn test_filling_last_cell_is_draw() {
    for player in [Player::A, Player::B] {
        let mut board = board_from_layout(NO_LINE_LAYOUT);
        board.apply(13, player).unwrap();
        // A full cube is a draw before any line is looked at
        assert_eq!(board.outcome(), GameOutcome::Draw);
    }
}
