//! Depth-limited negamax search
//!
//! Every empty cell is tried in ascending index order. A child's value is
//! the negation of the value the opponent gets from that position, so one
//! function serves both players.
//!
//! # Features
//!
//! - Fixed horizon: at most `lookahead` plies past the cells already filled
//! - Early cutoff when a winning move is found at any ply
//! - Cooperative stop checked before every candidate move
//! - Board is mutated in place and always restored before returning
//!
//! # Example
//!
//! ```
//! use ttt3d::board::{Board, Player};
//! use ttt3d::search::{Searcher, StopSignal};
//!
//! let mut board = Board::new();
//! board.apply(0, Player::A).unwrap();
//! board.apply(5, Player::B).unwrap();
//! board.apply(1, Player::A).unwrap();
//! board.apply(7, Player::B).unwrap();
//!
//! let mut searcher = Searcher::new(2);
//! let result = searcher.search(&mut board, &StopSignal::new()).unwrap();
//! assert_eq!(result.best_move, Some(2));
//! assert_eq!(result.score, ttt3d::search::WIN);
//! ```

use std::time::Instant;

use log::debug;

use crate::board::{Board, CELL_COUNT};
use crate::error::Result;
use crate::rules::completes_line;

use super::StopSignal;

/// Proven win for the player to move
pub const WIN: i32 = 1;
/// Draw, or horizon reached without a decision
pub const DRAW: i32 = 0;
/// Proven loss for the player to move
pub const LOSS: i32 = -1;
/// Root marker for an occupied cell; never returned by the recursion
pub const UNAVAILABLE: i32 = -2;

/// Below every real score so the first candidate always replaces it
const FLOOR: i32 = -3;

/// Search result containing the chosen move and per-cell root scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Lowest index with the best score, `None` if nothing was playable
    pub best_move: Option<u8>,
    /// Score of `best_move` for the player who searched
    pub score: i32,
    /// Root score per cell. `None` means the cell was not evaluated
    /// because an earlier move already won or the search was stopped.
    pub scores: [Option<i32>; CELL_COUNT],
    /// Positions visited, root children included
    pub nodes: u64,
    /// Filled-cell count at which the recursion stops
    pub cutoff: usize,
    /// The stop signal ended the search early; `best_move` is not reliable
    pub cancelled: bool,
}

impl SearchResult {
    fn empty(cutoff: usize) -> Self {
        Self {
            best_move: None,
            score: FLOOR,
            scores: [None; CELL_COUNT],
            nodes: 0,
            cutoff,
            cancelled: false,
        }
    }
}

/// Negamax searcher with a fixed lookahead.
pub struct Searcher {
    lookahead: usize,
    nodes: u64,
}

impl Searcher {
    /// Create a searcher looking `lookahead` plies past the current position.
    #[must_use]
    pub fn new(lookahead: usize) -> Self {
        Self { lookahead, nodes: 0 }
    }

    #[inline]
    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    /// Filled-cell count at which evaluation stops for a search from `board`
    #[inline]
    pub fn cutoff_for(&self, board: &Board) -> usize {
        (board.filled_count() + self.lookahead).min(CELL_COUNT)
    }

    /// Pick the best move for the player to move on `board`.
    ///
    /// The board is used as scratch space and is returned to its original
    /// state, cancelled or not. An error means apply and undo fell out of
    /// step; the board should then be discarded.
    pub fn search(&mut self, board: &mut Board, stop: &StopSignal) -> Result<SearchResult> {
        let start = Instant::now();
        let cutoff = self.cutoff_for(board);
        let mut result = SearchResult::empty(cutoff);
        self.nodes = 0;

        if board.outcome().is_over() {
            debug!("search requested on a finished position");
            return Ok(result);
        }

        let mover = board.active_player();
        let depth = board.filled_count() + 1;

        for idx in 0..CELL_COUNT {
            if stop.is_raised() {
                result.cancelled = true;
                break;
            }

            let score = if board.is_empty(idx) {
                board.apply(idx, mover)?;
                let score = -self.negamax(board, depth, cutoff, stop)?;
                board.undo()?;

                // A stopped subtree returns a meaningless value
                if stop.is_raised() {
                    result.cancelled = true;
                    break;
                }
                score
            } else {
                UNAVAILABLE
            };
            result.scores[idx] = Some(score);

            if score != UNAVAILABLE && score > result.score {
                result.score = score;
                result.best_move = Some(idx as u8);
            }

            if result.score > DRAW {
                break;
            }
        }

        result.nodes = self.nodes;
        debug!(
            "search for {:?}: move={:?} score={} nodes={} cutoff={} cancelled={} in {:?}",
            mover,
            result.best_move,
            result.score,
            result.nodes,
            cutoff,
            result.cancelled,
            start.elapsed()
        );
        Ok(result)
    }

    /// Value of `board` for the player to move. `depth` is the number of
    /// filled cells, which always equals the ply count from an empty board.
    fn negamax(
        &mut self,
        board: &mut Board,
        depth: usize,
        cutoff: usize,
        stop: &StopSignal,
    ) -> Result<i32> {
        self.nodes += 1;

        if board.empty_count() == 0 {
            return Ok(DRAW);
        }

        // The parent was not decided, so only the last move can have won
        if let Some(last) = board.last_move() {
            if completes_line(board.cells(), last) {
                let winner = board.get(last).and_then(|cell| cell.owner());
                return Ok(if winner == Some(board.active_player()) {
                    WIN
                } else {
                    LOSS
                });
            }
        }

        if depth >= cutoff {
            return Ok(DRAW);
        }

        let mover = board.active_player();
        let mut best = FLOOR;

        for idx in 0..CELL_COUNT {
            if stop.is_raised() {
                break;
            }
            if !board.is_empty(idx) {
                continue;
            }

            board.apply(idx, mover)?;
            let score = -self.negamax(board, depth + 1, cutoff, stop)?;
            board.undo()?;

            if score > best {
                best = score;
            }
            if best > DRAW {
                break;
            }
        }

        // Only reachable as FLOOR when stopped before the first child
        Ok(best.max(LOSS))
    }
}
