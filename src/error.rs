//! Error types for the 3D tic-tac-toe engine

use thiserror::Error;

use crate::board::{Board, Player};

/// Main error type for the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell {index} is already occupied")]
    InvalidMove { index: usize },

    #[error("cell index {index} is outside the cube (0..27)")]
    CellOutOfRange { index: usize },

    #[error("no move to undo")]
    EmptyHistory,

    #[error("a search is already running")]
    ConcurrentSearchRequested,

    #[error("player {requested:?} asked to move but {to_move:?} is to move")]
    OutOfTurn { requested: Player, to_move: Player },

    #[error("it is {to_move:?}'s turn and that player is not human")]
    NotHumanTurn { to_move: Player },

    #[error("game already over")]
    GameOver,

    #[error("no round in progress")]
    NoRoundInProgress,

    #[error("search worker is not running")]
    WorkerUnavailable,
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// A search request the worker refused, carrying the board back to the caller
#[derive(Debug)]
pub struct Rejected {
    pub board: Board,
    pub error: Error,
}

impl From<Rejected> for Error {
    fn from(rejected: Rejected) -> Self {
        rejected.error
    }
}
