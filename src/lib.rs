//! 3D tic-tac-toe engine
//!
//! Two players take turns marking cells of a 3x3x3 cube. Whoever first
//! owns all three cells of one of the 49 winning lines wins; a full cube
//! with no such line is a draw.
//!
//! # Architecture
//!
//! - [`board`]: cube representation with move history and undo
//! - [`rules`]: the winning-line table and outcome detection
//! - [`search`]: fixed-horizon negamax and its stop signal
//! - [`worker`]: background thread that runs searches with a minimum think time
//! - [`game`]: controller that sequences turns and emits events
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use ttt3d::{Board, Player, Searcher, StopSignal};
//!
//! let mut board = Board::new();
//! board.apply(13, Player::A).unwrap();
//! board.apply(0, Player::B).unwrap();
//! board.apply(4, Player::A).unwrap();
//!
//! // B must block the line 4-13-22
//! let mut searcher = Searcher::new(2);
//! let result = searcher.search(&mut board, &StopSignal::new()).unwrap();
//! assert_eq!(result.best_move, Some(22));
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;
pub mod search;
pub mod ui;
pub mod worker;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Player, Pos, CELL_COUNT, CUBE_SIZE};
pub use config::EngineConfig;
pub use error::{Error, Rejected, Result};
pub use game::{result_message, GameEvent, GameSession, PlayerKind};
pub use rules::{GameOutcome, WIN_LINES};
pub use search::{SearchResult, Searcher, StopSignal};
pub use worker::{SearchWorker, WorkerReply, WorkerState};
