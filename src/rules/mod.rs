//! Game rules for 3D tic-tac-toe
//!
//! A player wins by holding all three cells of any of the 49 lines through
//! the cube; a full cube without such a line is a draw.

pub mod win;

// Re-exports for convenient access
pub use win::{
    completes_line, lines_through, outcome, GameOutcome, Line, MAX_LINES_PER_CELL, WIN_LINES,
    WIN_LINE_COUNT,
};
