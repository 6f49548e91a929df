//! Search module for the 3D tic-tac-toe AI
//!
//! Contains:
//! - Negamax search with a fixed horizon and win-now pruning
//! - The stop signal used to cancel a running search

pub mod negamax;
pub mod signal;

pub use negamax::{SearchResult, Searcher, DRAW, LOSS, UNAVAILABLE, WIN};
pub use signal::StopSignal;
