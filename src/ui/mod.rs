//! GUI module for the cube game
//!
//! A thin egui/eframe front end over [`GameSession`](crate::GameSession).

mod app;
mod board_view;
mod theme;

pub use app::CubeApp;
