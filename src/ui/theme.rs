//! Theme constants for the cube GUI

use egui::Color32;

// Grid colors
pub const LEVEL_BG: Color32 = Color32::from_rgb(222, 184, 135);
pub const GRID_LINE: Color32 = Color32::from_rgb(60, 40, 20);
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);

// Marks
pub const MARK_A: Color32 = Color32::from_rgb(25, 25, 30);
pub const MARK_B: Color32 = Color32::from_rgb(250, 250, 252);
pub const MARK_B_OUTLINE: Color32 = Color32::from_rgb(120, 120, 128);

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 100)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const CARD_ACTIVE: Color32 = Color32::from_rgb(45, 80, 55);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Status colors
pub const STATUS_THINKING: Color32 = Color32::from_rgb(255, 180, 50);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

// Sizes
pub const LEVEL_MARGIN: f32 = 12.0;
pub const LEVEL_GAP: f32 = 24.0;
pub const MARK_RADIUS_RATIO: f32 = 0.38;
pub const GRID_LINE_WIDTH: f32 = 1.5;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
