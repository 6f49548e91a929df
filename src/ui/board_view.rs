//! Cube rendering: one 3x3 grid per level
//!
//! Level `y` is drawn as its own grid, left to right. Inside a grid the
//! column is `x` and the row is `z`.

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Cell, Player, Pos, CELL_COUNT, CUBE_SIZE};

use super::theme::*;

/// Board view handles rendering and input for the three levels
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Drawing area of each level
    levels: [Rect; CUBE_SIZE],
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            levels: [Rect::NOTHING; CUBE_SIZE],
        }
    }
}

impl BoardView {
    /// Render the cube and return the clicked cell index if any.
    ///
    /// Clicks are only reported for empty cells while `accept_input` holds.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        cells: &[Cell; CELL_COUNT],
        to_move: Option<Player>,
        last_move: Option<usize>,
        accept_input: bool,
    ) -> Option<usize> {
        let available = ui.available_size();
        let n = CUBE_SIZE as f32;

        // Three square levels side by side
        let level_size = ((available.x - (n - 1.0) * LEVEL_GAP) / n)
            .min(available.y - 20.0)
            .max(90.0);
        self.cell_size = (level_size - 2.0 * LEVEL_MARGIN) / n;

        let total = Vec2::new(n * level_size + (n - 1.0) * LEVEL_GAP, level_size + 20.0);
        let (response, painter) = ui.allocate_painter(total, Sense::click());

        for (y, rect) in self.levels.iter_mut().enumerate() {
            let min = response.rect.min + Vec2::new(y as f32 * (level_size + LEVEL_GAP), 0.0);
            *rect = Rect::from_min_size(min, Vec2::splat(level_size));
        }

        for y in 0..CUBE_SIZE {
            self.draw_level(&painter, y);
        }

        for (idx, cell) in cells.iter().enumerate() {
            if let (Some(player), Some(pos)) = (cell.owner(), Pos::from_index(idx)) {
                self.draw_mark(&painter, pos, player);
            }
        }

        if let Some(pos) = last_move.and_then(Pos::from_index) {
            painter.circle_filled(
                self.cell_center(pos),
                LAST_MOVE_MARKER_RADIUS,
                LAST_MOVE_MARKER,
            );
        }

        if !accept_input {
            return None;
        }

        let pos = response.hover_pos().and_then(|p| self.screen_to_cell(p))?;
        let idx = pos.to_index();
        if !cells[idx].is_empty() {
            return None;
        }

        let preview = match to_move {
            Some(Player::A) => Color32::from_rgba_unmultiplied(20, 20, 20, 80),
            Some(Player::B) => Color32::from_rgba_unmultiplied(240, 240, 240, 80),
            None => hover_valid(),
        };
        painter.circle_filled(
            self.cell_center(pos),
            self.cell_size * MARK_RADIUS_RATIO,
            preview,
        );

        response.clicked().then_some(idx)
    }

    /// Draw the background and grid of level `y`
    fn draw_level(&self, painter: &Painter, y: usize) {
        let rect = self.levels[y];
        painter.rect_filled(rect, CornerRadius::same(4), LEVEL_BG);

        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let inner = rect.shrink(LEVEL_MARGIN);
        for i in 0..=CUBE_SIZE {
            let offset = i as f32 * self.cell_size;
            painter.line_segment(
                [
                    Pos2::new(inner.min.x + offset, inner.min.y),
                    Pos2::new(inner.min.x + offset, inner.max.y),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    Pos2::new(inner.min.x, inner.min.y + offset),
                    Pos2::new(inner.max.x, inner.min.y + offset),
                ],
                stroke,
            );
        }

        painter.text(
            Pos2::new(rect.center().x, rect.max.y + 10.0),
            egui::Align2::CENTER_CENTER,
            format!("Level {}", y + 1),
            egui::FontId::proportional(12.0),
            TEXT_SECONDARY,
        );
    }

    fn draw_mark(&self, painter: &Painter, pos: Pos, player: Player) {
        let center = self.cell_center(pos);
        let radius = self.cell_size * MARK_RADIUS_RATIO;

        match player {
            Player::A => {
                painter.circle_filled(
                    center + Vec2::new(2.0, 2.0),
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 60),
                );
                painter.circle_filled(center, radius, MARK_A);
            }
            Player::B => {
                painter.circle_filled(center, radius, MARK_B);
                painter.circle_stroke(center, radius, Stroke::new(1.5, MARK_B_OUTLINE));
            }
        }
    }

    /// Convert screen coordinates to a cell of one of the levels
    pub fn screen_to_cell(&self, screen_pos: Pos2) -> Option<Pos> {
        let y = self.levels.iter().position(|r| r.contains(screen_pos))?;
        let relative = screen_pos - self.levels[y].min - Vec2::splat(LEVEL_MARGIN);
        let col = (relative.x / self.cell_size).floor() as i32;
        let row = (relative.y / self.cell_size).floor() as i32;

        Pos::is_valid(col, y as i32, row).then(|| Pos::new(col as u8, y as u8, row as u8))
    }

    /// Center of a cell on screen
    pub fn cell_center(&self, pos: Pos) -> Pos2 {
        let inner = self.levels[pos.y as usize].min + Vec2::splat(LEVEL_MARGIN);
        Pos2::new(
            inner.x + (pos.x as f32 + 0.5) * self.cell_size,
            inner.y + (pos.z as f32 + 0.5) * self.cell_size,
        )
    }
}
