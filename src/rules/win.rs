//! Win condition checking
//!
//! Cell layout, one 3x3 slice per level (`y`):
//!
//! ```text
//!   (bottom)      (mid)         (top)
//!   0   9  18     3  12  21     6  15  24
//!   1  10  19     4  13  22     7  16  25
//!   2  11  20     5  14  23     8  17  26
//! ```
//!
//! [`WIN_LINES`] lists every line through the cube. Its order and contents are
//! fixed and part of the public interface.

use crate::board::{Cell, Player, CELL_COUNT};

/// Three cell indices forming a line
pub type Line = [u8; 3];

pub const WIN_LINE_COUNT: usize = 49;

/// All 49 winning lines
pub const WIN_LINES: [Line; WIN_LINE_COUNT] = [
    // rows and columns
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [9, 10, 11],
    [12, 13, 14],
    [15, 16, 17],
    [18, 19, 20],
    [21, 22, 23],
    [24, 25, 26],
    [0, 9, 18],
    [1, 10, 19],
    [2, 11, 20],
    [3, 12, 21],
    [4, 13, 22],
    [5, 14, 23],
    [6, 15, 24],
    [7, 16, 25],
    [8, 17, 26],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [9, 12, 15],
    [10, 13, 16],
    [11, 14, 17],
    [18, 21, 24],
    [19, 22, 25],
    [20, 23, 26],
    // diagonals
    [0, 10, 20],
    [18, 10, 2],
    [3, 13, 23],
    [21, 13, 5],
    [6, 16, 26],
    [24, 16, 8],
    [0, 12, 24],
    [6, 12, 18],
    [6, 4, 2],
    [0, 4, 8],
    [2, 14, 26],
    [8, 14, 20],
    [20, 22, 24],
    [18, 22, 26],
    [7, 13, 19],
    [1, 13, 25],
    [9, 13, 17],
    [11, 13, 15],
    // space diagonals
    [0, 13, 26],
    [6, 13, 20],
    [2, 13, 24],
    [8, 13, 18],
];

/// The centre cell lies on 13 lines, more than any other
pub const MAX_LINES_PER_CELL: usize = 13;

/// Lines passing through one cell, as indices into [`WIN_LINES`]
#[derive(Clone, Copy)]
struct CellLines {
    lines: [u8; MAX_LINES_PER_CELL],
    len: u8,
}

const fn build_cell_lines() -> [CellLines; CELL_COUNT] {
    let mut table = [CellLines {
        lines: [0; MAX_LINES_PER_CELL],
        len: 0,
    }; CELL_COUNT];

    let mut line = 0;
    while line < WIN_LINE_COUNT {
        let mut k = 0;
        while k < 3 {
            let cell = WIN_LINES[line][k] as usize;
            let len = table[cell].len as usize;
            table[cell].lines[len] = line as u8;
            table[cell].len += 1;
            k += 1;
        }
        line += 1;
    }
    table
}

static CELL_LINES: [CellLines; CELL_COUNT] = build_cell_lines();

/// Indices into [`WIN_LINES`] of every line containing `index`.
///
/// Returns an empty slice for indices outside the cube.
#[inline]
pub fn lines_through(index: usize) -> &'static [u8] {
    match CELL_LINES.get(index) {
        Some(entry) => &entry.lines[..entry.len as usize],
        None => &[],
    }
}

/// Result of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Ongoing,
    Win(Player),
    Draw,
}

impl GameOutcome {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameOutcome::Ongoing
    }

    #[inline]
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            _ => None,
        }
    }
}

#[inline]
fn line_owner(cells: &[Cell; CELL_COUNT], line: &Line) -> Option<Player> {
    let first = cells[line[0] as usize];
    if first != Cell::Empty
        && first == cells[line[1] as usize]
        && first == cells[line[2] as usize]
    {
        first.owner()
    } else {
        None
    }
}

/// Evaluate a position by scanning every winning line.
///
/// A full cube is reported as a draw before any line is looked at.
pub fn outcome(cells: &[Cell; CELL_COUNT], empty_count: usize) -> GameOutcome {
    if empty_count == 0 {
        return GameOutcome::Draw;
    }

    WIN_LINES
        .iter()
        .find_map(|line| line_owner(cells, line))
        .map_or(GameOutcome::Ongoing, GameOutcome::Win)
}

/// Fast check at a specific cell.
///
/// Only inspects the lines through `index`. No allocation.
#[inline]
pub fn completes_line(cells: &[Cell; CELL_COUNT], index: usize) -> bool {
    lines_through(index)
        .iter()
        .any(|&line| line_owner(cells, &WIN_LINES[line as usize]).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    fn cells_with(line: &Line, cell: Cell) -> [Cell; CELL_COUNT] {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for &idx in line {
            cells[idx as usize] = cell;
        }
        cells
    }

    #[test]
    fn test_table_has_49_distinct_lines() {
        let mut seen: Vec<[u8; 3]> = WIN_LINES
            .iter()
            .map(|line| {
                let mut sorted = *line;
                sorted.sort_unstable();
                sorted
            })
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 49);
    }

    #[test]
    fn test_every_line_is_straight() {
        // Middle cell is the midpoint of the two ends in every axis
        for line in &WIN_LINES {
            let [a, b, c] = line.map(|idx| Pos::from_index(idx as usize).unwrap());
            assert_eq!(a.x + c.x, 2 * b.x, "{line:?}");
            assert_eq!(a.y + c.y, 2 * b.y, "{line:?}");
            assert_eq!(a.z + c.z, 2 * b.z, "{line:?}");
            assert_ne!(a, c, "{line:?}");
        }
    }

    #[test]
    fn test_line_positions_are_fixed() {
        assert_eq!(WIN_LINES[0], [0, 1, 2]);
        assert_eq!(WIN_LINES[9], [0, 9, 18]);
        assert_eq!(WIN_LINES[18], [0, 3, 6]);
        assert_eq!(WIN_LINES[27], [0, 10, 20]);
        assert_eq!(WIN_LINES[28], [18, 10, 2]);
        assert_eq!(WIN_LINES[33], [0, 12, 24]);
        assert_eq!(WIN_LINES[44], [11, 13, 15]);
        assert_eq!(WIN_LINES[45], [0, 13, 26]);
        assert_eq!(WIN_LINES[48], [8, 13, 18]);
    }

    #[test]
    fn test_lines_through_counts() {
        assert_eq!(lines_through(13).len(), 13);
        assert_eq!(lines_through(0).len(), 7);
        assert_eq!(lines_through(1).len(), 4);
        assert_eq!(lines_through(4).len(), 5);
        assert!(lines_through(27).is_empty());

        let total: usize = (0..CELL_COUNT).map(|idx| lines_through(idx).len()).sum();
        assert_eq!(total, WIN_LINE_COUNT * 3);
    }

    #[test]
    fn test_lines_through_contain_cell() {
        for idx in 0..CELL_COUNT {
            for &line in lines_through(idx) {
                assert!(WIN_LINES[line as usize].contains(&(idx as u8)));
            }
        }
    }

    #[test]
    fn test_each_line_wins_for_either_player() {
        for line in &WIN_LINES {
            let cells = cells_with(line, Cell::A);
            assert_eq!(outcome(&cells, 24), GameOutcome::Win(Player::A));

            let cells = cells_with(line, Cell::B);
            assert_eq!(outcome(&cells, 24), GameOutcome::Win(Player::B));
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut cells = cells_with(&[0, 1, 2], Cell::A);
        cells[1] = Cell::B;
        assert_eq!(outcome(&cells, 24), GameOutcome::Ongoing);
        assert!(!completes_line(&cells, 1));
    }

    #[test]
    fn test_full_cube_is_a_draw() {
        let cells = cells_with(&[0, 13, 26], Cell::A);
        assert_eq!(outcome(&cells, 0), GameOutcome::Draw);
    }

    #[test]
    fn test_completes_line_matches_full_scan() {
        for line in &WIN_LINES {
            let cells = cells_with(line, Cell::B);
            for &idx in line {
                assert!(completes_line(&cells, idx as usize));
            }
        }
        let empty = [Cell::Empty; CELL_COUNT];
        assert!((0..CELL_COUNT).all(|idx| !completes_line(&empty, idx)));
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(!GameOutcome::Ongoing.is_over());
        assert!(GameOutcome::Draw.is_over());
        assert_eq!(GameOutcome::Win(Player::B).winner(), Some(Player::B));
        assert_eq!(GameOutcome::Draw.winner(), None);
    }
}
