//! Board structure with move history

use super::{Cell, Player, CELL_COUNT};
use crate::error::{Error, Result};
use crate::rules::{self, GameOutcome};

/// Game board with undo history.
///
/// `empty_count + history.len() == 27` holds after every operation, and
/// `active_player` flips on every apply and every undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
    empty_count: usize,
    /// Applied cell indices, most recent last
    history: Vec<u8>,
    active_player: Player,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            empty_count: CELL_COUNT,
            history: Vec::with_capacity(CELL_COUNT),
            active_player: Player::A,
        }
    }

    /// Clear every cell and the history; `A` is to move again
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
        self.empty_count = CELL_COUNT;
        self.history.clear();
        self.active_player = Player::A;
    }

    /// Get cell contents, `None` if out of range
    #[inline]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Check if a cell is in range and empty
    #[inline]
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(Cell::Empty))
    }

    #[inline]
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.empty_count
    }

    /// Number of occupied cells
    #[inline]
    pub fn filled_count(&self) -> usize {
        CELL_COUNT - self.empty_count
    }

    #[inline]
    pub fn history(&self) -> &[u8] {
        &self.history
    }

    /// Most recently applied, not yet undone index
    #[inline]
    pub fn last_move(&self) -> Option<usize> {
        self.history.last().map(|&idx| idx as usize)
    }

    /// Player to move next
    #[inline]
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    /// Mark `index` for `player` and hand the turn over.
    ///
    /// The cell must be empty; callers are expected to check first.
    pub fn apply(&mut self, index: usize, player: Player) -> Result<()> {
        match self.cells.get(index) {
            None => return Err(Error::CellOutOfRange { index }),
            Some(Cell::Empty) => {}
            Some(_) => return Err(Error::InvalidMove { index }),
        }

        self.cells[index] = Cell::from(player);
        self.empty_count -= 1;
        self.history.push(index as u8);
        self.active_player = self.active_player.opponent();
        Ok(())
    }

    /// Take back the most recent move
    pub fn undo(&mut self) -> Result<usize> {
        let index = self.history.pop().ok_or(Error::EmptyHistory)? as usize;
        self.cells[index] = Cell::Empty;
        self.empty_count += 1;
        self.active_player = self.active_player.opponent();
        Ok(index)
    }

    /// Game result from a full scan of the winning lines
    #[inline]
    pub fn outcome(&self) -> GameOutcome {
        rules::outcome(&self.cells, self.empty_count)
    }

    /// Iterate over empty cell indices in ascending order
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| idx)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
