//! Board representation for 3D tic-tac-toe

pub mod board;

#[cfg(test)]
mod tests;

// Re-exports
pub use board::Board;

/// Cube edge length (3x3x3)
pub const CUBE_SIZE: usize = 3;
pub const CELL_COUNT: usize = CUBE_SIZE * CUBE_SIZE * CUBE_SIZE; // 27

/// The two player identities. `A` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Get the other player
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// 1-based seat number, as shown to users ("Player 1", "Computer 2")
    #[inline]
    pub fn seat(self) -> u8 {
        match self {
            Player::A => 1,
            Player::B => 2,
        }
    }
}

/// Contents of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    A,
    B,
}

impl Cell {
    /// Player holding this cell, if any
    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::A => Some(Player::A),
            Cell::B => Some(Player::B),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Player> for Cell {
    #[inline]
    fn from(player: Player) -> Self {
        match player {
            Player::A => Cell::A,
            Player::B => Cell::B,
        }
    }
}

/// Position in the cube.
///
/// Linearised as `x * 9 + y * 3 + z`, so `y` selects the level and
/// the cells of one level are `{x * 9 + y * 3 + z | x, z in 0..3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Pos {
    #[inline]
    pub fn new(x: u8, y: u8, z: u8) -> Self {
        debug_assert!(
            (x as usize) < CUBE_SIZE && (y as usize) < CUBE_SIZE && (z as usize) < CUBE_SIZE
        );
        Self { x, y, z }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.x as usize * CUBE_SIZE * CUBE_SIZE + self.y as usize * CUBE_SIZE + self.z as usize
    }

    /// Returns `None` for indices outside the cube
    #[inline]
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx >= CELL_COUNT {
            return None;
        }
        Some(Self {
            x: (idx / (CUBE_SIZE * CUBE_SIZE)) as u8,
            y: ((idx / CUBE_SIZE) % CUBE_SIZE) as u8,
            z: (idx % CUBE_SIZE) as u8,
        })
    }

    #[inline]
    pub fn is_valid(x: i32, y: i32, z: i32) -> bool {
        let n = CUBE_SIZE as i32;
        (0..n).contains(&x) && (0..n).contains(&y) && (0..n).contains(&z)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
