//! Fixed-order Moore neighborhood.
//!
//! The order of the eight entries is part of the rule contract: a
//! position-sensitive [`RuleTable`](super::RuleTable) keyed on one ordering
//! behaves differently under another. Entries are laid out in reading order
//! around the center cell, skipping the center itself.

use super::Cell;

/// Relative `(row, column)` offsets sampled for a cell, in neighborhood order.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The eight neighbor states of a cell, in [`NEIGHBOR_OFFSETS`] order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Neighborhood([Cell; 8]);

impl Neighborhood {
    pub const TOP_LEFT: usize = 0;
    pub const TOP: usize = 1;
    pub const TOP_RIGHT: usize = 2;
    pub const MID_LEFT: usize = 3;
    pub const MID_RIGHT: usize = 4;
    pub const BOTTOM_LEFT: usize = 5;
    pub const BOTTOM: usize = 6;
    pub const BOTTOM_RIGHT: usize = 7;

    pub const fn new(cells: [Cell; 8]) -> Self {
        Self(cells)
    }

    /// Build from the compact form: bit `i` set means entry `i` is alive.
    pub fn from_bits(bits: u8) -> Self {
        let mut cells = [Cell::Dead; 8];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = Cell::from_alive((bits >> i) & 1 == 1);
        }
        Self(cells)
    }

    /// Compact form, inverse of [`Neighborhood::from_bits`].
    pub fn bits(&self) -> u8 {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .fold(0u8, |acc, (i, _)| acc | (1 << i))
    }

    /// Every one of the 256 possible neighborhoods.
    pub fn all() -> impl Iterator<Item = Neighborhood> {
        (0..=u8::MAX).map(Self::from_bits)
    }

    /// Number of alive neighbors (0-8)
    pub fn alive_count(&self) -> u8 {
        self.iter().filter(|cell| cell.is_alive()).count() as u8
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.0.iter().copied()
    }
}

impl std::ops::Index<usize> for Neighborhood {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.0[index]
    }
}
