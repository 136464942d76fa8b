use rand::Rng;
use serde::{Deserialize, Serialize};

/// A cell of the board.  `x` grows rightwards and `z` grows downwards from
/// the top-left corner.
///
/// Coordinates are signed so that the cell one step past an edge can be
/// represented and then rejected by [`Board::in_bounds()`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub const fn new(x: i32, z: i32) -> Cell {
        Cell { x, z }
    }
}

/// Geometry of a square board of `size` × `size` cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Board {
    size: u16,
}

impl Board {
    pub fn new(size: u16) -> Board {
        Board { size }
    }

    pub fn size(self) -> u16 {
        self.size
    }

    /// Total number of cells on the board
    pub fn cell_count(self) -> usize {
        let side = usize::from(self.size);
        side.saturating_mul(side)
    }

    pub fn in_bounds(self, cell: Cell) -> bool {
        let side = i32::from(self.size);
        (0..side).contains(&cell.x) && (0..side).contains(&cell.z)
    }

    /// Return whether any of the cells in `body` equals `cell`
    pub fn occupied<I: IntoIterator<Item = Cell>>(cell: Cell, body: I) -> bool {
        body.into_iter().any(|part| part == cell)
    }

    /// The cell at the center of the board, rounding down & right
    pub fn center(self) -> Cell {
        let half = i32::from(self.size / 2);
        Cell::new(half, half)
    }

    /// Draw a cell uniformly at random from the whole board
    pub fn random_cell<R: Rng>(self, rng: &mut R) -> Cell {
        let side = i32::from(self.size);
        Cell::new(rng.random_range(0..side), rng.random_range(0..side))
    }
}
