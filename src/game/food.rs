use super::board::{Board, Cell};
use super::direction::Direction;
use crate::consts;
use rand::Rng;
use std::collections::VecDeque;

/// Chooses where the next fruit goes.
///
/// The first fruit of each round sits at a fixed cell straight ahead of the
/// starting snake; every later fruit is drawn uniformly at random from the
/// cells not covered by the snake.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FoodPlacer {
    first: Option<Cell>,
}

impl FoodPlacer {
    /// Create a placer whose first fruit lies [`FIRST_FOOD_OFFSET`][consts::FIRST_FOOD_OFFSET]
    /// cells from `head` in `direction`
    pub fn new(head: Cell, direction: Direction) -> FoodPlacer {
        let (dx, dz) = direction.unit_vector();
        let first = Cell::new(
            head.x + dx * consts::FIRST_FOOD_OFFSET,
            head.z + dz * consts::FIRST_FOOD_OFFSET,
        );
        FoodPlacer { first: Some(first) }
    }

    /// Whether the next call to [`FoodPlacer::place()`] will return the fixed
    /// first cell
    pub fn is_first(&self) -> bool {
        self.first.is_some()
    }

    /// Return the cell for the next fruit.  Returns `None` only if `body`
    /// covers every cell of `board`.
    pub fn place<R: Rng>(
        &mut self,
        board: Board,
        body: &VecDeque<Cell>,
        rng: &mut R,
    ) -> Option<Cell> {
        if let Some(cell) = self.first.take() {
            return Some(cell);
        }
        if body.len() >= board.cell_count() {
            return None;
        }
        loop {
            let cell = board.random_cell(rng);
            if !Board::occupied(cell, body.iter().copied()) {
                return Some(cell);
            }
        }
    }
}
