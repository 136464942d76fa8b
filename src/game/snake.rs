use super::board::{Board, Cell};
use super::direction::Direction;
use crate::consts;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// All cells are relative to the top-left corner of the board.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Snake {
    /// The cells of the snake, head first
    pub(super) body: VecDeque<Cell>,

    /// The direction in which the snake moved on its last tick
    pub(super) direction: Direction,

    /// The direction most recently requested for the next tick
    pub(super) pending: Direction,
}

impl Snake {
    /// Create a new snake of [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH]
    /// cells with its head at `head`, facing in `direction` and trailing
    /// straight behind.
    pub fn new(head: Cell, direction: Direction) -> Snake {
        let behind = direction.reverse();
        let body = std::iter::successors(Some(head), |&c| Some(behind.advance(c)))
            .take(consts::INITIAL_SNAKE_LENGTH)
            .collect();
        Snake {
            body,
            direction,
            pending: direction,
        }
    }

    /// The canonical starting snake for `board`: centered, facing right
    pub fn starting(board: Board) -> Snake {
        Snake::new(board.center(), Direction::Right)
    }

    /// Return the position of the snake's head, or `None` if the snake has no
    /// cells (i.e., no round has started yet)
    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    /// Return the cells of the snake, head first
    pub fn cells(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn contains(&self, cell: Cell) -> bool {
        Board::occupied(cell, self.body.iter().copied())
    }

    /// Ask for the snake to head in `direction` on its next tick
    pub fn request(&mut self, direction: Direction) {
        self.pending = direction;
    }

    /// Commit the pending direction for the coming tick and return the
    /// resulting heading.  A request to reverse is dropped, and the snake
    /// keeps going straight.
    pub fn resolve_direction(&mut self) -> Direction {
        if self.pending.is_opposite(self.direction) {
            self.pending = self.direction;
        }
        self.direction = self.pending;
        self.direction
    }

    /// Return the cell the head would move into when heading in `direction`
    pub fn next_head(&self, direction: Direction) -> Option<Cell> {
        self.head().map(|h| direction.advance(h))
    }

    /// Put a new head on the snake at `cell`
    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    /// Drop the last cell of the snake's tail
    pub fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn starting_snake() {
        let snake = Snake::starting(Board::new(16));
        assert_eq!(
            snake.cells(),
            &VecDeque::from([Cell::new(8, 8), Cell::new(7, 8), Cell::new(6, 8)])
        );
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), Direction::Right);
        assert_eq!(snake.head(), Some(Cell::new(8, 8)));
    }

    #[test]
    fn new_facing_up() {
        let snake = Snake::new(Cell::new(4, 4), Direction::Up);
        assert_eq!(
            snake.cells(),
            &VecDeque::from([Cell::new(4, 4), Cell::new(4, 5), Cell::new(4, 6)])
        );
    }

    #[test]
    fn default_is_empty() {
        let snake = Snake::default();
        assert!(snake.is_empty());
        assert_eq!(snake.head(), None);
        assert_eq!(snake.next_head(Direction::Up), None);
    }

    #[rstest]
    #[case(Direction::Right, Direction::Right)]
    #[case(Direction::Up, Direction::Up)]
    #[case(Direction::Down, Direction::Down)]
    #[case(Direction::Left, Direction::Right)]
    fn test_resolve_direction(#[case] requested: Direction, #[case] resolved: Direction) {
        let mut snake = Snake::starting(Board::new(16));
        snake.request(requested);
        assert_eq!(snake.pending_direction(), requested);
        assert_eq!(snake.resolve_direction(), resolved);
        assert_eq!(snake.direction(), resolved);
        assert_eq!(snake.pending_direction(), resolved);
    }

    #[test]
    fn move_and_grow() {
        let mut snake = Snake::starting(Board::new(16));
        let direction = snake.resolve_direction();
        let next = snake
            .next_head(direction)
            .expect("snake should have a head");
        assert_eq!(next, Cell::new(9, 8));
        snake.push_head(next);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.pop_tail(), Some(Cell::new(6, 8)));
        assert!(snake.contains(Cell::new(9, 8)));
        assert!(!snake.contains(Cell::new(6, 8)));
    }
}
