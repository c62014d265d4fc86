use crate::direction::Direction::{self, *};
use crate::grid::{Cell, Grid};

pub const INITIAL_LENGTH: usize = 4;

/// One grid cell of the cat's body, with the facing used to orient it on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub col: u16,
    pub row: u16,
    pub facing: Direction,
}

impl Segment {
    pub fn new((col, row): Cell, facing: Direction) -> Self {
        Segment { col, row, facing }
    }

    pub fn cell(&self) -> Cell {
        (self.col, self.row)
    }
}

/// The cat. Segment 0 is the head, the last one is the tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Segment>,
}

impl Snake {
    /// Lays out `length` segments starting at `head` and trailing away from `facing`
    pub fn new(head: Cell, facing: Direction, length: usize, grid: &Grid) -> Self {
        let body = (0..length.max(1))
            .map(|i| Segment::new(grid.offset(head, facing.opposite(), i as i32), facing))
            .collect();

        Snake { body }
    }

    /// The starting cat: near the bottom of the grid, centered, heading right
    pub fn spawn(grid: &Grid) -> Self {
        let head = (grid.cols() / 2, grid.rows().saturating_sub(4));
        Snake::new(head, Right, INITIAL_LENGTH, grid)
    }

    pub fn body(&self) -> &[Segment] {
        &self.body
    }

    pub fn head(&self) -> &Segment {
        &self.body[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Adds a segment on top of the tail; it stays behind when the body next slides forward
    pub fn grow(&mut self) {
        let tail = *self.tail();
        self.body.push(tail);
    }

    /// Slides every segment into the place of the one ahead of it, then moves the head
    /// one cell towards `facing`
    pub fn move_step(&mut self, facing: Direction, grid: &Grid) {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let head = &mut self.body[0];
        let (col, row) = grid.neighbor(head.cell(), facing);
        *head = Segment { col, row, facing };
    }

    /// Whether the head shares a cell with the body. The two segments nearest the
    /// tail never count, so the head may run onto them.
    pub fn hits_itself(&self) -> bool {
        let head = self.head().cell();
        let checked = self.body.len().saturating_sub(3);

        self.body.iter().skip(1).take(checked).any(|seg| seg.cell() == head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(snake: &Snake) -> Vec<Cell> {
        snake.body().iter().map(Segment::cell).collect()
    }

    #[test]
    fn test_spawn_layout() {
        let grid = Grid::new(20, 20);
        let snake = Snake::spawn(&grid);

        assert_eq!(snake.len(), INITIAL_LENGTH);
        assert_eq!(cells(&snake), vec![(10, 16), (9, 16), (8, 16), (7, 16)]);
        assert!(snake.body().iter().all(|seg| seg.facing == Right));
    }

    #[test]
    fn test_move_step_slides_body() {
        let grid = Grid::new(20, 20);
        let mut snake = Snake::new((5, 5), Right, 3, &grid);

        snake.move_step(Down, &grid);

        assert_eq!(cells(&snake), vec![(5, 6), (5, 5), (4, 5)]);
        assert_eq!(snake.head().facing, Down);
        assert_eq!(snake.body()[1].facing, Right);
    }

    #[test]
    fn test_grown_segment_stays_behind() {
        let grid = Grid::new(20, 20);
        let mut snake = Snake::new((5, 5), Right, 3, &grid);

        snake.grow();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.body()[3], snake.body()[2]);

        snake.move_step(Right, &grid);
        assert_eq!(cells(&snake), vec![(6, 5), (5, 5), (4, 5), (3, 5)]);
    }

    #[test]
    fn test_body_trails_across_edge() {
        let grid = Grid::new(10, 10);
        let snake = Snake::new((1, 4), Right, 4, &grid);
        assert_eq!(cells(&snake), vec![(1, 4), (0, 4), (9, 4), (8, 4)]);
    }

    #[test]
    fn test_hits_itself_ignores_last_two_segments() {
        let grid = Grid::new(20, 20);
        // Head sitting on its own tail cell
        let mut snake = Snake::new((5, 5), Right, 4, &grid);
        snake.body[0] = Segment::new((2, 5), Right);
        assert!(!snake.hits_itself());

        // ...and on the second to last
        snake.body[0] = Segment::new((3, 5), Right);
        assert!(!snake.hits_itself());

        // The first body segment counts
        snake.body[0] = Segment::new((4, 5), Right);
        assert!(snake.hits_itself());
    }

    #[test]
    fn test_short_snake_never_hits_itself() {
        let grid = Grid::new(20, 20);
        let mut snake = Snake::new((5, 5), Right, 2, &grid);
        snake.body[0] = snake.body[1];
        assert!(!snake.hits_itself());
    }
}
