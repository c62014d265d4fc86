use crate::direction::Direction;

/// A cell on the grid as `(col, row)`
pub type Cell = (u16, u16);

/// Fixed size toroidal grid: leaving one edge re-enters at the opposite one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cols: u16,
    rows: u16,
}

impl Grid {
    pub fn new(cols: u16, rows: u16) -> Self {
        debug_assert!(cols > 0 && rows > 0, "grid must not be empty");
        Grid { cols, rows }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn contains(&self, (col, row): Cell) -> bool {
        col < self.cols && row < self.rows
    }

    /// Wraps signed coordinates back onto the grid
    pub fn wrap(&self, col: i32, row: i32) -> Cell {
        (
            col.rem_euclid(self.cols as i32) as u16,
            row.rem_euclid(self.rows as i32) as u16,
        )
    }

    /// The cell `steps` cells away from `cell` in `dir`
    pub fn offset(&self, (col, row): Cell, dir: Direction, steps: i32) -> Cell {
        let (dc, dr) = dir.delta();
        self.wrap(col as i32 + dc * steps, row as i32 + dr * steps)
    }

    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Cell {
        self.offset(cell, dir, 1)
    }
}
