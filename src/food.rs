use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::grid::{Cell, Grid};

/// Food never spawns closer than this many cells to an edge
pub const EDGE_MARGIN: u16 = 2;

/// Something for the cat to eat. Eaten food stays in the list, flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub col: u16,
    pub row: u16,
    /// Picks the look and sound of this item
    pub kind: usize,
    pub eaten: bool,
}

impl Food {
    pub fn new((col, row): Cell, kind: usize) -> Self {
        Food { col, row, kind, eaten: false }
    }

    pub fn cell(&self) -> Cell {
        (self.col, self.row)
    }
}

/// Places food on random cells away from the grid edges
pub struct FoodSpawner {
    rng: Xoshiro256StarStar,
    kinds: usize,
}

impl FoodSpawner {
    pub fn new(seed: u64, kinds: usize) -> Self {
        FoodSpawner { rng: Xoshiro256StarStar::seed_from_u64(seed), kinds: kinds.max(1) }
    }

    /// Picks a cell inside the margin, other than `avoid` whenever there is a choice
    pub fn spawn(&mut self, grid: &Grid, avoid: Option<Cell>) -> Food {
        let cells = interior_cells(grid);
        let choices: Vec<Cell> = cells.iter().copied().filter(|cell| Some(*cell) != avoid).collect();

        let cell = choices
            .choose(&mut self.rng)
            .or_else(|| cells.choose(&mut self.rng))
            .copied()
            .unwrap_or((grid.cols() / 2, grid.rows() / 2));

        Food::new(cell, self.rng.gen_range(0..self.kinds))
    }
}

fn interior_cells(grid: &Grid) -> Vec<Cell> {
    let cols = EDGE_MARGIN..grid.cols().saturating_sub(EDGE_MARGIN);
    let rows = EDGE_MARGIN..grid.rows().saturating_sub(EDGE_MARGIN);

    rows.flat_map(|row| cols.clone().map(move |col| (col, row))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_respects_margin() {
        let grid = Grid::new(12, 9);
        let mut spawner = FoodSpawner::new(7, 3);

        for _ in 0..500 {
            let food = spawner.spawn(&grid, None);
            assert!((2..10).contains(&food.col), "col {} out of range", food.col);
            assert!((2..7).contains(&food.row), "row {} out of range", food.row);
            assert!(food.kind < 3);
            assert!(!food.eaten);
        }
    }

    #[test]
    fn test_spawn_avoids_cell() {
        let grid = Grid::new(6, 6);
        let mut spawner = FoodSpawner::new(1, 1);

        // Interior is 2x2, so the avoided cell would come up often
        for _ in 0..200 {
            assert_ne!(spawner.spawn(&grid, Some((2, 2))).cell(), (2, 2));
        }
    }

    #[test]
    fn test_same_seed_same_food() {
        let grid = Grid::new(20, 20);
        let mut a = FoodSpawner::new(42, 3);
        let mut b = FoodSpawner::new(42, 3);

        for _ in 0..20 {
            assert_eq!(a.spawn(&grid, None), b.spawn(&grid, None));
        }
    }

    #[test]
    fn test_degenerate_grid_still_places_food() {
        let grid = Grid::new(3, 3);
        let mut spawner = FoodSpawner::new(0, 2);
        assert_eq!(spawner.spawn(&grid, None).cell(), (1, 1));
    }
}
