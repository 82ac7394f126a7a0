//! Food placement
//!
//! Food is sampled uniformly from the free cells instead of re-rolling
//! until a free cell comes up, so placement always terminates.

use rand::Rng;
use rand::seq::IteratorRandom;

use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Cells of `grid` not covered by the snake, in row-major order
pub fn free_cells<'a>(grid: &'a Grid, snake: &'a Snake) -> impl Iterator<Item = Cell> + 'a {
    grid.cells().filter(move |&c| !snake.occupies(c))
}

/// Pick a uniformly random free cell, or `None` when the snake fills the board
pub fn place_food<R: Rng + ?Sized>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Cell> {
    free_cells(grid, snake).choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Direction;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_food_never_on_snake() {
        let grid = Grid::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut snake = Snake::default();
        for i in 0..1200 {
            // Keep the body changing so we sample many layouts
            if i % 3 == 0 {
                snake.grow();
            }
            let turn = if i % 20 < 10 { Direction::Down } else { Direction::Right };
            snake.set_direction(turn);
            snake.advance();
            if !grid.contains(snake.head()) {
                snake.reset();
            }
            let food = place_food(&grid, &snake, &mut rng).expect("board has room");
            assert!(grid.contains(food));
            assert!(!snake.occupies(food));
        }
    }

    #[test]
    fn test_full_board_has_no_food() {
        let grid = Grid::new(2, 2);
        let snake = Snake::new(
            [(0, 0), (1, 0), (1, 1), (0, 1)].map(Cell::from),
            Direction::Up,
        );
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(free_cells(&grid, &snake).count(), 0);
        assert_eq!(place_food(&grid, &snake, &mut rng), None);
    }

    #[test]
    fn test_last_free_cell_is_chosen() {
        let grid = Grid::new(2, 2);
        let snake = Snake::new([(0, 0), (1, 0), (1, 1)].map(Cell::from), Direction::Left);
        let mut rng = Pcg32::seed_from_u64(99);
        assert_eq!(place_food(&grid, &snake, &mut rng), Some(Cell::new(0, 1)));
    }

    #[test]
    fn test_same_seed_same_food() {
        let grid = Grid::default();
        let snake = Snake::default();
        let mut a = Pcg32::seed_from_u64(4242);
        let mut b = Pcg32::seed_from_u64(4242);
        for _ in 0..50 {
            assert_eq!(
                place_food(&grid, &snake, &mut a),
                place_food(&grid, &snake, &mut b)
            );
        }
    }
}
