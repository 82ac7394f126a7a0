//! Game state and core simulation types
//!
//! One `GameState` is the whole session: the front end owns it and hands it
//! to `tick::step` by `&mut` for every input, and renders from `&GameState`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Collision, check_collision};
use super::food::place_food;
use super::grid::{Cell, Grid};
use super::snake::Snake;
use crate::highscores::HighScore;
use crate::tuning::Tuning;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Snake is moving
    Playing,
    /// Run frozen, timer ignored
    Paused,
    /// Run ended, waiting for restart or menu
    GameOver,
}

impl GamePhase {
    /// Whether the board (snake, food, HUD) is drawn in this phase
    pub fn shows_board(self) -> bool {
        !matches!(self, GamePhase::Menu)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducible food placement
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub grid: Grid,
    pub snake: Snake,
    /// `None` only once the snake covers every cell
    pub food: Option<Cell>,
    pub score: u64,
    pub high_score: HighScore,
    /// Current tick interval (ms)
    pub speed_ms: u32,
    pub phase: GamePhase,
    /// Ticks simulated in the current run
    pub ticks: u64,
    /// The run that just ended beat the previous best
    pub new_high_score: bool,
}

impl GameState {
    /// Create a session on the menu screen
    pub fn new(seed: u64, tuning: Tuning, high_score: HighScore) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning ({}), using defaults", e);
                Tuning::default()
            }
        };
        let grid = Grid::new(tuning.grid_width, tuning.grid_height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let snake = Snake::default();
        let food = place_food(&grid, &snake, &mut rng);

        Self {
            seed,
            rng,
            speed_ms: tuning.initial_speed_ms,
            tuning,
            grid,
            snake,
            food,
            score: 0,
            high_score,
            phase: GamePhase::Menu,
            ticks: 0,
            new_high_score: false,
        }
    }

    /// Reset snake, food, score and speed and start playing
    pub fn start_run(&mut self) {
        self.snake.reset();
        self.food = place_food(&self.grid, &self.snake, &mut self.rng);
        self.score = 0;
        self.speed_ms = self.tuning.initial_speed_ms;
        self.ticks = 0;
        self.new_high_score = false;
        self.phase = GamePhase::Playing;
    }

    /// Interval the front end should use for the next tick (ms)
    pub fn tick_interval(&self) -> u32 {
        self.speed_ms
    }

    pub fn check_collision(&self) -> Collision {
        check_collision(&self.snake, &self.grid)
    }

    /// Eat the food if the head is on it: score, grow, relocate, speed up.
    /// Returns true when food was eaten.
    pub fn check_food(&mut self) -> bool {
        if self.food != Some(self.snake.head()) {
            return false;
        }
        self.score += self.tuning.points_per_food;
        self.snake.grow();
        self.food = place_food(&self.grid, &self.snake, &mut self.rng);
        self.speed_ms = self.tuning.next_speed(self.speed_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Direction;

    fn state() -> GameState {
        GameState::new(12345, Tuning::default(), HighScore::default())
    }

    /// Put food directly in front of the head
    fn food_ahead(state: &mut GameState) {
        let snake = &state.snake;
        state.food = Some(snake.head().step(snake.direction()));
    }

    #[test]
    fn test_new_state_on_menu() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Menu);
        assert_eq!(s.score, 0);
        assert_eq!(s.speed_ms, 150);
        let food = s.food.unwrap();
        assert!(!s.snake.occupies(food));
    }

    #[test]
    fn test_invalid_tuning_replaced() {
        let tuning = Tuning {
            grid_width: 2,
            ..Default::default()
        };
        let s = GameState::new(1, tuning, HighScore::default());
        assert_eq!(s.tuning, Tuning::default());
    }

    #[test]
    fn test_check_food_scores_and_grows() {
        let mut s = state();
        s.start_run();
        food_ahead(&mut s);
        s.snake.advance();
        assert!(s.check_food());
        assert_eq!(s.score, 10);
        assert_eq!(s.speed_ms, 148);
        assert!(s.snake.grow_pending());
        let food = s.food.unwrap();
        assert!(!s.snake.occupies(food));

        // Not on food any more
        assert!(!s.check_food());
        assert_eq!(s.score, 10);
    }

    #[test]
    fn test_speed_floor_reached_and_held() {
        let mut s = state();
        s.start_run();
        // (150 - 80) / 2 = 35 foods to reach the floor, then one more
        for eaten in 1..=36u64 {
            // Fresh one-cell snake each round so it never reaches a wall
            s.snake = Snake::new([Cell::new(10, 10)], Direction::Right);
            food_ahead(&mut s);
            s.snake.advance();
            assert!(s.check_food());
            assert_eq!(s.score, eaten * 10);
            let expected = 150u32.saturating_sub(2 * eaten as u32).max(80);
            assert_eq!(s.speed_ms, expected);
            assert!(s.speed_ms >= 80);
        }
        assert_eq!(s.speed_ms, 80);
    }

    #[test]
    fn test_start_run_resets() {
        let mut s = state();
        s.start_run();
        s.score = 90;
        s.speed_ms = 100;
        s.snake.grow();
        s.snake.advance();
        s.new_high_score = true;

        s.start_run();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.speed_ms, 150);
        assert_eq!(s.snake, Snake::default());
        assert!(!s.new_high_score);
    }
}
