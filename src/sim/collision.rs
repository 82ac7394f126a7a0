//! Collision detection
//!
//! Run after `Snake::advance`: the head is the only cell that moved into
//! new territory, so the head is all we have to test.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::snake::Snake;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Head is on a free in-bounds cell
    None,
    /// Head left the board
    Wall,
    /// Head ran into the body
    SelfHit,
}

impl Collision {
    pub fn is_fatal(self) -> bool {
        !matches!(self, Collision::None)
    }
}

/// Check the snake's head against the board edges and its own body
pub fn check_collision(snake: &Snake, grid: &Grid) -> Collision {
    if !grid.contains(snake.head()) {
        Collision::Wall
    } else if snake.hits_itself() {
        Collision::SelfHit
    } else {
        Collision::None
    }
}
