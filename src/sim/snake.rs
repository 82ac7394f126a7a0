//! The player's snake

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction};
use crate::consts::INITIAL_BODY;

/// Ordered body (head first), travel direction and pending growth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Cell>,
    /// Direction the next `advance` will use
    direction: Direction,
    /// Direction of the last completed move (guards the neck)
    heading: Direction,
    grow_pending: bool,
}

impl Default for Snake {
    fn default() -> Self {
        Self::new(INITIAL_BODY.iter().copied().map(Cell::from), Direction::Right)
    }
}

impl Snake {
    /// Build a snake from head-first cells.
    ///
    /// An empty iterator yields a single segment at the origin; the body is
    /// never empty.
    pub fn new(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let mut body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            body.push_back(Cell::new(0, 0));
        }
        Self {
            body,
            direction,
            heading: direction,
            grow_pending: false,
        }
    }

    /// Restore the fixed 3-cell starting body facing right
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    /// Body cells as an owned vector (head first)
    pub fn cells(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn grow_pending(&self) -> bool {
        self.grow_pending
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Request a turn. Returns false (and changes nothing) for a reversal.
    ///
    /// Reversal is judged against both the queued direction and the direction
    /// actually moved last tick, so two presses between ticks cannot fold the
    /// head back into the neck.
    pub fn set_direction(&mut self, dir: Direction) -> bool {
        if dir == self.direction.opposite() || dir == self.heading.opposite() {
            return false;
        }
        self.direction = dir;
        true
    }

    /// Grow by one segment on the next `advance`
    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    /// Move one cell in the current direction
    pub fn advance(&mut self) {
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);
        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.body.pop_back();
        }
        self.heading = self.direction;
    }

    /// Head shares a cell with another segment
    pub fn hits_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }
}
