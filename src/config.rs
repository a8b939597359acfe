use std::time::Duration;

use crate::snake::Direction;
use crate::{Coord, Pos};

/// All game constants plus the geometry derived from them, computed once
/// at startup so the invariants between derived values live in one place.
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub initial_length: usize,
    pub items_to_win: u32,
    pub obstacle_count: usize,
    pub obstacle_side: Coord,
    pub obstacle_margin: Coord,
    pub start: Pos,
    pub start_direction: Direction,
    pub base_delay: Duration,
    pub speedup: f64,

    // Derived geometry
    pub portal_left: Pos,
    pub portal_right: Pos,
    pub portal_top: Pos,
    pub portal_bottom: Pos,
    pub anchor_x_range: (Coord, Coord),
    pub anchor_y_range: (Coord, Coord),
    pub capacity: usize,
}

impl GameConfig {
    pub fn new(
        width: Coord,
        height: Coord,
        initial_length: usize,
        items_to_win: u32,
        obstacle_count: usize,
        obstacle_side: Coord,
        obstacle_margin: Coord,
        base_delay: Duration,
        speedup: f64,
    ) -> Self {
        let start = (width / 2, height / 2);
        let inset = obstacle_margin + obstacle_side - 1;

        GameConfig {
            width,
            height,
            initial_length,
            items_to_win,
            obstacle_count,
            obstacle_side,
            obstacle_margin,
            start,
            start_direction: Direction::Right,
            base_delay,
            speedup,
            portal_left: (0, height / 2),
            portal_right: (width - 1, height / 2),
            portal_top: (width / 2, 0),
            portal_bottom: (width / 2, height - 1),
            anchor_x_range: (obstacle_margin, width - 1 - inset),
            anchor_y_range: (obstacle_margin, height - 1 - inset),
            capacity: initial_length + items_to_win as usize,
        }
    }

    /// The classic ruleset: 80x40 board, 4 square obstacles, 10 items to win.
    pub fn standard() -> Self {
        GameConfig::new(80, 40, 10, 10, 4, 5, 2, Duration::from_millis(100), 0.95)
    }

    /// Interior cells are everything strictly inside the border.
    pub fn interior_x_range(&self) -> (Coord, Coord) {
        (1, self.width - 2)
    }

    pub fn interior_y_range(&self) -> (Coord, Coord) {
        (1, self.height - 2)
    }
}
