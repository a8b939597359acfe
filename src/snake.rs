use crate::board::{Board, Cell};
use crate::config::GameConfig;
use crate::Pos;

use Direction::*;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> Pos {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// What one tick of the engine did, for the game loop and the painter.
/// On a collision the head still occupies the cell it crashed into; the
/// caller inspects the flag before rendering the next tick.
pub struct StepOutcome {
    pub new_head: Pos,
    pub old_head: Pos,
    /// Cell vacated by the tail this tick; `None` when the snake grew.
    pub freed_tail: Option<Pos>,
    pub eaten: bool,
    pub collision: bool,
}

/// A fixed-capacity segment buffer with an explicit active length.
/// Slot 0 is the head. Every tick shifts all capacity slots, so the slots
/// beyond `len` always carry the position chain the tail just left behind,
/// and growth simply reveals the next one.
pub struct Snake {
    segments: Vec<Pos>,
    len: usize,
    direction: Direction,
}

impl Snake {
    pub fn new(cfg: &GameConfig) -> Self {
        let (dx, dy) = cfg.start_direction.delta();
        let mut segments: Vec<Pos> = (0..cfg.initial_length as i16)
            .map(|i| (cfg.start.0 - dx * i, cfg.start.1 - dy * i))
            .collect();
        let tail = *segments.last().unwrap();
        segments.resize(cfg.capacity, tail);

        Snake { segments, len: cfg.initial_length, direction: cfg.start_direction }
    }

    pub fn head(&self) -> Pos {
        self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// The active segments, head first.
    pub fn body(&self) -> &[Pos] {
        &self.segments[..self.len]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Reversing into yourself is ignored; any other change is applied.
    pub fn set_direction(&mut self, new_direction: Direction) {
        match (new_direction, self.direction) {
            (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left) => {}
            _ => self.direction = new_direction,
        }
    }

    /// Advances one tick: shift the body, move the head, detect collisions,
    /// resolve portal exits, consume an item if the head landed on one.
    pub fn advance(&mut self, board: &mut Board) -> StepOutcome {
        let old_head = self.segments[0];
        let old_tail = self.segments[self.len - 1];

        // Shift every capacity slot, not just the active ones, so the slot
        // revealed by a later growth already holds a valid position.
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }

        let (dx, dy) = self.direction.delta();
        let mut head = (old_head.0 + dx, old_head.1 + dy);

        let mut collision = false;
        if self.segments[1..self.len].contains(&head) {
            collision = true;
        }
        // The head can only be off-board when it just left through a portal
        // cell; everywhere else the border is in the way first.
        if board.contains(head) && board.cell_at(head).blocks() {
            collision = true;
        }

        // Portal exits, one edge at most per tick.
        let right = board.portal_right();
        let left = board.portal_left();
        let top = board.portal_top();
        let bottom = board.portal_bottom();
        if head.0 > right.0 && head.1 == right.1 {
            head.0 = left.0;
        } else if head.0 < left.0 && head.1 == left.1 {
            head.0 = right.0;
        } else if head.1 < top.1 && head.0 == top.0 {
            head.1 = bottom.1;
        } else if head.1 > bottom.1 && head.0 == bottom.0 {
            head.1 = top.1;
        }
        self.segments[0] = head;

        let mut eaten = false;
        if board.cell_at(head) == Cell::Item {
            eaten = true;
            board.set_cell(head, Cell::Empty);
            debug_assert!(self.len < self.segments.len());
            self.len += 1;
        }

        StepOutcome {
            new_head: head,
            old_head,
            freed_tail: if eaten { None } else { Some(old_tail) },
            eaten,
            collision,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::board::{Board, Cell};
    use crate::config::GameConfig;

    // 10x10 board, no obstacles, snake of 3 starting at the center.
    fn test_setup() -> (GameConfig, Board, Snake) {
        let cfg = GameConfig::new(10, 10, 3, 5, 0, 3, 1, Duration::from_millis(100), 0.95);
        let board = Board::new(&cfg);
        let snake = Snake::new(&cfg);
        (cfg, board, snake)
    }

    #[test]
    fn initial_body_is_a_straight_line_behind_the_head() {
        let (_, _, snake) = test_setup();
        assert_eq!(snake.body(), &[(5, 5), (4, 5), (3, 5)]);
        assert_eq!(snake.direction(), Right);
    }

    #[test]
    fn plain_step_shifts_every_segment_forward() {
        let (_, mut board, mut snake) = test_setup();

        let outcome = snake.advance(&mut board);

        assert_eq!(snake.body(), &[(6, 5), (5, 5), (4, 5)]);
        assert!(!outcome.collision);
        assert!(!outcome.eaten);
        assert_eq!(outcome.freed_tail, Some((3, 5)));
    }

    #[test]
    fn every_segment_takes_the_position_of_the_one_ahead() {
        let (_, mut board, mut snake) = test_setup();

        for _ in 0..3 {
            let before: Vec<_> = snake.body().to_vec();
            snake.advance(&mut board);
            let after = snake.body();

            for i in 1..after.len() {
                assert_eq!(after[i], before[i - 1]);
            }
        }
    }

    #[test]
    fn direction_reversals_are_rejected() {
        let (_, _, mut snake) = test_setup();
        let pairs = [(Right, Left), (Left, Right), (Up, Down), (Down, Up)];

        for &(current, reverse) in &pairs {
            snake.direction = current;
            snake.set_direction(reverse);
            assert_eq!(snake.direction(), current);
        }
    }

    #[test]
    fn perpendicular_turns_are_accepted() {
        let (_, _, mut snake) = test_setup();
        snake.set_direction(Down);
        assert_eq!(snake.direction(), Down);
    }

    #[test]
    fn right_portal_exit_reenters_at_the_left_portal() {
        let (_, mut board, mut snake) = test_setup();

        // Head walks from (5,5) to the right portal cell (9,5), then out.
        for _ in 0..4 {
            let outcome = snake.advance(&mut board);
            assert!(!outcome.collision);
        }
        assert_eq!(snake.head(), (9, 5));

        let outcome = snake.advance(&mut board);
        assert_eq!(snake.head(), (0, 5));
        assert!(!outcome.collision);

        // And the next step moves away from the portal column, not back out.
        snake.advance(&mut board);
        assert_eq!(snake.head(), (1, 5));
    }

    #[test]
    fn top_portal_exit_reenters_at_the_bottom_portal() {
        let (_, mut board, mut snake) = test_setup();

        snake.set_direction(Up);
        // Head goes from (5,5) up through the top portal cell (5,0).
        for _ in 0..5 {
            let outcome = snake.advance(&mut board);
            assert!(!outcome.collision);
        }
        assert_eq!(snake.head(), (5, 0));

        snake.advance(&mut board);
        assert_eq!(snake.head(), (5, 9));
    }

    #[test]
    fn hitting_a_wall_flags_collision_but_still_moves_the_head() {
        let (_, mut board, mut snake) = test_setup();
        board.set_cell((6, 5), Cell::Obstacle);

        let outcome = snake.advance(&mut board);

        assert!(outcome.collision);
        assert!(!outcome.eaten);
        assert_eq!(snake.head(), (6, 5));
    }

    #[test]
    fn hitting_the_border_flags_collision() {
        let (_, mut board, mut snake) = test_setup();
        snake.set_direction(Down);
        snake.advance(&mut board); // (5,6)
        snake.set_direction(Right);

        // Walk right into the border at x=9, below the portal row.
        let mut last = None;
        for _ in 0..4 {
            last = Some(snake.advance(&mut board));
        }
        let outcome = last.unwrap();
        assert!(outcome.collision);
        assert_eq!(snake.head(), (9, 6));
    }

    #[test]
    fn eating_an_item_grows_by_one_and_clears_the_cell() {
        let (_, mut board, mut snake) = test_setup();
        board.set_cell((7, 7), Cell::Item);

        // Steer the head from (5,5) onto (7,7).
        snake.advance(&mut board); // (6,5)
        snake.advance(&mut board); // (7,5)
        snake.set_direction(Down);
        snake.advance(&mut board); // (7,6)
        let outcome = snake.advance(&mut board); // (7,7)

        assert!(outcome.eaten);
        assert!(!outcome.collision);
        assert_eq!(outcome.freed_tail, None);
        assert_eq!(snake.len(), 4);
        assert_eq!(board.cell_at((7, 7)), Cell::Empty);

        // The revealed slot continues the chain: no gap behind the tail.
        let body = snake.body();
        for i in 1..body.len() {
            let (dx, dy) = (body[i - 1].0 - body[i].0, body[i - 1].1 - body[i].1);
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn running_into_the_body_flags_self_collision() {
        let cfg = GameConfig::new(10, 10, 5, 5, 0, 3, 1, Duration::from_millis(100), 0.95);
        let mut board = Board::new(&cfg);
        let mut snake = Snake::new(&cfg);

        // Curl back into the body: down, left, then up into segment (4,5).
        snake.set_direction(Down);
        snake.advance(&mut board);
        snake.set_direction(Left);
        snake.advance(&mut board);
        snake.set_direction(Up);
        let outcome = snake.advance(&mut board);

        assert!(outcome.collision);
        assert_eq!(snake.head(), (4, 5));
    }

    #[test]
    fn brushing_past_the_old_tail_cell_is_not_a_collision() {
        let (_, mut board, mut snake) = test_setup();

        // With length 3 the tightest turn never reaches an active segment.
        snake.set_direction(Down);
        snake.advance(&mut board);
        snake.set_direction(Left);
        snake.advance(&mut board);
        snake.set_direction(Up);
        let outcome = snake.advance(&mut board);

        assert!(!outcome.collision);
    }
}
