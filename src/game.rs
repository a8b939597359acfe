use std::thread::sleep;

use crate::board::Board;
use crate::config::GameConfig;
use crate::render::{paint_board, paint_item, paint_snake, paint_step};
use crate::snake::{
    Direction::{self, *},
    Snake,
};
use crate::term::TermSession;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::thread_rng;

const FAREWELL: &str = "Snake says goodbye ;)";

enum Input {
    Steer(Direction),
    Stop,
}

pub struct Game {
    cfg: GameConfig,
    term: TermSession,
}

impl Game {
    pub fn new(cfg: GameConfig) -> Self {
        // One extra row below the board keeps the cursor off the field.
        let term = TermSession::new(cfg.width as u16, cfg.height as u16 + 1);
        Game { cfg, term }
    }

    /// Runs one full session: setup, the tick loop, and the end screen.
    /// Returns once the terminal has been restored.
    pub fn run(mut self) {
        let cfg = &self.cfg;
        let mut rng = thread_rng();

        let mut board = Board::new(cfg);
        let mut snake = Snake::new(cfg);
        board.place_obstacles(cfg, &mut rng);

        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Q to stop",
            "",
            "Press any key to begin",
        ]);
        self.term.read_key_blocking();

        // The intro box is the only thing on screen so far; repainting the
        // board over a cleared screen is simpler than restoring under it.
        self.term.clear();
        paint_board(&mut self.term, &board);
        let item = board.spawn_item(cfg, snake.body(), &mut rng);
        paint_item(&mut self.term, item);
        paint_snake(&mut self.term, &snake);
        self.term.flush();

        let mut delay = cfg.base_delay;
        let mut score = 0u32;
        let mut pending: Option<Direction> = None;
        let mut won = false;
        let mut crashed = false;
        let mut stopped = false;

        loop {
            for ev in self.term.poll_key_events() {
                match map_key(&ev) {
                    Some(Input::Steer(dir)) => pending = Some(dir),
                    Some(Input::Stop) => stopped = true,
                    None => {}
                }
            }
            if stopped {
                break;
            }

            if let Some(dir) = pending.take() {
                snake.set_direction(dir);
            }

            let outcome = snake.advance(&mut board);
            paint_step(&mut self.term, &outcome);

            if outcome.eaten {
                score += 1;
                delay = delay.mul_f64(cfg.speedup);
                if score == cfg.items_to_win {
                    won = true;
                } else {
                    let item = board.spawn_item(cfg, snake.body(), &mut rng);
                    paint_item(&mut self.term, item);
                }
            }
            self.term.flush();

            if outcome.collision {
                crashed = true;
                break;
            }
            if won {
                break;
            }

            sleep(delay);
        }

        let title = if won {
            "You won!"
        } else if crashed {
            "Game over!"
        } else {
            "Stopped."
        };
        self.term.show_message(&[
            title,
            &format!("Score: {}", score),
            "",
            "Press any key to exit",
        ]);
        self.term.read_key_blocking();

        drop(self.term); // Leaves the alternate screen before the farewell
        println!("{}", FAREWELL);
    }
}

fn map_key(ev: &KeyEvent) -> Option<Input> {
    if is_ctrl_c(ev) {
        return Some(Input::Stop);
    }
    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Input::Steer(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Input::Steer(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Input::Steer(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Input::Steer(Right)),
        KeyCode::Char('q') => Some(Input::Stop),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
