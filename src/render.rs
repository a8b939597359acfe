use crate::board::{Board, Cell};
use crate::snake::{Snake, StepOutcome};
use crate::Pos;

pub const HEAD_GLYPH: char = 'O';
pub const BODY_GLYPH: char = 'X';
pub const WALL_GLYPH: char = '#';
pub const ITEM_GLYPH: char = '6';

/// Minimal drawing surface. The game logic only ever places or removes a
/// glyph at a cell, so this is the whole rendering contract and the core
/// stays testable without a terminal.
pub trait CellRenderer {
    fn draw(&mut self, pos: Pos, glyph: char);
    fn erase(&mut self, pos: Pos);
}

pub fn paint_board(out: &mut impl CellRenderer, board: &Board) {
    for y in 0..board.height() {
        for x in 0..board.width() {
            match board.cell_at((x, y)) {
                Cell::Border | Cell::Obstacle => out.draw((x, y), WALL_GLYPH),
                Cell::Item => out.draw((x, y), ITEM_GLYPH),
                Cell::Empty => {}
            }
        }
    }
}

pub fn paint_snake(out: &mut impl CellRenderer, snake: &Snake) {
    let body = snake.body();
    for pos in &body[1..] {
        out.draw(*pos, BODY_GLYPH);
    }
    out.draw(body[0], HEAD_GLYPH);
}

/// Differential repaint after one tick: the old head becomes body, the new
/// head gets the head glyph, and the vacated tail cell (if any) is erased.
pub fn paint_step(out: &mut impl CellRenderer, outcome: &StepOutcome) {
    if let Some(tail) = outcome.freed_tail {
        out.erase(tail);
    }
    out.draw(outcome.old_head, BODY_GLYPH);
    out.draw(outcome.new_head, HEAD_GLYPH);
}

pub fn paint_item(out: &mut impl CellRenderer, pos: Pos) {
    out.draw(pos, ITEM_GLYPH);
}
