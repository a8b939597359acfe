use crate::render::CellRenderer;
use crate::Pos;
use std::io::{stdout, Stdout, Write};
use std::process::exit;
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

/// A raw-mode alternate-screen session. Established once at startup and
/// restored in `Drop`, so the terminal comes back even on a panic.
/// Any failure talking to the terminal is fatal.
pub struct TermSession {
    stdout: Stdout,
    cols: u16,
    rows: u16,
}

impl TermSession {
    /// Opens the session. Exits with a diagnostic (before touching any
    /// terminal mode) if the window is smaller than the playing field.
    pub fn new(min_cols: u16, min_rows: u16) -> Self {
        let (cols, rows) = terminal::size().expect("Error reading the terminal size.");
        if cols < min_cols || rows < min_rows {
            eprintln!(
                "Terminal too small: need {}x{}, have {}x{}.",
                min_cols, min_rows, cols, rows
            );
            exit(1);
        }

        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).expect("Error entering the alternate screen.");
        terminal::enable_raw_mode().expect("Error enabling raw mode.");
        execute!(stdout, cursor::Hide, terminal::Clear(ClearType::All))
            .expect("Error preparing the screen.");

        TermSession { stdout, cols, rows }
    }

    pub fn print_at(&mut self, pos: Pos, ch: char) {
        if pos.0 < 0 || pos.1 < 0 {
            return;
        }
        queue!(self.stdout, cursor::MoveTo(pos.0 as u16, pos.1 as u16), style::Print(ch))
            .expect("Error writing to the terminal.");
    }

    pub fn clear(&mut self) {
        execute!(self.stdout, terminal::Clear(ClearType::All)).expect("Error clearing the screen.");
    }

    pub fn flush(&mut self) {
        self.stdout.flush().expect("Error flushing the terminal.");
    }

    /// Drains every key event currently pending, returning immediately
    /// whether or not anything was typed.
    pub fn poll_key_events(&self) -> Vec<KeyEvent> {
        let mut events = vec![];

        while poll(Duration::from_millis(0)).expect("Error polling for input.") {
            if let Event::Key(ev) = read().expect("Error reading input.") {
                events.push(ev);
            }
        }

        events
    }

    pub fn read_key_blocking(&self) -> KeyEvent {
        loop {
            if let Event::Key(ev) = read().expect("Error reading input.") {
                return ev;
            }
        }
    }

    /// Draws a boxed message centred on the screen. The box stays until
    /// something paints over it; nothing underneath is preserved.
    pub fn show_message(&mut self, lines: &[&str]) {
        let box_height = lines.len() as u16 + 2;
        let box_width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 4;
        let left = self.cols.saturating_sub(box_width) / 2;
        let top = self.rows.saturating_sub(box_height) / 2;

        let blank = " ".repeat(box_width as usize);
        queue!(self.stdout, cursor::MoveTo(left, top), style::Print(&blank))
            .expect("Error writing to the terminal.");
        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{: ^width$}", line, width = box_width as usize);
            queue!(self.stdout, cursor::MoveTo(left, top + 1 + i as u16), style::Print(padded))
                .expect("Error writing to the terminal.");
        }
        queue!(self.stdout, cursor::MoveTo(left, top + box_height - 1), style::Print(&blank))
            .expect("Error writing to the terminal.");

        self.flush();
    }
}

impl CellRenderer for TermSession {
    fn draw(&mut self, pos: Pos, glyph: char) {
        self.print_at(pos, glyph);
    }

    fn erase(&mut self, pos: Pos) {
        self.print_at(pos, ' ');
    }
}

impl Drop for TermSession {
    fn drop(&mut self) {
        // Best effort: never panic while unwinding.
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
    }
}
