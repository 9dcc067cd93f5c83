use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyEvent, KeyEventKind, poll, read};
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::grid::{Grid, Position};
use crate::render::{self, Cell, Frame, Glyph, RenderStyle, Renderer, DEAD_SNAKE_CHAR};

/// Draws the game into the terminal, one block per character cell. The score
/// line sits directly under the grid.
pub struct TermRenderer {
    stdout: Stdout,
    style: RenderStyle,
    drawn: Vec<Position>,
}

impl TermRenderer {
    pub fn new(style: RenderStyle) -> Self {
        TermRenderer { stdout: stdout(), style, drawn: vec![] }
    }

    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            match read()? {
                Event::Key(ev) if ev.kind == KeyEventKind::Press => return Ok(ev),
                _ => {}
            }
        }
    }

    /// Waits up to `timeout` for the first key, then drains whatever else is
    /// already queued.
    pub fn read_key_events(&self, timeout: Duration) -> io::Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut wait = timeout;

        while poll(wait)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
            wait = Duration::ZERO;
        }

        Ok(events)
    }

    /// Clears the screen and draws the wall ring for a new game.
    pub fn begin(&mut self, grid: &Grid) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.drawn.clear();

        let wall = self.style.glyph(Cell::Wall);
        let (end_x, end_y) = (grid.width() - 1, grid.height() - 1);

        for x in 0..grid.width() {
            self.print_at(Position::new(x, 0), wall)?;
            self.print_at(Position::new(x, end_y), wall)?;
        }
        for y in 1..end_y {
            self.print_at(Position::new(0, y), wall)?;
            self.print_at(Position::new(end_x, y), wall)?;
        }

        self.stdout.flush()
    }

    pub fn show_message(&mut self, grid: &Grid, lines: &[&str]) -> io::Result<()> {
        let msg_height = lines.len() as i32 + 2;
        let msg_width = lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) as i32 + 2;
        let top = (grid.height() / 2 - msg_height / 2).max(0);
        let left = (grid.width() / 2 - msg_width / 2).max(0);

        let blank = " ".repeat(msg_width as usize);
        for y in [top, top + msg_height - 1] {
            queue!(self.stdout, cursor::MoveTo(left as u16, y as u16), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top + i as i32 + 1;
            queue!(self.stdout, cursor::MoveTo(left as u16, y as u16), style::Print(padded_line))?;
        }

        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: Position, glyph: Glyph) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.col as u16, pos.row as u16))?;
        match glyph.color {
            Some(color) => queue!(self.stdout, style::PrintStyledContent(glyph.ch.with(color))),
            None => queue!(self.stdout, style::Print(glyph.ch)),
        }
    }

    fn erase_drawn(&mut self) -> io::Result<()> {
        let blank = Glyph { ch: ' ', color: None };
        for pos in std::mem::take(&mut self.drawn) {
            self.print_at(pos, blank)?;
        }
        Ok(())
    }

    fn print_score(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let line = format!("Score: {}", frame.score);
        queue!(
            self.stdout,
            cursor::MoveTo(0, frame.grid.height() as u16),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(line)
        )
    }
}

impl Renderer for TermRenderer {
    fn draw_frame(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.erase_drawn()?;

        for (pos, cell) in render::cells(frame) {
            self.print_at(pos, self.style.glyph(cell))?;
            self.drawn.push(pos);
        }

        self.print_score(frame)?;
        self.stdout.flush()
    }

    fn game_over(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let dead = Glyph { ch: DEAD_SNAKE_CHAR, color: Some(Color::Red) };
        for pos in frame.segments {
            self.print_at(*pos, dead)?;
        }
        self.print_score(frame)?;

        let score = format!("Score: {}", frame.score);
        self.show_message(&frame.grid, &[
            "GAME OVER",
            &score,
            "",
            "Press any key to play again,",
            "or Esc to quit."
        ])
    }
}
