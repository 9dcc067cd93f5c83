use std::io;

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};
use crate::snake::Direction::{self, *};

pub const DEAD_SNAKE_CHAR: char = 'X';

/// Read-only view of a session, handed to the renderer once per tick.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    pub grid: Grid,
    pub segments: &'a [Position],
    pub heading: Direction,
    pub food: Position,
    pub score: u32,
}

pub trait Renderer {
    /// Draws the board for a running game.
    fn draw_frame(&mut self, frame: &Frame<'_>) -> io::Result<()>;

    /// Draws the final board and the game over banner. Called once per game.
    fn game_over(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// Coloured blocks.
    #[default]
    Blocks,
    /// Plain characters, with an arrow for the head.
    Glyphs,
}

/// What occupies a drawn block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Head(Direction),
    Body(usize),
    Food,
    Wall,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Option<Color>,
}

impl RenderStyle {
    pub fn glyph(self, cell: Cell) -> Glyph {
        match self {
            RenderStyle::Blocks => match cell {
                Cell::Head(_) => Glyph { ch: '█', color: Some(Color::Yellow) },
                Cell::Body(i) if i % 2 == 0 => Glyph { ch: '█', color: Some(Color::DarkRed) },
                Cell::Body(_) => Glyph { ch: '█', color: Some(Color::DarkGreen) },
                Cell::Food => Glyph { ch: '●', color: Some(Color::Green) },
                Cell::Wall => Glyph { ch: '█', color: Some(Color::Grey) },
            },
            RenderStyle::Glyphs => {
                let ch = match cell {
                    Cell::Head(Up) => '^',
                    Cell::Head(Down) => 'v',
                    Cell::Head(Left) => '<',
                    Cell::Head(Right) => '>',
                    Cell::Body(_) => '█',
                    Cell::Food => 'O',
                    Cell::Wall => '#',
                };
                Glyph { ch, color: None }
            }
        }
    }
}

/// Every occupied block of a frame, snake first and food last.
pub fn cells<'a>(frame: &Frame<'a>) -> impl Iterator<Item = (Position, Cell)> + 'a {
    let heading = frame.heading;
    frame
        .segments
        .iter()
        .enumerate()
        .map(move |(i, pos)| if i == 0 { (*pos, Cell::Head(heading)) } else { (*pos, Cell::Body(i)) })
        .chain(std::iter::once((frame.food, Cell::Food)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_head_points_the_way() {
        assert_eq!(RenderStyle::Glyphs.glyph(Cell::Head(Up)).ch, '^');
        assert_eq!(RenderStyle::Glyphs.glyph(Cell::Head(Right)).ch, '>');
        assert_eq!(RenderStyle::Glyphs.glyph(Cell::Food).ch, 'O');
        assert_eq!(RenderStyle::Glyphs.glyph(Cell::Body(3)).color, None);
    }

    #[test]
    fn blocks_alternate_body_colours() {
        let even = RenderStyle::Blocks.glyph(Cell::Body(2));
        let odd = RenderStyle::Blocks.glyph(Cell::Body(1));
        assert_ne!(even.color, odd.color);
        assert_eq!(RenderStyle::Blocks.glyph(Cell::Head(Down)).color, Some(Color::Yellow));
    }

    #[test]
    fn cells_list_head_body_then_food() {
        let segments = [Position::new(7, 5), Position::new(6, 5), Position::new(5, 5)];
        let frame = Frame {
            grid: Grid::new(40, 40).unwrap(),
            segments: &segments,
            heading: Right,
            food: Position::new(10, 10),
            score: 0,
        };

        let cells: Vec<_> = cells(&frame).collect();
        assert_eq!(
            cells,
            vec![
                (Position::new(7, 5), Cell::Head(Right)),
                (Position::new(6, 5), Cell::Body(1)),
                (Position::new(5, 5), Cell::Body(2)),
                (Position::new(10, 10), Cell::Food),
            ]
        );
    }
}
