use std::fmt;

use thiserror::Error;

use crate::snake::Direction;

/// Smallest side length, in blocks, that still leaves a non-degenerate
/// interior inside the wall ring.
pub const MIN_BLOCKS: u32 = 5;

/// A single block on the grid. Moving a position yields a new one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const fn new(col: i32, row: i32) -> Self {
        Position { col, row }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Position::new(self.col + dc, self.row + dr)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid of {width}x{height} blocks is too small, need at least {min}x{min}", min = MIN_BLOCKS)]
    TooSmall { width: u32, height: u32 },
    #[error("block size must be greater than zero")]
    ZeroBlockSize,
    #[error("surface {width}x{height} is not evenly divisible by block size {block_size}")]
    UnevenSurface { width: u32, height: u32, block_size: u32 },
}

/// The playing field. The outermost ring of blocks is wall, everything
/// inside it is interior.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width < MIN_BLOCKS || height < MIN_BLOCKS || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(GridError::TooSmall { width, height });
        }

        Ok(Grid { width: width as i32, height: height as i32 })
    }

    pub fn from_surface(width: u32, height: u32, block_size: u32) -> Result<Self, GridError> {
        if block_size == 0 {
            return Err(GridError::ZeroBlockSize);
        }
        if width % block_size != 0 || height % block_size != 0 {
            return Err(GridError::UnevenSurface { width, height, block_size });
        }

        Grid::new(width / block_size, height / block_size)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// True for the border ring and anything beyond it.
    pub fn is_wall(&self, pos: Position) -> bool {
        pos.col <= 0 || pos.row <= 0 || pos.col >= self.width - 1 || pos.row >= self.height - 1
    }

    pub fn is_interior(&self, pos: Position) -> bool {
        !self.is_wall(pos)
    }

    pub fn interior_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (1..self.height - 1).flat_map(move |row| (1..self.width - 1).map(move |col| Position::new(col, row)))
    }

    pub fn interior_len(&self) -> usize {
        ((self.width - 2) * (self.height - 2)) as usize
    }
}
