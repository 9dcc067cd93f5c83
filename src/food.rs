use std::collections::HashSet;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};

pub const OPENING_FOOD: Position = Position::new(10, 10);

/// How hard relocation tries to keep food off the snake.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FoodPolicy {
    /// Keep sampling until the food lands on a free interior block.
    #[default]
    UntilClear,
    /// Sample once, re-place once if it landed on the snake, accept whatever
    /// the second draw gives.
    SingleRetry,
}

// Rejection sampling gives up after this many draws per interior block and
// picks from the free blocks directly.
const DRAWS_PER_BLOCK: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn new() -> Self {
        Food::at(OPENING_FOOD)
    }

    pub fn at(position: Position) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the food to a random interior block and returns the new
    /// position. Columns and rows are drawn independently.
    pub fn relocate<R: Rng>(
        &mut self,
        occupied: &HashSet<Position>,
        grid: &Grid,
        policy: FoodPolicy,
        rng: &mut R,
    ) -> Position {
        self.position = match policy {
            FoodPolicy::SingleRetry => {
                let first = random_interior(grid, rng);
                if occupied.contains(&first) {
                    random_interior(grid, rng)
                } else {
                    first
                }
            }
            FoodPolicy::UntilClear => until_clear(occupied, grid, rng),
        };

        debug!("Food relocated to {}", self.position);
        self.position
    }
}

fn random_interior<R: Rng>(grid: &Grid, rng: &mut R) -> Position {
    let col = rng.gen_range(1..=grid.width() - 2);
    let row = rng.gen_range(1..=grid.height() - 2);
    Position::new(col, row)
}

fn until_clear<R: Rng>(occupied: &HashSet<Position>, grid: &Grid, rng: &mut R) -> Position {
    for _ in 0..grid.interior_len() * DRAWS_PER_BLOCK {
        let pos = random_interior(grid, rng);
        if !occupied.contains(&pos) {
            return pos;
        }
    }

    let choices: Vec<Position> = grid.interior_cells().filter(|pos| !occupied.contains(pos)).collect();
    match choices.choose(rng) {
        Some(pos) => *pos,
        None => {
            warn!("No free interior block left for food");
            random_interior(grid, rng)
        }
    }
}
