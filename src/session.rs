use std::collections::HashSet;

use log::info;
use rand::rngs::ThreadRng;
use rand::Rng;
use thiserror::Error;

use crate::food::{Food, FoodPolicy, OPENING_FOOD};
use crate::grid::{Grid, Position};
use crate::render::Frame;
use crate::snake::{AdvanceResult, Collision, Direction, Snake, OPENING_BODY};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("opening layout does not fit inside a {width}x{height} grid")]
    OpeningOutsideInterior { width: i32, height: i32 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced { grew: bool },
    /// The tick that ended the game.
    GameOver(Collision),
    /// The game was already over; nothing changed.
    Finished,
}

/// One game from the opening layout to the final collision.
pub struct GameSession<R = ThreadRng> {
    grid: Grid,
    snake: Snake,
    food: Food,
    score: u32,
    state: SessionState,
    food_policy: FoodPolicy,
    rng: R,
}

/// Checks that the fixed opening snake and food sit inside the grid's walls.
pub fn check_opening(grid: &Grid) -> Result<(), SessionError> {
    let fits = OPENING_BODY.iter().all(|pos| grid.is_interior(*pos)) && grid.is_interior(OPENING_FOOD);
    if fits {
        Ok(())
    } else {
        Err(SessionError::OpeningOutsideInterior { width: grid.width(), height: grid.height() })
    }
}

impl GameSession<ThreadRng> {
    pub fn new(grid: Grid, food_policy: FoodPolicy) -> Result<Self, SessionError> {
        GameSession::with_rng(grid, food_policy, rand::thread_rng())
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(grid: Grid, food_policy: FoodPolicy, rng: R) -> Result<Self, SessionError> {
        check_opening(&grid)?;
        let snake = Snake::new();
        let food = Food::new();

        info!("New session on a {}x{} grid, food policy {:?}", grid.width(), grid.height(), food_policy);
        Ok(GameSession::from_parts(grid, snake, food, food_policy, rng))
    }

    fn from_parts(grid: Grid, snake: Snake, food: Food, food_policy: FoodPolicy, rng: R) -> Self {
        GameSession { grid, snake, food, score: 0, state: SessionState::Running, food_policy, rng }
    }

    pub fn set_heading(&mut self, requested: Direction) {
        if self.state == SessionState::Running {
            self.snake.set_heading(requested);
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state == SessionState::GameOver {
            return TickOutcome::Finished;
        }

        match self.snake.advance(&self.food, &self.grid) {
            AdvanceResult::GameOver(cause) => {
                self.state = SessionState::GameOver;
                info!("Game over ({:?}) at {} with score {}", cause, self.snake.head(), self.score);
                TickOutcome::GameOver(cause)
            }
            AdvanceResult::Advanced { grew } => {
                if grew {
                    self.score += 1;
                    info!("Ate food at {}. Score: {}", self.snake.head(), self.score);

                    let occupied: HashSet<Position> = self.snake.segments().iter().copied().collect();
                    self.food.relocate(&occupied, &self.grid, self.food_policy, &mut self.rng);
                }
                TickOutcome::Advanced { grew }
            }
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            grid: self.grid,
            segments: self.snake.segments(),
            heading: self.snake.heading(),
            food: self.food.position(),
            score: self.score,
        }
    }
}
