use crate::food::Food;
use crate::grid::{Grid, Position};
use AdvanceResult::*;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Offset as `(col, row)`. Rows grow downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// What stopped the snake.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdvanceResult {
    Advanced { grew: bool },
    GameOver(Collision),
}

pub const OPENING_BODY: [Position; 3] = [Position::new(7, 5), Position::new(6, 5), Position::new(5, 5)];
pub const OPENING_HEADING: Direction = Right;

#[derive(Clone, Debug)]
pub struct Snake {
    segments: Vec<Position>,
    heading: Direction,
    pending_heading: Direction,
}

impl Snake {
    pub fn new() -> Self {
        Snake { segments: OPENING_BODY.to_vec(), heading: OPENING_HEADING, pending_heading: OPENING_HEADING }
    }

    /// Builds a snake from an explicit body, head first.
    #[cfg(test)]
    pub fn from_segments(segments: Vec<Position>, heading: Direction) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");
        Snake { segments, heading, pending_heading: heading }
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    // Segments are only ever prepended to or popped after a prepend, so the
    // body is never empty.
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[cfg(test)]
    pub fn pending_heading(&self) -> Direction {
        self.pending_heading
    }

    /// Queues a turn for the next advance. Reversing onto the committed
    /// heading is dropped without notice; the last legal request wins.
    pub fn set_heading(&mut self, requested: Direction) {
        if !requested.is_opposite(self.heading) {
            self.pending_heading = requested;
        }
    }

    pub fn advance(&mut self, food: &Food, grid: &Grid) -> AdvanceResult {
        self.heading = self.pending_heading;

        let new_head = self.head().step(self.heading);

        if let Some(collision) = self.collision_at(new_head, grid) {
            return GameOver(collision);
        }

        self.segments.insert(0, new_head);

        let grew = new_head == food.position();
        if !grew {
            self.segments.pop();
        }

        Advanced { grew }
    }

    ///////////////////////////////////////////////////////////////////////////

    // The tail still counts even though it would move away this tick.
    fn collision_at(&self, pos: Position, grid: &Grid) -> Option<Collision> {
        if grid.is_wall(pos) {
            Some(Collision::Wall)
        } else if self.segments.contains(&pos) {
            Some(Collision::Body)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(40, 40).unwrap()
    }

    fn food_at(col: i32, row: i32) -> Food {
        Food::at(Position::new(col, row))
    }

    #[test]
    fn opposites_are_total_and_symmetric() {
        for dir in [Up, Down, Left, Right] {
            assert_ne!(dir.opposite(), dir);
            assert_eq!(dir.opposite().opposite(), dir);
            assert!(dir.is_opposite(dir.opposite()));
        }
        assert!(!Up.is_opposite(Left));
        assert!(!Right.is_opposite(Down));
    }

    #[test]
    #[should_panic(expected = "at least one segment")]
    fn empty_body_is_refused() {
        Snake::from_segments(vec![], Right);
    }

    #[test]
    fn new_snake_uses_opening_layout() {
        let snake = Snake::new();
        assert_eq!(snake.segments(), &OPENING_BODY);
        assert_eq!(snake.heading(), Right);
        assert_eq!(snake.pending_heading(), Right);
    }

    #[test]
    fn moves_three_ticks_without_touching_food() {
        let mut snake = Snake::new();
        let food = food_at(10, 10);

        for _ in 0..3 {
            assert_eq!(snake.advance(&food, &grid()), Advanced { grew: false });
        }

        assert_eq!(snake.segments(), &[Position::new(10, 5), Position::new(9, 5), Position::new(8, 5)]);
    }

    #[test]
    fn food_in_another_row_is_passed_by() {
        let mut snake = Snake::new();
        let food = food_at(10, 10);

        for _ in 0..5 {
            snake.advance(&food, &grid());
        }

        assert_eq!(snake.head(), Position::new(12, 5));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn eating_keeps_the_tail() {
        let mut snake = Snake::new();
        let food = food_at(8, 5);

        assert_eq!(snake.advance(&food, &grid()), Advanced { grew: true });
        assert_eq!(
            snake.segments(),
            &[Position::new(8, 5), Position::new(7, 5), Position::new(6, 5), Position::new(5, 5)]
        );
    }

    #[test]
    fn hitting_the_left_wall_ends_the_game() {
        let body = vec![Position::new(1, 5), Position::new(2, 5), Position::new(3, 5)];
        let mut snake = Snake::from_segments(body.clone(), Left);

        assert_eq!(snake.advance(&food_at(10, 10), &grid()), GameOver(Collision::Wall));
        assert_eq!(snake.segments(), body.as_slice());
    }

    #[test]
    fn reversal_request_is_dropped() {
        let mut snake = Snake::new();
        snake.set_heading(Left);
        assert_eq!(snake.pending_heading(), Right);

        snake.advance(&food_at(10, 10), &grid());
        assert_eq!(snake.heading(), Right);
        assert_eq!(snake.head(), Position::new(8, 5));
    }

    #[test]
    fn last_legal_request_before_a_tick_wins() {
        let mut snake = Snake::new();
        snake.set_heading(Up);
        snake.set_heading(Down);
        // Still heading right, so left is illegal and must not clobber Down.
        snake.set_heading(Left);
        assert_eq!(snake.pending_heading(), Down);

        snake.advance(&food_at(10, 10), &grid());
        assert_eq!(snake.head(), Position::new(7, 6));
    }

    #[test]
    fn two_quick_turns_cannot_reverse_within_one_tick() {
        let mut snake = Snake::new();
        snake.set_heading(Up);
        // Left is legal relative to the committed heading only after Up lands.
        snake.set_heading(Left);
        assert_eq!(snake.pending_heading(), Up);
    }

    #[test]
    fn forced_reversal_is_a_body_collision() {
        let mut snake = Snake::new();
        snake.pending_heading = Left;
        let before = snake.segments().to_vec();

        assert_eq!(snake.advance(&food_at(10, 10), &grid()), GameOver(Collision::Body));
        assert_eq!(snake.segments(), before.as_slice());
    }

    #[test]
    fn running_into_the_body_ends_the_game() {
        // Head at (5,5) moving up into a loop of its own body.
        let body = vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 4),
            Position::new(5, 4),
            Position::new(4, 4),
        ];
        let mut snake = Snake::from_segments(body, Up);

        assert_eq!(snake.advance(&food_at(10, 10), &grid()), GameOver(Collision::Body));
    }

    #[test]
    fn legal_turn_sequences_never_reverse_the_committed_heading() {
        let requests = [Up, Down, Left, Right, Right, Down, Up, Left, Left, Down, Right, Up];
        let mut snake = Snake::from_segments(vec![Position::new(50, 50)], Right);
        let big = Grid::new(100, 100).unwrap();

        for (i, dir) in requests.iter().cycle().take(40).enumerate() {
            let previous = snake.heading();
            snake.set_heading(*dir);
            if i % 2 == 0 {
                snake.set_heading(requests[(i + 3) % requests.len()]);
            }
            snake.advance(&food_at(99, 99), &big);
            assert!(!snake.heading().is_opposite(previous));
        }
    }
}
