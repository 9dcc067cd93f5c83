use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use log::{debug, info};

use crate::config::Settings;
use crate::grid::Grid;
use crate::input::{self, Command};
use crate::render::Renderer;
use crate::session::{GameSession, SessionState, TickOutcome};
use crate::term::TermRenderer;
use crate::timer::Ticker;

// Upper bound on how long one input wait may block.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Replay,
    Quit,
}

pub struct SnakeGame {
    settings: Settings,
    grid: Grid,
    term: TermRenderer,
}

impl SnakeGame {
    pub fn new(settings: Settings) -> Result<Self> {
        let grid = settings.grid()?;

        let (cols, rows) = TermRenderer::size().context("Failed to read terminal size")?;
        ensure!(
            i32::from(cols) >= grid.width() && i32::from(rows) > grid.height(),
            "terminal is {}x{} but a {}x{} grid needs at least {}x{}",
            cols,
            rows,
            grid.width(),
            grid.height(),
            grid.width(),
            grid.height() + 1
        );

        let term = TermRenderer::new(settings.render_style);
        Ok(SnakeGame { settings, grid, term })
    }

    /// Takes over the terminal and plays until the player quits. The terminal
    /// is restored even when a game fails.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup().context("Failed to set up terminal")?;

        let result = self.play_sessions();
        let restored = self.term.restore().context("Failed to restore terminal");

        result.and(restored)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play_sessions(&mut self) -> Result<()> {
        if self.show_intro()? == Flow::Quit {
            return Ok(());
        }

        let mut games = 0u32;
        loop {
            games += 1;
            debug!("Starting game {}", games);
            if self.play()? == Flow::Quit {
                info!("Player quit after {} game(s)", games);
                return Ok(());
            }
        }
    }

    fn show_intro(&mut self) -> Result<Flow> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc, q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(&self.grid, lines)?;
        self.wait_for_replay()
    }

    fn play(&mut self) -> Result<Flow> {
        let mut session = GameSession::new(self.grid, self.settings.food_policy)?;
        let mut ticker = Ticker::start(self.settings.tick_interval(), Instant::now());

        self.term.begin(&self.grid)?;
        self.term.draw_frame(&session.frame())?;

        while session.state() == SessionState::Running {
            let wait = ticker.time_until_due(Instant::now()).unwrap_or(POLL_INTERVAL).min(POLL_INTERVAL);

            for key_ev in self.term.read_key_events(wait)? {
                match input::command_for(&key_ev) {
                    Command::Turn(dir) => session.set_heading(dir),
                    Command::Quit => return Ok(Flow::Quit),
                    Command::Ignore => {}
                }
            }

            if ticker.poll(Instant::now()) {
                if let TickOutcome::Advanced { .. } = session.tick() {
                    self.term.draw_frame(&session.frame())?;
                }
            }
        }

        if ticker.disarm() {
            info!("Final score {} with {} segments", session.score(), session.snake().len());
            self.term.game_over(&session.frame())?;
        }

        self.wait_for_replay()
    }

    fn wait_for_replay(&mut self) -> Result<Flow> {
        let ev = self.term.read_key_blocking()?;
        if input::command_for(&ev) == Command::Quit {
            Ok(Flow::Quit)
        } else {
            Ok(Flow::Replay)
        }
    }
}
