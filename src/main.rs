mod config;
mod food;
mod game;
mod grid;
mod input;
mod render;
mod session;
mod snake;
mod term;
mod timer;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::WriteLogger;

use crate::config::Settings;
use crate::food::FoodPolicy;
use crate::render::RenderStyle;

#[derive(Parser)]
#[command(name = "grid-snake")]
#[command(version, about = "Snake on a walled grid, in your terminal")]
struct Cli {
    /// YAML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width, overrides the config file
    #[arg(long)]
    surface_width: Option<u32>,

    /// Surface height, overrides the config file
    #[arg(long)]
    surface_height: Option<u32>,

    /// Block size in surface units, overrides the config file
    #[arg(long)]
    block_size: Option<u32>,

    /// Milliseconds per tick, overrides the config file
    #[arg(long)]
    tick_ms: Option<u64>,

    #[arg(long, value_enum)]
    food_policy: Option<FoodPolicy>,

    #[arg(long, value_enum)]
    style: Option<RenderStyle>,

    /// Write logs to this file. The terminal is busy drawing the game, so
    /// nothing is logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(width) = self.surface_width {
            settings.surface_width = width;
        }
        if let Some(height) = self.surface_height {
            settings.surface_height = height;
        }
        if let Some(block_size) = self.block_size {
            settings.block_size = block_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.tick_interval_ms = tick_ms;
        }
        if let Some(policy) = self.food_policy {
            settings.food_policy = policy;
        }
        if let Some(style) = self.style {
            settings.render_style = style;
        }

        settings.validate().context("Invalid settings")?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
        WriteLogger::init(cli.log_level, simplelog::Config::default(), file).context("Failed to initialize logger")?;
    }

    let settings = cli.settings()?;
    info!("Starting with {:?}", settings);

    let mut game = game::SnakeGame::new(settings)?;
    game.run()
}
