//! Sparse Game of Life
//!
//! This library simulates Conway's Game of Life and other `B/S` rule variants
//! on an unbounded grid that stores only its living cells.

pub mod config;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{step, Cell, Engine, Grid, RuleSet};

use anyhow::Result;

/// Build the seed grid and engine described by `settings` and run the
/// configured number of generations
pub fn simulate(settings: &Settings) -> Result<Grid> {
    let grid = settings.seed_grid()?;
    let engine = settings.engine();
    Ok(engine.run(grid, settings.simulation.generations))
}
