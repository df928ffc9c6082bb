//! Interactive simulation state: editing vs running

use super::engine::Engine;
use super::grid::{Cell, Grid};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Ticks per second a new session starts with
pub const DEFAULT_TICK_RATE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The grid only changes through `draw`/`erase`
    Editing,
    /// Every tick advances one generation
    Running,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Editing => write!(f, "editing"),
            Mode::Running => write!(f, "running"),
        }
    }
}

/// A grid together with the engine driving it and the front end's state.
///
/// Front ends own one of these and call [`Session::tick`] on their own clock.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    engine: Engine,
    mode: Mode,
    generation: u64,
    tick_rate: u32,
}

impl Session {
    pub fn new(grid: Grid, engine: Engine) -> Self {
        Self {
            grid,
            engine,
            mode: Mode::Editing,
            generation: 0,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }

    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate.max(1);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.mode == Mode::Running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.len()
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Switch between editing and running
    pub fn toggle_running(&mut self) -> Mode {
        self.mode = match self.mode {
            Mode::Editing => Mode::Running,
            Mode::Running => Mode::Editing,
        };
        info!(mode = %self.mode, generation = self.generation, "session mode changed");
        self.mode
    }

    /// Bring a cell to life. Ignored while running.
    pub fn draw(&mut self, cell: Cell) -> bool {
        self.mode == Mode::Editing && self.grid.insert(cell)
    }

    /// Kill a cell. Ignored while running.
    pub fn erase(&mut self, cell: Cell) -> bool {
        self.mode == Mode::Editing && self.grid.remove(&cell)
    }

    /// Advance one generation if running. Returns whether a step happened.
    pub fn tick(&mut self) -> bool {
        if self.mode != Mode::Running {
            return false;
        }

        self.grid = self.engine.step(&self.grid);
        self.generation += 1;
        true
    }

    /// Kill every cell. The generation counter keeps going.
    pub fn clear(&mut self) {
        self.grid.clear();
        info!(generation = self.generation, "grid cleared");
    }

    pub fn speed_up(&mut self) -> u32 {
        self.tick_rate = self.tick_rate.saturating_add(1);
        self.tick_rate
    }

    /// Lower the tick rate, never below one tick per second
    pub fn slow_down(&mut self) -> u32 {
        if self.tick_rate > 1 {
            self.tick_rate -= 1;
        }
        self.tick_rate
    }
}
