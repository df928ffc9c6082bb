//! Stability analysis of patterns

use super::engine::Engine;
use super::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Long-term behavior of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Classification {
    /// Every cell died
    Extinct,
    /// Unchanged after one generation
    StillLife,
    /// Returns to the starting state after `period` generations
    Oscillator { period: usize },
    /// Returns to the starting shape, displaced by `(dx, dy)`, after `period` generations
    Spaceship { period: usize, dx: i64, dy: i64 },
    /// No repeat found within the search window
    Unknown,
}

impl Classification {
    pub fn period(&self) -> Option<usize> {
        match self {
            Classification::StillLife => Some(1),
            Classification::Oscillator { period } | Classification::Spaceship { period, .. } => {
                Some(*period)
            }
            Classification::Extinct | Classification::Unknown => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Extinct => write!(f, "Extinct"),
            Classification::StillLife => write!(f, "Still Life"),
            Classification::Oscillator { period } => write!(f, "Oscillator (period {})", period),
            Classification::Spaceship { period, dx, dy } => {
                write!(f, "Spaceship (period {}, moves {}, {})", period, dx, dy)
            }
            Classification::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Classify `grid` by evolving it for up to `max_period` generations.
///
/// Only repeats of the starting state are detected; a pattern that settles
/// into a cycle after some transient is reported as `Unknown` unless it dies.
pub fn classify(grid: &Grid, engine: &Engine, max_period: usize) -> Classification {
    if grid.is_empty() {
        return Classification::Extinct;
    }

    let origin = grid.bounding_box();
    let shape = grid.normalized();
    let mut current = grid.clone();

    for period in 1..=max_period {
        current = engine.step(&current);

        if current.is_empty() {
            return Classification::Extinct;
        }

        if current == *grid {
            return if period == 1 {
                Classification::StillLife
            } else {
                Classification::Oscillator { period }
            };
        }

        if current.len() == shape.len() && current.normalized() == shape {
            if let (Some(start), Some(now)) = (origin, current.bounding_box()) {
                return Classification::Spaceship {
                    period,
                    dx: now.min_x.wrapping_sub(start.min_x),
                    dy: now.min_y.wrapping_sub(start.min_y),
                };
            }
        }
    }

    Classification::Unknown
}
