//! Game of Life core functionality

pub mod analysis;
pub mod engine;
pub mod grid;
pub mod io;
pub mod neighbors;
pub mod rules;
pub mod session;

pub use analysis::{classify, Classification};
pub use engine::{step, Engine};
pub use grid::{BoundingBox, Cell, Grid};
pub use io::{create_example_patterns, load_pattern, random_scatter, save_pattern};
pub use neighbors::{count_neighbors, count_neighbors_parallel, NeighborCounts};
pub use rules::{RuleError, RuleSet};
pub use session::{Mode, Session};
