//! Sparse grid representation for Game of Life

use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single cell coordinate on the unbounded lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Cell shifted by the given offset. Wraps at the edge of `i64`.
    #[inline]
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }
}

impl From<(i64, i64)> for Cell {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive bounds of the living cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl BoundingBox {
    pub fn width(&self) -> u64 {
        self.max_x.abs_diff(self.min_x) + 1
    }

    pub fn height(&self) -> u64 {
        self.max_y.abs_diff(self.min_y) + 1
    }
}

/// The set of all currently alive cells.
///
/// Membership is the only alive/dead signal: a cell that is not stored is dead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Grid {
    cells: HashSet<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: HashSet::with_capacity(capacity),
        }
    }

    /// Mark a cell alive. Returns `false` if it already was.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Mark a cell dead. Returns `false` if it already was.
    pub fn remove(&mut self, cell: &Cell) -> bool {
        self.cells.remove(cell)
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// Number of living cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub(crate) fn cells(&self) -> &HashSet<Cell> {
        &self.cells
    }

    /// Get all living cells, sorted by row then column
    pub fn living_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .copied()
            .sorted_by_key(|cell| (cell.y, cell.x))
            .collect()
    }

    /// Smallest box containing every living cell, or `None` for an empty grid
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let (min_x, max_x) = match self.cells.iter().map(|c| c.x).minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(x) => (x, x),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        };
        let (min_y, max_y) = match self.cells.iter().map(|c| c.y).minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(y) => (y, y),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        };

        Some(BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Copy of the grid with every cell shifted by `(dx, dy)`
    pub fn translated(&self, dx: i64, dy: i64) -> Self {
        self.cells.iter().map(|cell| cell.offset(dx, dy)).collect()
    }

    /// Copy of the grid moved so its bounding box starts at the origin
    pub fn normalized(&self) -> Self {
        match self.bounding_box() {
            Some(bounds) => self.translated(bounds.min_x.wrapping_neg(), bounds.min_y.wrapping_neg()),
            None => Self::new(),
        }
    }
}

impl FromIterator<Cell> for Grid {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Cell> for Grid {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::collections::hash_set::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl From<Vec<Cell>> for Grid {
    fn from(cells: Vec<Cell>) -> Self {
        cells.into_iter().collect()
    }
}

impl From<Grid> for Vec<Cell> {
    fn from(grid: Grid) -> Self {
        grid.living_cells()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(bounds) = self.bounding_box() else {
            return Ok(());
        };

        for y in (bounds.min_y..=bounds.max_y).rev() {
            for x in bounds.min_x..=bounds.max_x {
                let symbol = if self.contains(&Cell::new(x, y)) { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
