//! Moore-neighborhood counting over a sparse grid

use super::grid::{Cell, Grid};
use rayon::prelude::*;
use std::collections::HashMap;

/// Living-neighbor count for every cell adjacent to at least one living cell.
/// Cells missing from the map have no living neighbors.
pub type NeighborCounts = HashMap<Cell, u8>;

/// The 8 cells around `(0, 0)`. The center itself is never counted.
pub const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, 1), (0, 1), (1, 1),
    (-1, 0), (1, 0),
    (-1, -1), (0, -1), (1, -1),
];

/// Count the living neighbors of every cell next to a living cell
pub fn count_neighbors(grid: &Grid) -> NeighborCounts {
    let mut counts = NeighborCounts::with_capacity(grid.len() * 4);

    for cell in grid.iter() {
        tally(&mut counts, *cell);
    }

    counts
}

/// Same as [`count_neighbors`], spread over the rayon thread pool.
///
/// Each worker counts into its own map; partial maps are merged by addition.
pub fn count_neighbors_parallel(grid: &Grid) -> NeighborCounts {
    grid.cells()
        .par_iter()
        .fold(NeighborCounts::new, |mut counts, cell| {
            tally(&mut counts, *cell);
            counts
        })
        .reduce(NeighborCounts::new, merge)
}

#[inline]
fn tally(counts: &mut NeighborCounts, cell: Cell) {
    for (dx, dy) in MOORE_OFFSETS {
        *counts.entry(cell.offset(dx, dy)).or_insert(0) += 1;
    }
}

fn merge(a: NeighborCounts, b: NeighborCounts) -> NeighborCounts {
    // fold the smaller map into the larger one
    let (mut into, from) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    for (cell, count) in from {
        *into.entry(cell).or_insert(0) += count;
    }
    into
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(cells: &[(i64, i64)]) -> Grid {
        cells.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn test_empty_grid() {
        assert!(count_neighbors(&Grid::new()).is_empty());
        assert!(count_neighbors_parallel(&Grid::new()).is_empty());
    }

    #[test]
    fn test_single_cell() {
        let counts = count_neighbors(&grid_of(&[(0, 0)]));

        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 1));
        // the cell itself is not its own neighbor
        assert!(!counts.contains_key(&Cell::new(0, 0)));
    }

    #[test]
    fn test_l_shape() {
        let counts = count_neighbors(&grid_of(&[(0, 0), (1, 0), (0, 1)]));

        let expected = [
            ((1, 1), 3),
            ((0, 0), 2),
            ((1, 0), 2),
            ((0, 1), 2),
            ((-1, 0), 2),
            ((0, -1), 2),
            ((-1, 1), 2),
            ((1, -1), 2),
            ((-1, -1), 1),
            ((2, 0), 1),
            ((2, 1), 1),
            ((2, -1), 1),
            ((0, 2), 1),
            ((1, 2), 1),
            ((-1, 2), 1),
        ];

        for ((x, y), n) in expected {
            assert_eq!(counts.get(&Cell::new(x, y)), Some(&n), "count at ({}, {})", x, y);
        }
        assert_eq!(counts.len(), expected.len());
    }

    #[test]
    fn test_negative_coordinates() {
        let counts = count_neighbors(&grid_of(&[(-1_000_000, -5), (-999_999, -5)]));

        assert_eq!(counts.get(&Cell::new(-1_000_000, -5)), Some(&1));
        assert_eq!(counts.get(&Cell::new(-999_999, -4)), Some(&2));
        assert_eq!(counts.get(&Cell::new(-1_000_001, -5)), Some(&1));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let grid: Grid = (0..40)
            .flat_map(|x| (0..40).map(move |y| (x, y)))
            .filter(|(x, y)| (x * 7 + y * 13) % 5 < 2)
            .map(Cell::from)
            .collect();

        assert_eq!(count_neighbors(&grid), count_neighbors_parallel(&grid));
    }

    #[test]
    fn test_full_neighborhood() {
        let mut cells: Vec<(i64, i64)> = MOORE_OFFSETS.to_vec();
        cells.push((0, 0));
        let counts = count_neighbors(&grid_of(&cells));

        assert_eq!(counts.get(&Cell::new(0, 0)), Some(&8));
    }
}
