//! Generation stepping

use super::grid::Grid;
use super::neighbors::{count_neighbors, count_neighbors_parallel, NeighborCounts};
use super::rules::RuleSet;
use tracing::debug;

/// Population at which [`Engine`] switches to parallel neighbor counting
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

/// Evolve the grid one generation forward under `rules`.
///
/// The input grid is left untouched and a brand new grid is returned.
pub fn step(grid: &Grid, rules: &RuleSet) -> Grid {
    next_generation(grid, &count_neighbors(grid), rules)
}

/// Only cells with at least one living neighbor are candidates, so an isolated
/// cell always dies, whatever the survival rule says about 0.
fn next_generation(grid: &Grid, counts: &NeighborCounts, rules: &RuleSet) -> Grid {
    counts
        .iter()
        .filter(|&(cell, &count)| rules.next_state(grid.contains(cell), count))
        .map(|(cell, _)| *cell)
        .collect()
}

/// Game of Life rules engine
#[derive(Debug, Clone)]
pub struct Engine {
    rules: RuleSet,
    parallel_threshold: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

impl Engine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Count neighbors on the rayon pool once the population reaches `threshold`
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Evolve the grid one generation forward
    pub fn step(&self, grid: &Grid) -> Grid {
        let counts = if grid.len() >= self.parallel_threshold {
            count_neighbors_parallel(grid)
        } else {
            count_neighbors(grid)
        };

        let next = next_generation(grid, &counts, &self.rules);
        debug!(
            population = grid.len(),
            candidates = counts.len(),
            next_population = next.len(),
            "stepped generation"
        );
        next
    }

    /// Evolve the grid for multiple generations
    pub fn run(&self, mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = self.step(&grid);
        }
        grid
    }

    /// Every generation from `grid` (generation 0) up to `generations`
    pub fn history(&self, grid: &Grid, generations: usize) -> Vec<Grid> {
        let mut path = Vec::with_capacity(generations + 1);
        path.push(grid.clone());
        for _ in 0..generations {
            let next = self.step(&path[path.len() - 1]);
            path.push(next);
        }
        path
    }

    /// Check that `from` becomes exactly `to` after `generations` steps
    pub fn evolves_to(&self, from: &Grid, to: &Grid, generations: usize) -> bool {
        self.run(from.clone(), generations) == *to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::grid::Cell;

    fn grid_of(cells: &[(i64, i64)]) -> Grid {
        cells.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn test_still_life_block() {
        let block = grid_of(&[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let evolved = step(&block, &RuleSet::default());

        assert_eq!(evolved, block);
    }

    #[test]
    fn test_oscillator_blinker() {
        let vertical = grid_of(&[(1, 0), (1, 1), (1, 2)]);
        let horizontal = grid_of(&[(0, 1), (1, 1), (2, 1)]);
        let rules = RuleSet::default();

        let evolved = step(&vertical, &rules);
        assert_eq!(evolved, horizontal);

        let evolved_twice = step(&evolved, &rules);
        assert_eq!(evolved_twice, vertical);
    }

    #[test]
    fn test_empty_grid() {
        for spec in ["B3/S23", "B/S", "B012345678/S012345678"] {
            assert!(step(&Grid::new(), &RuleSet::parse(spec)).is_empty());
        }
    }

    #[test]
    fn test_step_is_pure() {
        let grid = grid_of(&[(0, 0), (1, 0), (2, 0), (2, 1), (1, 2)]);
        let before = grid.clone();
        let rules = RuleSet::default();

        let first = step(&grid, &rules);
        let second = step(&grid, &rules);

        assert_eq!(first, second);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_custom_birth_only_rule() {
        // B2/S: every cell with exactly two neighbors is alive next, nothing else is
        let grid = grid_of(&[(0, 0), (2, 0), (0, 2), (2, 2), (5, 5)]);
        let rules = RuleSet::parse("B2/S");

        let evolved = step(&grid, &rules);
        let expected = grid_of(&[
            (1, 0), (0, 1), (2, 1), (1, 2),
            (1, -1), (-1, 1), (3, 1), (1, 3),
        ]);
        assert_eq!(evolved, expected);

        // cross-check against the neighbor counts directly
        let counts = count_neighbors(&grid);
        for (cell, count) in &counts {
            assert_eq!(evolved.contains(cell), *count == 2, "cell {}", cell);
        }
    }

    #[test]
    fn test_isolated_cell_dies_even_with_s0() {
        let grid = grid_of(&[(0, 0)]);
        let rules = RuleSet::parse("B3/S0");

        assert!(step(&grid, &rules).is_empty());
    }

    #[test]
    fn test_glider_translates() {
        let glider = grid_of(&[(1, 2), (2, 1), (0, 0), (1, 0), (2, 0)]);
        let engine = Engine::default();

        let moved = engine.run(glider.clone(), 4);
        assert_eq!(moved, glider.translated(1, -1));
    }

    #[test]
    fn test_parallel_engine_matches_sequential() {
        let grid: Grid = (0..30)
            .flat_map(|x| (0..30).map(move |y| (x, y)))
            .filter(|(x, y)| (x * 3 + y * 5) % 7 < 3)
            .map(Cell::from)
            .collect();

        let sequential = Engine::default().with_parallel_threshold(usize::MAX);
        let parallel = Engine::default().with_parallel_threshold(0);

        assert_eq!(sequential.run(grid.clone(), 5), parallel.run(grid, 5));
    }

    #[test]
    fn test_history_and_validation() {
        let vertical = grid_of(&[(1, 0), (1, 1), (1, 2)]);
        let horizontal = grid_of(&[(0, 1), (1, 1), (2, 1)]);
        let engine = Engine::default();

        let path = engine.history(&vertical, 2);
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], vertical);
        assert_eq!(path[1], horizontal);
        assert_eq!(path[2], vertical);

        assert!(engine.evolves_to(&vertical, &horizontal, 1));
        assert!(!engine.evolves_to(&vertical, &horizontal, 2));
    }
}
