//! Seeding grids from pattern files and random scatter, and saving them back

use super::grid::{Cell, Grid};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::warn;

/// Load a grid from a text pattern file.
/// Format: each line is a row, '1' for alive cells and '0' for dead cells.
/// The last row sits on `y = 0` and rows above it count upwards.
pub fn load_pattern<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a grid from a string representation
pub fn parse_pattern(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let height = lines.len();
    let width = lines[0].len();
    let mut grid = Grid::new();

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                width
            );
        }

        let y = (height - 1 - row_idx) as i64;
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => {
                    grid.insert(Cell::new(col_idx as i64, y));
                }
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
    }

    Ok(grid)
}

/// Convert a grid to its pattern string, cropped to the bounding box
pub fn pattern_to_string(grid: &Grid) -> String {
    let Some(bounds) = grid.bounding_box() else {
        return String::new();
    };

    let mut result = String::new();
    for y in (bounds.min_y..=bounds.max_y).rev() {
        for x in bounds.min_x..=bounds.max_x {
            result.push(if grid.contains(&Cell::new(x, y)) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Save a grid to a text pattern file
pub fn save_pattern<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    write_creating_dirs(path.as_ref(), &pattern_to_string(grid))
}

/// Save a grid as a JSON list of living cells
pub fn save_grid_json<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(grid).context("Failed to serialize grid")?;
    write_creating_dirs(path.as_ref(), &content)
}

fn write_creating_dirs(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.display()))
}

/// Load every `.txt` pattern in a directory, sorted by file name.
/// Files that fail to parse are skipped with a warning.
pub fn load_patterns_from_directory<P: AsRef<Path>>(dir_path: P) -> Result<Vec<(String, Grid)>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut grids = Vec::new();

    for entry in dir {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if !path.is_file() || path.extension().map_or(true, |ext| ext != "txt") {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        match load_pattern(&path) {
            Ok(grid) => grids.push((name, grid)),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping pattern"),
        }
    }

    grids.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(grids)
}

/// Scatter living cells over `[0, width) x [0, height)`.
///
/// Each cell is alive with probability `density`; the same `seed` always gives
/// the same grid.
pub fn random_scatter(width: u32, height: u32, density: f64, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let density = density.clamp(0.0, 1.0);

    let mut grid = Grid::new();
    for y in 0..height {
        for x in 0..width {
            if rng.gen_bool(density) {
                grid.insert(Cell::new(x as i64, y as i64));
            }
        }
    }
    grid
}

/// Create example pattern files
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        ("glider.txt", "010\n001\n111\n"),
        ("blinker.txt", "010\n010\n010\n"),
        ("block.txt", "11\n11\n"),
        ("beacon.txt", "1100\n1100\n0011\n0011\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
