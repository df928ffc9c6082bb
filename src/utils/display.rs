//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::{io, Classification, Grid};
use anyhow::Result;
use std::path::Path;

/// Format grids for terminal display
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form, cropped to its bounding box
    pub fn format_grid_compact(grid: &Grid) -> String {
        let Some(bounds) = grid.bounding_box() else {
            return "(empty)\n".to_string();
        };

        let mut output = String::new();
        for y in (bounds.min_y..=bounds.max_y).rev() {
            for x in bounds.min_x..=bounds.max_x {
                output.push(if grid.contains(&(x, y).into()) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with x coordinates along the top and y down the side
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let Some(bounds) = grid.bounding_box() else {
            return "(empty)\n".to_string();
        };

        let label_width = bounds
            .min_y
            .to_string()
            .len()
            .max(bounds.max_y.to_string().len());

        let mut output = String::new();

        // Header with column numbers
        output.push_str(&" ".repeat(label_width + 1));
        for x in bounds.min_x..=bounds.max_x {
            output.push_str(&format!("{:2}", x.rem_euclid(10)));
        }
        output.push('\n');

        // Rows with row numbers, highest y first
        for y in (bounds.min_y..=bounds.max_y).rev() {
            output.push_str(&format!("{:>width$} ", y, width = label_width));
            for x in bounds.min_x..=bounds.max_x {
                output.push_str(if grid.contains(&(x, y).into()) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line summary of a generation
    pub fn format_generation(generation: usize, grid: &Grid) -> String {
        format!("Generation {} (Living: {})", generation, grid.len())
    }

    /// Every generation of an evolution, one block per generation
    pub fn format_evolution(path: &[Grid]) -> String {
        let mut output = String::new();
        for (i, grid) in path.iter().enumerate() {
            output.push_str(&Self::format_generation(i, grid));
            output.push_str(":\n");
            output.push_str(&Self::format_grid_compact(grid));
            output.push('\n');
        }
        output
    }

    /// Summary of a pattern analysis
    pub fn format_analysis(grid: &Grid, classification: &Classification) -> String {
        let mut output = String::new();
        output.push_str("Pattern Statistics:\n");
        output.push_str(&format!("  Living cells: {}\n", grid.len()));
        if let Some(bounds) = grid.bounding_box() {
            output.push_str(&format!("  Bounding box: {}x{}\n", bounds.width(), bounds.height()));
            let area = bounds.width() as f64 * bounds.height() as f64;
            output.push_str(&format!("  Density: {:.1}%\n", grid.len() as f64 / area * 100.0));
        }
        output.push_str(&format!("  Type: {}\n", classification));
        output
    }

    /// Save a grid in the configured output format
    pub fn save_grid<P: AsRef<Path>>(grid: &Grid, path: P, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => io::save_pattern(grid, path),
            OutputFormat::Json => io::save_grid_json(grid, path),
        }
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Cell;
    use tempfile::tempdir;

    fn glider() -> Grid {
        [(1, 2), (2, 1), (0, 0), (1, 0), (2, 0)]
            .into_iter()
            .map(Cell::from)
            .collect()
    }

    #[test]
    fn test_grid_formatting() {
        let compact = GridFormatter::format_grid_compact(&glider());
        assert_eq!(compact, "·█·\n··█\n███\n");

        let with_coords = GridFormatter::format_grid_with_coords(&glider());
        assert!(with_coords.starts_with("   0 1 2\n"));
        assert!(with_coords.contains("2 ··██··"));
    }

    #[test]
    fn test_empty_grid_formatting() {
        assert_eq!(GridFormatter::format_grid_compact(&Grid::new()), "(empty)\n");
    }

    #[test]
    fn test_format_evolution() {
        let path = vec![glider(), Grid::new()];
        let output = GridFormatter::format_evolution(&path);

        assert!(output.contains("Generation 0 (Living: 5):"));
        assert!(output.contains("Generation 1 (Living: 0):"));
    }

    #[test]
    fn test_format_analysis() {
        let output = GridFormatter::format_analysis(&glider(), &Classification::StillLife);
        assert!(output.contains("Living cells: 5"));
        assert!(output.contains("Bounding box: 3x3"));
        assert!(output.contains("Type: Still Life"));
    }

    #[test]
    fn test_save_grid_formats() {
        let temp_dir = tempdir().unwrap();

        let text_path = temp_dir.path().join("out.txt");
        GridFormatter::save_grid(&glider(), &text_path, OutputFormat::Text).unwrap();
        assert_eq!(std::fs::read_to_string(&text_path).unwrap(), "010\n001\n111\n");

        let json_path = temp_dir.path().join("out.json");
        GridFormatter::save_grid(&glider(), &json_path, OutputFormat::Json).unwrap();
        assert!(std::fs::read_to_string(&json_path).unwrap().contains("\"x\""));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
