//! Command line front end for the sparse Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sparse_life::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{classify, create_example_patterns, RuleSet, Session},
    utils::{ColorOutput, GridFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sparse_life")]
#[command(about = "Game of Life on an unbounded sparse grid")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve a pattern for a number of generations
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file to seed the grid with (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Rule string such as B3/S23 (overrides config)
        #[arg(short, long)]
        rules: Option<String>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Scatter random cells over a WIDTHxHEIGHT area
        #[arg(long, value_parser = parse_size)]
        random: Option<(u32, u32)>,

        /// Probability of a random cell being alive
        #[arg(long)]
        density: Option<f64>,

        /// Seed for the random scatter
        #[arg(long)]
        seed: Option<u64>,

        /// Write the final generation to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Show every generation
        #[arg(long)]
        show_evolution: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Classify a pattern as still life, oscillator or spaceship
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file
        #[arg(short, long)]
        pattern: PathBuf,

        /// Rule string (overrides config)
        #[arg(short, long)]
        rules: Option<String>,

        /// Longest period to look for
        #[arg(short, long, default_value_t = 64)]
        max_period: usize,
    },

    /// Parse a rule string and show how it is understood
    Rules {
        /// Rule string such as B36/S23
        spec: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    init_tracing(verbose);

    match cli.command {
        Commands::Run {
            config,
            pattern,
            rules,
            generations,
            random,
            density,
            seed,
            output,
            format,
            show_evolution,
            verbose,
        } => {
            let overrides = CliOverrides {
                rules,
                generations,
                pattern_file: pattern,
                random_size: random,
                density,
                seed,
                format,
                output_file: output,
            };
            run_command(config, overrides, show_evolution, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Analyze {
            config,
            pattern,
            rules,
            max_period,
        } => analyze_command(config, pattern, rules, max_period),
        Commands::Rules { spec } => rules_command(&spec),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse sizes like `64x48`
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (width, height) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;

    let width = width.trim().parse().map_err(|e| format!("invalid width: {}", e))?;
    let height = height.trim().parse().map_err(|e| format!("invalid height: {}", e))?;
    Ok((width, height))
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(&config_path.to_path_buf())
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    show_evolution: bool,
    verbose: bool,
) -> Result<()> {
    if !config_path.exists() {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
    }
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let engine = settings.engine();
    let seed = settings.seed_grid().context("Failed to build the seed grid")?;

    if verbose {
        println!("Configuration:");
        println!("  Rules: {}", engine.rules());
        println!("  Generations: {}", settings.simulation.generations);
        println!("  Seed population: {}", seed.len());
        println!();
    }

    let start_time = Instant::now();
    let mut session = Session::new(seed, engine).with_tick_rate(settings.simulation.tick_rate);
    session.toggle_running();

    if show_evolution {
        println!("{}", GridFormatter::format_generation(0, session.grid()));
        print!("{}", GridFormatter::format_grid_compact(session.grid()));
    }

    for _ in 0..settings.simulation.generations {
        session.tick();
        if show_evolution {
            println!();
            println!(
                "{}",
                GridFormatter::format_generation(session.generation() as usize, session.grid())
            );
            print!("{}", GridFormatter::format_grid_compact(session.grid()));
        }
    }

    let elapsed = start_time.elapsed();

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Ran {} generation(s) in {:.3}s, {} living cell(s)",
            session.generation(),
            elapsed.as_secs_f64(),
            session.population()
        ))
    );

    if !show_evolution {
        print!("{}", GridFormatter::format_grid_compact(session.grid()));
    }

    if let Some(ref output_file) = settings.output.output_file {
        GridFormatter::save_grid(session.grid(), output_file, settings.output.format)
            .context("Failed to save final generation")?;
        println!(
            "{}",
            ColorOutput::success(&format!("Final generation saved to {}", output_file.display()))
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");

    for dir in [&config_dir, &pattern_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&pattern_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    // HighLife variant seeded with the glider
    let mut highlife = Settings::default();
    highlife.simulation.rules = "B36/S23".to_string();
    highlife.simulation.generations = 40;
    highlife.seed.pattern_file = Some(PathBuf::from("patterns/glider.txt"));
    highlife.to_file(&config_dir.join("highlife.yaml"))?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your own patterns to {}", pattern_dir.display());
    println!("3. Run: sparse_life run --pattern patterns/glider.txt --generations 8 --show-evolution");

    Ok(())
}

fn analyze_command(
    config_path: PathBuf,
    pattern_path: PathBuf,
    rules: Option<String>,
    max_period: usize,
) -> Result<()> {
    println!("{}", ColorOutput::info("Analyzing pattern..."));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        rules,
        ..CliOverrides::default()
    });

    let grid = sparse_life::game_of_life::load_pattern(&pattern_path)
        .with_context(|| format!("Failed to load pattern from {}", pattern_path.display()))?;

    let engine = settings.engine();
    println!("Rules: {}", engine.rules());
    println!("{}", GridFormatter::format_grid_with_coords(&grid));

    let classification = classify(&grid, &engine, max_period);
    print!("{}", GridFormatter::format_analysis(&grid, &classification));

    Ok(())
}

fn rules_command(spec: &str) -> Result<()> {
    match RuleSet::try_parse(spec) {
        Ok(rules) => {
            println!("{}", ColorOutput::success(&format!("Parsed rule: {}", rules)));
        }
        Err(e) => {
            println!("{}", ColorOutput::warning(&format!("Invalid rule {:?}: {}", spec, e)));
            println!("Falling back to: {}", RuleSet::parse(spec));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "sparse_life",
            "run",
            "--rules",
            "B36/S23",
            "--generations",
            "5",
            "--random",
            "32x16",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64x48"), Ok((64, 48)));
        assert_eq!(parse_size("3X2"), Ok((3, 2)));
        assert!(parse_size("64").is_err());
        assert!(parse_size("ax4").is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/highlife.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());
    }

    #[test]
    fn test_run_command_writes_output() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("blinker.txt");
        let output = temp_dir.path().join("out.txt");
        std::fs::write(&pattern, "010\n010\n010\n").unwrap();

        let overrides = CliOverrides {
            generations: Some(1),
            pattern_file: Some(pattern),
            output_file: Some(output.clone()),
            ..CliOverrides::default()
        };
        run_command(temp_dir.path().join("missing.yaml"), overrides, false, false).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "111\n");
    }
}
