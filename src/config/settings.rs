//! Configuration settings for the Game of Life simulator

use crate::game_of_life::engine::DEFAULT_PARALLEL_THRESHOLD;
use crate::game_of_life::rules::CONWAY;
use crate::game_of_life::session::DEFAULT_TICK_RATE;
use crate::game_of_life::{io, Engine, Grid, RuleSet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub seed: SeedConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Rule string such as `B3/S23`; malformed strings fall back to `B3/S23`
    pub rules: String,
    pub generations: usize,
    pub parallel_threshold: usize,
    pub tick_rate: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    pub pattern_file: Option<PathBuf>,
    pub random: Option<RandomSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomSeed {
    pub width: u32,
    pub height: u32,
    pub density: f64,
    pub seed: u64,
}

impl Default for RandomSeed {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            density: 0.3,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                rules: CONWAY.to_string(),
                generations: 10,
                parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
                tick_rate: DEFAULT_TICK_RATE,
            },
            seed: SeedConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Text,
                output_file: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.tick_rate == 0 {
            anyhow::bail!("Tick rate must be at least 1");
        }

        if let Some(ref pattern_file) = self.seed.pattern_file {
            if !pattern_file.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern_file.display());
            }
        }

        if let Some(ref random) = self.seed.random {
            if !(0.0..=1.0).contains(&random.density) {
                anyhow::bail!("Random seed density must be between 0 and 1, got {}", random.density);
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref rules) = cli_overrides.rules {
            self.simulation.rules = rules.clone();
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.seed.pattern_file = Some(pattern_file.clone());
        }
        if let Some((width, height)) = cli_overrides.random_size {
            let random = self.seed.random.get_or_insert_with(RandomSeed::default);
            random.width = width;
            random.height = height;
        }
        if let Some(density) = cli_overrides.density {
            self.seed.random.get_or_insert_with(RandomSeed::default).density = density;
        }
        if let Some(seed) = cli_overrides.seed {
            self.seed.random.get_or_insert_with(RandomSeed::default).seed = seed;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_file) = cli_overrides.output_file {
            self.output.output_file = Some(output_file.clone());
        }
    }

    /// Rule set named by the settings, falling back to `B3/S23` if malformed
    pub fn rules(&self) -> RuleSet {
        RuleSet::parse(&self.simulation.rules)
    }

    pub fn engine(&self) -> Engine {
        Engine::new(self.rules()).with_parallel_threshold(self.simulation.parallel_threshold)
    }

    /// Build the starting grid: the pattern file plus any random scatter
    pub fn seed_grid(&self) -> Result<Grid> {
        let mut grid = match self.seed.pattern_file {
            Some(ref path) => io::load_pattern(path)?,
            None => Grid::new(),
        };

        if let Some(ref random) = self.seed.random {
            grid.extend(
                io::random_scatter(random.width, random.height, random.density, random.seed)
                    .iter()
                    .copied(),
            );
        }

        Ok(grid)
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rules: Option<String>,
    pub generations: Option<usize>,
    pub pattern_file: Option<PathBuf>,
    pub random_size: Option<(u32, u32)>,
    pub density: Option<f64>,
    pub seed: Option<u64>,
    pub format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
}
