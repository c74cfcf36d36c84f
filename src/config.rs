//! Configuration for the automaton viewer.
//!
//! Supports YAML configuration files with sensible defaults; every field may
//! be omitted.

use crate::domain::{Algorithm, LifeLike, Rule, RuleTable, default_rule};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read or write config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub rule: RuleConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Grid and seeding configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Width in cells; derived from the display when absent
    pub width: Option<usize>,
    /// Height in cells; derived from the display when absent
    pub height: Option<usize>,
    /// Probability a cell starts alive, clamped into [0, 1]
    pub initial_density: f64,
    /// Range a new density is drawn from on reset
    pub reset_density: DensityRange,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityRange {
    pub min: f64,
    pub max: f64,
}

/// Rule selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub preset: RulePreset,
    pub strategy: RuleStrategy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RulePreset {
    /// Classic B3/S23
    #[default]
    Life,
    HighLife,
    Seeds,
    DayAndNight,
}

/// How the chosen rule is evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStrategy {
    /// Explicit 512-key lookup table
    #[default]
    Table,
    /// Neighbor count compared against birth/survival sets
    ClosedForm,
}

/// Window and pacing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Side of one cell in pixels
    pub cell_size: u32,
    /// Generations per second
    pub tick_rate_hz: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub log_level: String,
}

/// Values given on the command line; each one set replaces the file value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub density: Option<f64>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub rule: Option<RulePreset>,
    /// Forces the parallel algorithm; `false` keeps the configured one
    pub parallel: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            initial_density: 0.3,
            reset_density: DensityRange { min: 0.2, max: 0.4 },
            seed: None,
            algorithm: Algorithm::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            cell_size: 5,
            tick_rate_hz: 30.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl RulePreset {
    pub fn life_like(self) -> LifeLike {
        match self {
            RulePreset::Life => LifeLike::conway(),
            RulePreset::HighLife => LifeLike::highlife(),
            RulePreset::Seeds => LifeLike::seeds(),
            RulePreset::DayAndNight => LifeLike::day_and_night(),
        }
    }
}

impl RuleConfig {
    /// Build the configured rule
    pub fn build(&self) -> Box<dyn Rule> {
        match (self.preset, self.strategy) {
            (RulePreset::Life, RuleStrategy::Table) => default_rule(),
            (preset, RuleStrategy::Table) => Box::new(RuleTable::tabulate(&preset.life_like())),
            (preset, RuleStrategy::ClosedForm) => Box::new(preset.life_like()),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Out-of-range densities are not errors; they are clamped when used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.cell_size == 0 {
            return Err(ConfigError::Invalid("cell_size must be > 0".to_string()));
        }
        let rate = self.display.tick_rate_hz;
        if rate.is_nan() || rate <= 0.0 {
            return Err(ConfigError::Invalid("tick_rate_hz must be > 0".to_string()));
        }
        let (width, height) = self.grid_dimensions();
        if width == 0 || height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid dimensions must be > 0, got {}x{}",
                width, height
            )));
        }
        let range = self.grid.reset_density;
        if range.min > range.max {
            return Err(ConfigError::Invalid(format!(
                "reset_density min {} exceeds max {}",
                range.min, range.max
            )));
        }
        if !(0.0..=1.0).contains(&self.grid.initial_density) {
            log::warn!(
                "initial_density {} is outside [0, 1] and will be clamped",
                self.grid.initial_density
            );
        }
        Ok(())
    }

    /// Grid size in cells, derived from the screen when not set explicitly
    pub fn grid_dimensions(&self) -> (usize, usize) {
        let cell = self.display.cell_size.max(1) as usize;
        let width = self
            .grid
            .width
            .unwrap_or(self.display.screen_width as usize / cell);
        let height = self
            .grid
            .height
            .unwrap_or(self.display.screen_height as usize / cell);
        (width, height)
    }

    pub fn build_rule(&self) -> Box<dyn Rule> {
        self.rule.build()
    }

    /// Layer command line values over the loaded configuration
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if overrides.seed.is_some() {
            self.grid.seed = overrides.seed;
        }
        if let Some(density) = overrides.density {
            self.grid.initial_density = density;
        }
        if overrides.width.is_some() {
            self.grid.width = overrides.width;
        }
        if overrides.height.is_some() {
            self.grid.height = overrides.height;
        }
        if let Some(preset) = overrides.rule {
            self.rule.preset = preset;
        }
        if overrides.parallel {
            self.grid.algorithm = Algorithm::Parallel;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cell, Neighborhood};

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_dimensions(), (160, 120));
    }

    #[test]
    fn test_explicit_dimensions_override_display() {
        let mut config = Config::default();
        config.grid.width = Some(33);
        config.grid.height = Some(21);
        assert_eq!(config.grid_dimensions(), (33, 21));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.display.cell_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.grid.width = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.grid.reset_density = DensityRange { min: 0.6, max: 0.1 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_density_is_not_an_error() {
        let mut config = Config::default();
        config.grid.initial_density = 1.7;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "grid:\n  initial_density: 0.5\n  algorithm: parallel\nrule:\n  preset: high_life\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.grid.initial_density, 0.5);
        assert_eq!(config.grid.algorithm, Algorithm::Parallel);
        assert_eq!(config.rule.preset, RulePreset::HighLife);
        assert_eq!(config.rule.strategy, RuleStrategy::Table);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.grid.seed = Some(99);
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_file_save_and_load() {
        let path = std::env::temp_dir().join("cellular_automaton_config_test.yaml");
        let mut config = Config::default();
        config.rule.preset = RulePreset::Seeds;
        config.save(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.rule.preset, RulePreset::Seeds);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_apply_overrides_replaces_only_given_values() {
        let mut config = Config::default();
        config.grid.seed = Some(5);
        config.grid.width = Some(40);
        config.rule.strategy = RuleStrategy::ClosedForm;

        config.apply_overrides(&Overrides::default());
        assert_eq!(config.grid.seed, Some(5));
        assert_eq!(config.grid.algorithm, Algorithm::Serial);

        config.apply_overrides(&Overrides {
            seed: Some(42),
            density: Some(0.7),
            height: Some(25),
            rule: Some(RulePreset::Seeds),
            parallel: true,
            ..Default::default()
        });
        assert_eq!(config.grid.seed, Some(42));
        assert_eq!(config.grid.initial_density, 0.7);
        assert_eq!(config.grid_dimensions(), (40, 25));
        assert_eq!(config.rule.preset, RulePreset::Seeds);
        assert_eq!(config.rule.strategy, RuleStrategy::ClosedForm);
        assert_eq!(config.grid.algorithm, Algorithm::Parallel);
    }

    #[test]
    fn test_default_preset_builds_life_table() {
        let rule = Config::default().build_rule();
        assert_eq!(rule.name(), "Life");
        assert_eq!(rule.description(), "lookup table, 312 of 512 keys");
    }

    #[test]
    fn test_build_rule_strategies_agree() {
        let born = Neighborhood::from_bits(0b0011_1111); // six neighbors
        for preset in [RulePreset::Life, RulePreset::HighLife, RulePreset::Seeds, RulePreset::DayAndNight] {
            let table = RuleConfig { preset, strategy: RuleStrategy::Table }.build();
            let closed = RuleConfig { preset, strategy: RuleStrategy::ClosedForm }.build();
            for current in [Cell::Dead, Cell::Alive] {
                assert_eq!(table.next_state(current, &born), closed.next_state(current, &born));
            }
        }
    }
}
