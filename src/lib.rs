// Domain layer - Core simulation logic
pub mod domain;

// Application layer - Tick pacing and reset coordination
pub mod application;

// Configuration
pub mod config;

// Infrastructure layer - rendering, input
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{
    Algorithm, Cell, Error, Grid, LifeLike, NEIGHBOR_OFFSETS, Neighborhood, Pattern, Rule,
    RuleTable, Simulation, presets,
};
pub use application::AppState;
pub use config::{Config, ConfigError};
