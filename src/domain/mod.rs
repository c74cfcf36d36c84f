mod algorithm;
mod cell;
mod error;
mod grid;
mod neighborhood;
mod patterns;
mod rule_table;
mod rules;
mod simulation;

pub use algorithm::Algorithm;
pub use cell::Cell;
pub use error::{Error, Result};
pub use grid::{Grid, clamp_density};
pub use neighborhood::{NEIGHBOR_OFFSETS, Neighborhood};
pub use patterns::{Pattern, presets};
pub use rule_table::{KEY_COUNT, RuleKey, RuleTable};
pub use rules::{LifeLike, Rule, all_rules, default_rule};
pub use simulation::Simulation;
