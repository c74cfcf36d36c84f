//! Algorithm enum for selecting how a generation is evaluated.
//!
//! Both variants read only the pre-step buffer and produce identical
//! generations; they differ only in how the work is scheduled.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// One cell after another on the calling thread
    #[default]
    Serial,
    /// Rows evaluated in parallel with rayon
    Parallel,
}

impl Algorithm {
    /// Get all available algorithms
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    /// Display name for the HUD
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Cell by cell, single thread",
            Algorithm::Parallel => "Row per task, rayon thread pool",
        }
    }
}
