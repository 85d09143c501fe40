use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ColoringError;

/** parameters of the local search refinement. */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// seed of the random number generator (same seed, same proposals)
    pub seed: u64,
    /// number of proposed moves per round
    pub trials_per_round: usize,
    /// the search stops after this many consecutive rounds without improving move
    pub max_unproductive_rounds: usize,
    /// maximum number of rounds (none: unlimited)
    pub max_rounds: Option<usize>,
    /// time limit in seconds (none: unlimited)
    pub time_limit: Option<f32>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            trials_per_round: 10_000,
            max_unproductive_rounds: 10,
            max_rounds: None,
            time_limit: None,
        }
    }
}

impl SolverConfig {
    /// reads a configuration from a JSON file. Missing fields take their default value.
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, ColoringError> {
        let s = fs::read_to_string(filename)?;
        Self::from_json(&s)
    }

    /// reads a configuration from a JSON string. Missing fields take their default value.
    pub fn from_json(s: &str) -> Result<Self, ColoringError> {
        Ok(serde_json::from_str(s)?)
    }
}
