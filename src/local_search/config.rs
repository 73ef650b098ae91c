//! Lin-Kernighan restart settings.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolveError};

/// Settings for a multi-start Lin-Kernighan solve.
///
/// Each restart optionally shuffles the current tour and runs the optimizer
/// to a local optimum; the cheapest local optimum is returned.
///
/// # Examples
///
/// ```
/// use u_tsp::local_search::LinKernighanConfig;
///
/// let config = LinKernighanConfig::default().with_restarts(10).with_seed(3);
/// assert_eq!(config.restarts, 10);
/// assert!(config.shuffle);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinKernighanConfig {
    /// Number of optimize runs.
    pub restarts: usize,
    /// Shuffle the tour before each run.
    pub shuffle: bool,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for LinKernighanConfig {
    fn default() -> Self {
        Self {
            restarts: 100,
            shuffle: true,
            seed: None,
        }
    }
}

impl LinKernighanConfig {
    /// Sets the number of optimize runs.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Sets whether each run starts from a shuffled tour.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that at least one run is requested.
    pub fn validate(&self) -> Result<()> {
        if self.restarts == 0 {
            return Err(SolveError::invalid_config("restarts must be >= 1"));
        }
        Ok(())
    }
}
