//! Ant colony tunables.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolveError};

/// Constants fixed for one ant colony solve.
///
/// Defaults: τ₀ = 1, ρ = 0.1, 1000 iterations,
/// α = 2, β = 3, Q = 1 and 50 ants.
///
/// # Examples
///
/// ```
/// use u_tsp::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_iterations(200)
///     .with_num_ants(20)
///     .with_seed(7);
/// assert_eq!(config.iterations, 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoConfig {
    /// Pheromone value every edge starts with (τ₀).
    pub initial_pheromone: f64,
    /// Fraction of pheromone removed per iteration (ρ), in `(0, 1)`.
    pub evaporation_rate: f64,
    /// Number of iterations (T).
    pub iterations: usize,
    /// Pheromone exponent (α).
    pub alpha: f64,
    /// Inverse-distance exponent (β).
    pub beta: f64,
    /// Deposit numerator: an ant deposits `q / tour_length` per edge.
    pub q: f64,
    /// Ants per iteration (M).
    pub num_ants: usize,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            initial_pheromone: 1.0,
            evaporation_rate: 0.1,
            iterations: 1000,
            alpha: 2.0,
            beta: 3.0,
            q: 1.0,
            num_ants: 50,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the initial pheromone τ₀.
    pub fn with_initial_pheromone(mut self, tau0: f64) -> Self {
        self.initial_pheromone = tau0;
        self
    }

    /// Sets the evaporation rate ρ.
    pub fn with_evaporation_rate(mut self, rho: f64) -> Self {
        self.evaporation_rate = rho;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the pheromone exponent α.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the inverse-distance exponent β.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the deposit numerator Q.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Sets the number of ants per iteration.
    pub fn with_num_ants(mut self, num_ants: usize) -> Self {
        self.num_ants = num_ants;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that every constant is in range.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return Err(SolveError::invalid_config(format!(
                "initial_pheromone must be finite and > 0, got {}",
                self.initial_pheromone
            )));
        }
        if !(self.evaporation_rate > 0.0 && self.evaporation_rate < 1.0) {
            return Err(SolveError::invalid_config(format!(
                "evaporation_rate must be in (0, 1), got {}",
                self.evaporation_rate
            )));
        }
        if self.iterations == 0 {
            return Err(SolveError::invalid_config("iterations must be >= 1"));
        }
        if self.num_ants == 0 {
            return Err(SolveError::invalid_config("num_ants must be >= 1"));
        }
        if !(self.alpha.is_finite() && self.beta.is_finite()) {
            return Err(SolveError::invalid_config("alpha and beta must be finite"));
        }
        if !(self.q.is_finite() && self.q > 0.0) {
            return Err(SolveError::invalid_config(format!(
                "q must be finite and > 0, got {}",
                self.q
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = AcoConfig::default();
        assert_eq!(c.initial_pheromone, 1.0);
        assert_eq!(c.evaporation_rate, 0.1);
        assert_eq!(c.iterations, 1000);
        assert_eq!(c.alpha, 2.0);
        assert_eq!(c.beta, 3.0);
        assert_eq!(c.q, 1.0);
        assert_eq!(c.num_ants, 50);
        assert!(c.seed.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(AcoConfig::default().with_evaporation_rate(0.0).validate().is_err());
        assert!(AcoConfig::default().with_evaporation_rate(1.0).validate().is_err());
        assert!(AcoConfig::default().with_iterations(0).validate().is_err());
        assert!(AcoConfig::default().with_num_ants(0).validate().is_err());
        assert!(AcoConfig::default().with_initial_pheromone(0.0).validate().is_err());
        assert!(AcoConfig::default().with_q(-1.0).validate().is_err());
        assert!(AcoConfig::default().with_alpha(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: AcoConfig = serde_json::from_str(r#"{"iterations": 10, "seed": 3}"#).expect("valid");
        assert_eq!(c.iterations, 10);
        assert_eq!(c.seed, Some(3));
        assert_eq!(c.num_ants, 50);
    }
}
