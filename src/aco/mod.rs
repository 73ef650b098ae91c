//! Ant Colony Optimization.
//!
//! - [`AcoConfig`] — Tunable constants (τ₀, ρ, T, α, β, Q, M)
//! - [`PheromoneMatrix`] — Symmetric trail matrix with deposit/evaporate
//! - [`AntColony`] — Roulette-wheel tour construction and pheromone update loop

mod colony;
mod config;
mod pheromone;

pub use colony::AntColony;
pub use config::AcoConfig;
pub use pheromone::PheromoneMatrix;
