//! Ant colony construction and pheromone update loop.
//!
//! # Algorithm
//!
//! Each iteration, every ant builds a tour from a random start by
//! roulette-wheel selection over the unvisited nodes, weighting a move
//! `current → j` by
//!
//! ```text
//! w(j) = τ(current, j)^α · (1 / d(current, j))^β
//! ```
//!
//! Once all ants have finished, each deposits `Q / length` on every edge of
//! its tour (closing edge included), then the whole matrix evaporates by
//! `1 - ρ`. The best tour seen by any ant is kept. The loop runs a fixed
//! number of iterations.
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant system: optimization
//! by a colony of cooperating agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use log::{debug, info};
use rand::Rng;

use crate::cancel::CancelToken;
use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::models::{Solution, TspEngine};
use crate::random::rng_from;

use super::config::AcoConfig;
use super::pheromone::PheromoneMatrix;

/// Ant colony optimizer.
///
/// # Examples
///
/// ```
/// use u_tsp::aco::{AcoConfig, AntColony};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::models::{GeoNode, TspEngine};
/// use u_tsp::CancelToken;
///
/// let nodes = vec![
///     GeoNode::new(1, 0.0, 0.0),
///     GeoNode::new(2, 0.0, 1.0),
///     GeoNode::new(3, 1.0, 1.0),
///     GeoNode::new(4, 1.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let colony = AntColony::new(AcoConfig::default().with_iterations(50).with_seed(1));
/// let sol = colony.solve(&dm, &CancelToken::new()).unwrap();
/// assert!(sol.is_permutation());
/// assert_eq!(sol.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AntColony {
    config: AcoConfig,
}

/// One constructed tour.
#[derive(Debug, Clone)]
struct Ant {
    tour: Vec<usize>,
    length: f64,
}

impl AntColony {
    /// Creates a colony with the given constants.
    pub fn new(config: AcoConfig) -> Self {
        Self { config }
    }

    /// The constants this colony runs with.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Runs the colony with an explicit generator.
    pub fn solve_with_rng<R: Rng>(
        &self,
        distances: &DistanceMatrix,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> Result<Solution> {
        self.config.validate()?;
        let n = distances.size();
        if n < 2 {
            return Ok(Solution::new((0..n).collect(), 0.0));
        }

        let config = &self.config;
        let mut pheromone = PheromoneMatrix::new(n, config.initial_pheromone);
        let mut best: Option<Ant> = None;
        let mut ants = Vec::with_capacity(config.num_ants);

        for iteration in 0..config.iterations {
            cancel.check()?;

            ants.clear();
            for _ in 0..config.num_ants {
                let ant = construct_tour(distances, &pheromone, config, rng);
                if best.as_ref().map_or(true, |b| ant.length < b.length) {
                    debug!("aco: iteration {iteration} new best {:.3}", ant.length);
                    best = Some(ant.clone());
                }
                ants.push(ant);
            }

            for ant in &ants {
                deposit(&mut pheromone, ant, config.q);
            }
            pheromone.evaporate(config.evaporation_rate);
        }

        let best = best.ok_or_else(|| SolveError::invalid_config("colony produced no tour"))?;
        info!(
            "aco: n={} iterations={} ants={} best={:.3}",
            n, config.iterations, config.num_ants, best.length
        );
        Ok(Solution::new(best.tour, best.length))
    }
}

impl TspEngine for AntColony {
    fn name(&self) -> &'static str {
        "ant_colony"
    }

    fn solve(&self, distances: &DistanceMatrix, cancel: &CancelToken) -> Result<Solution> {
        let mut rng = rng_from(self.config.seed);
        self.solve_with_rng(distances, &mut rng, cancel)
    }
}

/// Builds one closed tour from a uniformly random start node.
fn construct_tour<R: Rng>(
    distances: &DistanceMatrix,
    pheromone: &PheromoneMatrix,
    config: &AcoConfig,
    rng: &mut R,
) -> Ant {
    let n = distances.size();
    let start = rng.random_range(0..n);
    // Kept in ascending index order so the cumulative walk is reproducible.
    let mut to_visit: Vec<usize> = (0..n).filter(|&j| j != start).collect();
    let mut tour = Vec::with_capacity(n);
    tour.push(start);

    let mut current = start;
    let mut length = 0.0;
    while !to_visit.is_empty() {
        let pos = pick_next(current, &to_visit, distances, pheromone, config, rng);
        let next = to_visit.remove(pos);
        length += distances.get(current, next);
        tour.push(next);
        current = next;
    }
    length += distances.get(current, start);

    Ant { tour, length }
}

/// Roulette-wheel selection; returns a position in `candidates`.
///
/// A zero distance means a coincident twin, whose weight is unbounded: those
/// are chosen uniformly among themselves. A zero or non-finite weight sum
/// falls back to a uniform choice.
fn pick_next<R: Rng>(
    current: usize,
    candidates: &[usize],
    distances: &DistanceMatrix,
    pheromone: &PheromoneMatrix,
    config: &AcoConfig,
    rng: &mut R,
) -> usize {
    let twins: Vec<usize> = (0..candidates.len())
        .filter(|&k| distances.get(current, candidates[k]) == 0.0)
        .collect();
    if !twins.is_empty() {
        return twins[rng.random_range(0..twins.len())];
    }

    let weights: Vec<f64> = candidates
        .iter()
        .map(|&j| {
            let tau = pheromone.get(current, j);
            let eta = 1.0 / distances.get(current, j);
            tau.powf(config.alpha) * eta.powf(config.beta)
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return rng.random_range(0..candidates.len());
    }

    let threshold = rng.random::<f64>() * sum;
    let mut cumulative = 0.0;
    for (k, w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return k;
        }
    }
    candidates.len() - 1
}

/// Deposits `q / length` on every edge of the ant's closed tour.
fn deposit(pheromone: &mut PheromoneMatrix, ant: &Ant, q: f64) {
    // A zero-length tour only happens when every node coincides.
    if ant.length <= 0.0 {
        return;
    }
    let delta = q / ant.length;
    let n = ant.tour.len();
    for i in 0..n {
        pheromone.deposit(ant.tour[i], ant.tour[(i + 1) % n], delta);
    }
}
