//! Lin-Kernighan sequential edge exchange.
//!
//! # Algorithm
//!
//! A move removes tour edges `x1, x2, …` and adds edges `y1, y2, …` in an
//! alternating chain `t1-t2, t2-t3, t3-t4, …`. After each removed edge the
//! chain is tentatively closed back to `t1`; if the closed edge set is a
//! single Hamiltonian cycle with positive gain and a strictly lower length,
//! it replaces the tour and the search restarts. Otherwise the chain is
//! extended with the next most promising `y`.
//!
//! Candidates for `y` come from precomputed nearest-neighbor lists and are
//! ranked by `|x_{i+1}| − |y_i|`. Search breadth narrows with depth: 50
//! first-level candidates, 10 at the second level, 3 beyond. From four
//! removed edges on, only the longer tour edge at the chain end is tried.
//! Accepted tours are remembered by canonical key; reaching a remembered
//! tour ends that branch.
//!
//! # Complexity
//!
//! Each improvement pass is O(n · 50 · 10 · 3^k) candidate evaluations with
//! an O(n) cycle check per closure attempt.
//!
//! # Reference
//!
//! Lin, S. & Kernighan, B.W. (1973). "An Effective Heuristic Algorithm for
//! the Traveling-Salesman Problem", *Operations Research* 21(2), 498-516.

use std::collections::HashSet;

use log::{debug, info, trace};
use rand::Rng;

use crate::cancel::CancelToken;
use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::models::{Solution, TspEngine};
use crate::random::rng_from;

use super::config::LinKernighanConfig;
use super::edge::{Edge, EdgeSet};
use super::tour::Tour;

const FIRST_LEVEL_BREADTH: usize = 50;
const SECOND_LEVEL_BREADTH: usize = 10;
const DEEP_BREADTH: usize = 3;
/// Removed-edge count from which `choose_x` stops trying both directions.
const DIRECTED_DEPTH: usize = 4;

/// A ranked `y` candidate.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    node: usize,
    /// Best `|x_{i+1}| − |y_i|` over the node's usable tour edges.
    local_gain: f64,
    /// Running chain gain after adding `y_i`.
    gain: f64,
}

/// Single-tour Lin-Kernighan optimizer.
///
/// Runs improvement passes on one tour until no improving move is found.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::{LinKernighanOptimizer, Tour};
/// use u_tsp::CancelToken;
///
/// // Points on a line; the crossing tour 0-2-1-3-4 is improved to length 8.
/// let mut dm = DistanceMatrix::new(5);
/// for i in 0..5 {
///     for j in 0..5 {
///         dm.set(i, j, (i as f64 - j as f64).abs());
///     }
/// }
/// let cancel = CancelToken::new();
/// let mut lk = LinKernighanOptimizer::new(&dm, Tour::new(vec![0, 2, 1, 3, 4], &dm), &cancel);
/// lk.optimize().unwrap();
/// assert_eq!(lk.tour().cost(), 8.0);
/// ```
pub struct LinKernighanOptimizer<'a> {
    distances: &'a DistanceMatrix,
    cancel: &'a CancelToken,
    tour: Tour,
    neighbors: Vec<Vec<usize>>,
    visited: HashSet<String>,
    accepted: usize,
}

impl<'a> LinKernighanOptimizer<'a> {
    /// Creates an optimizer starting from `tour`.
    pub fn new(distances: &'a DistanceMatrix, tour: Tour, cancel: &'a CancelToken) -> Self {
        Self {
            distances,
            cancel,
            tour,
            neighbors: Vec::new(),
            visited: HashSet::new(),
            accepted: 0,
        }
    }

    /// The current tour.
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Consumes the optimizer, returning its tour.
    pub fn into_tour(self) -> Tour {
        self.tour
    }

    /// Number of moves accepted by the last [`optimize`](Self::optimize).
    pub fn accepted_moves(&self) -> usize {
        self.accepted
    }

    /// Improves the tour until no improving move exists.
    ///
    /// Tours with fewer than four nodes have no non-trivial exchange and are
    /// left as they are. The tour length never increases.
    pub fn optimize(&mut self) -> Result<()> {
        self.visited.clear();
        self.visited.insert(self.tour.key());
        self.accepted = 0;

        let n = self.tour.len();
        if n < 4 {
            return Ok(());
        }
        if self.neighbors.len() != n {
            self.neighbors = (0..n).map(|i| self.distances.sorted_neighbors(i)).collect();
        }

        while self.improve()? {}
        Ok(())
    }

    /// One improvement pass; returns `true` if a move was accepted.
    fn improve(&mut self) -> Result<bool> {
        self.cancel.check()?;

        for i in 0..self.tour.len() {
            let t1 = self.tour.at(i);
            let (pred, succ) = self.tour.around(t1);

            for t2 in [pred, succ] {
                let broken: EdgeSet = [Edge::new(t1, t2)].into_iter().collect();
                let gain = self.distances.get(t1, t2);

                let candidates = self.closest(t2, gain, &broken, &EdgeSet::new());
                let mut tries = 0;
                for candidate in candidates {
                    let t3 = candidate.node;
                    let joined: EdgeSet = [Edge::new(t2, t3)].into_iter().collect();
                    if self.choose_x(t1, t3, candidate.gain, &broken, &joined) {
                        return Ok(true);
                    }
                    tries += 1;
                    if tries == FIRST_LEVEL_BREADTH {
                        break;
                    }
                }
            }
        }

        Ok(false)
    }

    /// Ranks the `y` candidates leaving `t2i`, most promising first.
    fn closest(&self, t2i: usize, gain: f64, broken: &EdgeSet, joined: &EdgeSet) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for &node in &self.neighbors[t2i] {
            let yi = Edge::new(t2i, node);
            let y_len = self.distances.get(t2i, node);
            let gi = gain - y_len;
            if gi < 0.0
                || broken.iter().any(|e| e.touches(node))
                || self.tour.contains(&yi)
                || joined.contains(&yi)
            {
                continue;
            }

            let (pred, succ) = self.tour.around(node);
            let local_gain = [pred, succ]
                .into_iter()
                .filter(|&s| {
                    let xi = Edge::new(node, s);
                    !broken.contains(&xi) && !joined.contains(&xi)
                })
                .map(|s| self.distances.get(node, s) - y_len)
                .reduce(f64::max);

            if let Some(local_gain) = local_gain.filter(|g| *g >= 0.0) {
                candidates.push(Candidate {
                    node,
                    local_gain,
                    gain: gi,
                });
            }
        }

        candidates.sort_by(|a, b| b.local_gain.total_cmp(&a.local_gain));
        candidates
    }

    /// Tour neighbors of `last` whose edge may be removed next.
    ///
    /// Both directions while fewer than [`DIRECTED_DEPTH`] edges are broken;
    /// afterwards only the neighbor across the longer edge.
    fn exits(&self, last: usize, broken: usize) -> Vec<usize> {
        let (pred, succ) = self.tour.around(last);
        if broken < DIRECTED_DEPTH {
            vec![pred, succ]
        } else if self.distances.get(pred, last) > self.distances.get(succ, last) {
            vec![pred]
        } else {
            vec![succ]
        }
    }

    /// Picks the next edge to remove at `last`, trying to close the chain.
    fn choose_x(
        &mut self,
        t1: usize,
        last: usize,
        gain: f64,
        broken: &EdgeSet,
        joined: &EdgeSet,
    ) -> bool {
        for t2i in self.exits(last, broken.len()) {
            if t2i == t1 {
                continue;
            }
            let xi = Edge::new(last, t2i);
            if broken.contains(&xi) || joined.contains(&xi) {
                continue;
            }

            let gi = gain + self.distances.get(last, t2i);
            let mut removed = broken.clone();
            removed.insert(xi);
            let mut added = joined.clone();
            added.insert(Edge::new(t2i, t1));
            let relink = gi - self.distances.get(t2i, t1);

            match self.tour.generate(&removed, &added) {
                None if added.len() > 2 => continue,
                None => {}
                Some(candidate) => {
                    let key = Tour::key_of(&candidate);
                    if self.visited.contains(&key) {
                        return false;
                    }
                    if relink > 0.0 {
                        let cost = self.distances.tour_length(&candidate);
                        if cost < self.tour.cost() {
                            trace!(
                                "lk: {}-opt move {:.3} -> {:.3}",
                                removed.len(),
                                self.tour.cost(),
                                cost
                            );
                            self.tour.replace(candidate, self.distances);
                            self.visited.insert(key);
                            self.accepted += 1;
                            return true;
                        }
                    }
                }
            }

            if self.choose_y(t1, t2i, gi, &removed, joined) {
                return true;
            }
        }

        false
    }

    /// Extends the chain from `t2i` with the best-ranked new edges.
    fn choose_y(&mut self, t1: usize, t2i: usize, gain: f64, broken: &EdgeSet, joined: &EdgeSet) -> bool {
        let breadth = if broken.len() == 2 {
            SECOND_LEVEL_BREADTH
        } else {
            DEEP_BREADTH
        };

        for candidate in self.closest(t2i, gain, broken, joined).into_iter().take(breadth) {
            let mut added = joined.clone();
            added.insert(Edge::new(t2i, candidate.node));
            if self.choose_x(t1, candidate.node, candidate.gain, broken, &added) {
                return true;
            }
        }

        false
    }
}

/// Multi-start Lin-Kernighan engine.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::{LinKernighan, LinKernighanConfig};
/// use u_tsp::models::{GeoNode, TspEngine};
/// use u_tsp::CancelToken;
///
/// let nodes = vec![
///     GeoNode::new(1, 0.0, 0.0),
///     GeoNode::new(2, 1.0, 1.0),
///     GeoNode::new(3, 0.0, 1.0),
///     GeoNode::new(4, 1.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let lk = LinKernighan::new(LinKernighanConfig::default().with_restarts(5).with_seed(7));
/// let sol = lk.solve(&dm, &CancelToken::new()).unwrap();
/// assert!(sol.is_permutation());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinKernighan {
    config: LinKernighanConfig,
}

impl LinKernighan {
    /// Creates an engine with the given restart settings.
    pub fn new(config: LinKernighanConfig) -> Self {
        Self { config }
    }

    /// The restart settings.
    pub fn config(&self) -> &LinKernighanConfig {
        &self.config
    }

    /// Runs all restarts with an explicit generator.
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

        let mut tour = Tour::identity(n, distances);
        let mut best: Option<Solution> = None;
        let mut mean = 0.0;

        for run in 0..self.config.restarts {
            cancel.check()?;
            if self.config.shuffle {
                tour.shuffle(rng, distances);
            }

            let start = tour.cost();
            let mut optimizer = LinKernighanOptimizer::new(distances, tour, cancel);
            optimizer.optimize()?;
            let moves = optimizer.accepted_moves();
            tour = optimizer.into_tour();
            debug!(
                "lk: run {run} {:.3} -> {:.3} in {moves} moves",
                start,
                tour.cost()
            );

            mean += (tour.cost() - mean) / (run + 1) as f64;
            if best.as_ref().map_or(true, |b| tour.cost() < b.cost()) {
                best = Some(Solution::new(tour.nodes().to_vec(), tour.cost()));
            }
        }

        let best = best.ok_or_else(|| SolveError::invalid_config("no restart completed"))?;
        info!(
            "lk: n={} restarts={} best={:.3} mean={:.3}",
            n,
            self.config.restarts,
            best.cost(),
            mean
        );
        Ok(best)
    }
}

impl TspEngine for LinKernighan {
    fn name(&self) -> &'static str {
        "lin_kernighan"
    }

    fn solve(&self, distances: &DistanceMatrix, cancel: &CancelToken) -> Result<Solution> {
        let mut rng = rng_from(self.config.seed);
        self.solve_with_rng(distances, &mut rng, cancel)
    }
}
