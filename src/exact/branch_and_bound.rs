//! Exact depth-first branch-and-bound.
//!
//! # Algorithm
//!
//! Every tour uses exactly two edges per node, so half the sum of each
//! node's two cheapest incident edges is a lower bound on any tour:
//!
//! ```text
//! bound = Σ_v (min1(v) + min2(v)) / 2
//! ```
//!
//! The search extends a path from node 0 one level at a time, visiting
//! candidates nearest-first. Fixing edge (u, v) fills one slot of u and one
//! of v, so their shares for that slot leave the bound. The slot still open
//! on each endpoint keeps the cheapest-edge estimate, which keeps the partial
//! bound a true lower bound. A branch is pruned as soon as
//! `bound + weight + d(u, v)` reaches the best complete tour.
//!
//! # Complexity
//!
//! O((n-1)!) worst case; pruning makes small instances (≤ ~15 nodes) fast.

use log::debug;

use crate::cancel::CancelToken;
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::{Solution, TspEngine};

/// Exact solver returning a provably optimal tour.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::exact::BranchAndBound;
/// use u_tsp::models::TspEngine;
/// use u_tsp::CancelToken;
///
/// let dm = DistanceMatrix::from_data(4, vec![
///     0.0, 10.0, 15.0, 20.0,
///     10.0, 0.0, 35.0, 25.0,
///     15.0, 35.0, 0.0, 30.0,
///     20.0, 25.0, 30.0, 0.0,
/// ]).unwrap();
///
/// let sol = BranchAndBound::new().solve(&dm, &CancelToken::new()).unwrap();
/// assert_eq!(sol.cost(), 80.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound;

impl BranchAndBound {
    /// Creates the solver.
    pub fn new() -> Self {
        Self
    }

    /// Root lower bound: half the sum of each node's two cheapest edges.
    ///
    /// Never exceeds the optimal tour cost.
    pub fn root_bound(distances: &DistanceMatrix) -> f64 {
        let (first, second) = two_cheapest_edges(distances);
        first.iter().zip(&second).map(|(a, b)| a + b).sum::<f64>() / 2.0
    }
}

impl TspEngine for BranchAndBound {
    fn name(&self) -> &'static str {
        "branch_and_bound"
    }

    fn solve(&self, distances: &DistanceMatrix, cancel: &CancelToken) -> Result<Solution> {
        let n = distances.size();
        if n < 2 {
            return Ok(Solution::new((0..n).collect(), 0.0));
        }

        let mut search = Search::new(distances, cancel);
        let root = Self::root_bound(distances);
        search.path[0] = 0;
        search.visited[0] = true;
        search.branch(root, 0.0, 1)?;

        debug!(
            "branch and bound: n={} root_bound={:.3} best={:.3} branches={} pruned={}",
            n, root, search.best_cost, search.branches, search.pruned
        );

        Ok(Solution::new(search.best_path, search.best_cost))
    }
}

/// Cheapest and second-cheapest edge per node, excluding the node itself.
///
/// With a single other node the same edge is used twice, as it is in the
/// only possible 2-node cycle.
fn two_cheapest_edges(distances: &DistanceMatrix) -> (Vec<f64>, Vec<f64>) {
    let n = distances.size();
    let mut first = vec![0.0; n];
    let mut second = vec![0.0; n];
    for i in 0..n {
        let mut a = f64::INFINITY;
        let mut b = f64::INFINITY;
        for j in (0..n).filter(|&j| j != i) {
            let d = distances.get(i, j);
            if d < a {
                b = a;
                a = d;
            } else if d < b {
                b = d;
            }
        }
        first[i] = if a.is_finite() { a } else { 0.0 };
        second[i] = if b.is_finite() { b } else { first[i] };
    }
    (first, second)
}

/// Mutable search context for one solve.
struct Search<'a> {
    distances: &'a DistanceMatrix,
    cancel: &'a CancelToken,
    neighbors: Vec<Vec<usize>>,
    first_min: Vec<f64>,
    second_min: Vec<f64>,
    visited: Vec<bool>,
    path: Vec<usize>,
    best_path: Vec<usize>,
    best_cost: f64,
    branches: u64,
    pruned: u64,
}

impl<'a> Search<'a> {
    fn new(distances: &'a DistanceMatrix, cancel: &'a CancelToken) -> Self {
        let n = distances.size();
        let (first_min, second_min) = two_cheapest_edges(distances);
        Self {
            distances,
            cancel,
            neighbors: (0..n).map(|i| distances.sorted_neighbors(i)).collect(),
            first_min,
            second_min,
            visited: vec![false; n],
            path: vec![0; n],
            best_path: Vec::new(),
            best_cost: f64::INFINITY,
            branches: 0,
            pruned: 0,
        }
    }

    /// Extends `path[..level]` by every promising next node.
    fn branch(&mut self, bound: f64, weight: f64, level: usize) -> Result<()> {
        self.cancel.check()?;
        self.branches += 1;

        let n = self.distances.size();
        let current = self.path[level - 1];

        if level == n {
            let cost = weight + self.distances.get(current, self.path[0]);
            if cost < self.best_cost {
                self.best_cost = cost;
                self.best_path = self.path.clone();
            }
            return Ok(());
        }

        // A node gives up its costlier half-share on its first fixed edge and
        // its cheapest on the second, so an open slot always keeps min1.
        let current_share = if level == 1 {
            self.second_min[current]
        } else {
            self.first_min[current]
        };

        for k in 0..self.neighbors[current].len() {
            let next = self.neighbors[current][k];
            if self.visited[next] {
                continue;
            }
            let d = self.distances.get(current, next);
            let child_bound = bound - (current_share + self.second_min[next]) / 2.0;

            if child_bound + weight + d < self.best_cost {
                self.path[level] = next;
                self.visited[next] = true;
                self.branch(child_bound, weight + d, level + 1)?;
            } else {
                self.pruned += 1;
            }

            self.visited.fill(false);
            for &node in &self.path[..level] {
                self.visited[node] = true;
            }
        }
        Ok(())
    }
}
