//! Caller-facing result shape shared by all engines.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{GeoNode, Solution};

/// Id of the node the ant colony result is rotated to start from.
const CANONICAL_START_ID: i64 = 1;

/// The response produced once at the end of a solve.
///
/// Serializes as `{ "bestPathIndexes": [..], "distance": .., "time": "<ms>" }`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tsp::models::{Solution, SolverResult};
///
/// let sol = Solution::new(vec![0, 2, 1], 30.0);
/// let result = SolverResult::from_positions(&sol, Duration::from_millis(12));
/// assert_eq!(result.best_path_indexes(), &[1, 3, 2]);
/// assert_eq!(result.time(), "12");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverResult {
    best_path_indexes: Vec<i64>,
    distance: f64,
    time: String,
}

impl SolverResult {
    /// Projects a tour as 1-based input positions (`internal index + 1`).
    pub fn from_positions(solution: &Solution, elapsed: Duration) -> Self {
        let best_path_indexes = solution.tour().iter().map(|&i| i as i64 + 1).collect();
        Self {
            best_path_indexes,
            distance: solution.cost(),
            time: elapsed_millis(elapsed),
        }
    }

    /// Projects a tour as the nodes' own ids, rotated so id `1` comes first.
    ///
    /// If no node carries id `1` the tour is emitted in the order found.
    pub fn from_node_ids(solution: &Solution, nodes: &[GeoNode], elapsed: Duration) -> Self {
        let tour = solution.tour();
        let start = tour
            .iter()
            .position(|&i| nodes[i].id() == CANONICAL_START_ID)
            .unwrap_or(0);
        let best_path_indexes = tour[start..]
            .iter()
            .chain(&tour[..start])
            .map(|&i| nodes[i].id())
            .collect();
        Self {
            best_path_indexes,
            distance: solution.cost(),
            time: elapsed_millis(elapsed),
        }
    }

    /// Node labels in visiting order.
    pub fn best_path_indexes(&self) -> &[i64] {
        &self.best_path_indexes
    }

    /// Total tour length in kilometres.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Elapsed wall time in milliseconds, as a decimal string.
    pub fn time(&self) -> &str {
        &self.time
    }
}

fn elapsed_millis(elapsed: Duration) -> String {
    elapsed.as_millis().to_string()
}
