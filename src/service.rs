//! Request/response boundary over the three engines.
//!
//! Validates the node list, builds the distance matrix, times the search and
//! projects the tour into a [`SolverResult`].

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::info;
use serde::{Deserialize, Serialize};

use crate::aco::{AcoConfig, AntColony};
use crate::cancel::CancelToken;
use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::exact::BranchAndBound;
use crate::local_search::{LinKernighan, LinKernighanConfig};
use crate::models::{GeoNode, SolverResult, TspEngine};

/// Solve request: the nodes to visit.
///
/// Deserializes from `{ "nodes": [{ "nodeIndex": 1, "lat": .., "lng": .. }, ..] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmRequest {
    /// Nodes to visit; ids need not be contiguous.
    pub nodes: Vec<GeoNode>,
}

impl AlgorithmRequest {
    /// Creates a request for the given nodes.
    pub fn new(nodes: Vec<GeoNode>) -> Self {
        Self { nodes }
    }
}

/// Engine selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    /// Exact search; exponential in the worst case.
    BranchAndBound,
    /// Ant colony metaheuristic.
    AntColony,
    /// Multi-start Lin-Kernighan local search.
    LinKernighan,
}

impl Engine {
    /// All engines, in a fixed order.
    pub const ALL: [Engine; 3] = [Self::BranchAndBound, Self::AntColony, Self::LinKernighan];

    /// Snake-case name, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BranchAndBound => "branch_and_bound",
            Self::AntColony => "ant_colony",
            Self::LinKernighan => "lin_kernighan",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "branch_and_bound" | "bnb" => Ok(Self::BranchAndBound),
            "ant_colony" | "aco" => Ok(Self::AntColony),
            "lin_kernighan" | "lk" => Ok(Self::LinKernighan),
            _ => Err(SolveError::invalid_input(format!("unknown engine: {s}"))),
        }
    }
}

/// Tunables for the stochastic engines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Ant colony constants.
    pub aco: AcoConfig,
    /// Lin-Kernighan restart settings.
    pub lin_kernighan: LinKernighanConfig,
}

/// Rejects node lists no engine can solve.
pub fn validate_nodes(nodes: &[GeoNode]) -> Result<()> {
    if nodes.len() < 2 {
        return Err(SolveError::invalid_input(format!(
            "need at least 2 nodes, got {}",
            nodes.len()
        )));
    }
    if let Some(node) = nodes.iter().find(|n| !n.is_finite()) {
        return Err(SolveError::invalid_input(format!(
            "node {} has non-finite coordinates",
            node.id()
        )));
    }
    Ok(())
}

/// Solves exactly; the path lists 1-based input positions.
pub fn run_branch_and_bound(nodes: &[GeoNode], cancel: &CancelToken) -> Result<SolverResult> {
    validate_nodes(nodes)?;
    let distances = DistanceMatrix::from_nodes(nodes);
    let engine = BranchAndBound::new();
    let (solution, elapsed) = timed(|| engine.solve(&distances, cancel))?;
    let result = SolverResult::from_positions(&solution, elapsed);
    log_result(engine.name(), nodes.len(), &result);
    Ok(result)
}

/// Solves with the ant colony; the path lists node ids starting from id 1.
pub fn run_ant_colony(
    nodes: &[GeoNode],
    config: &AcoConfig,
    cancel: &CancelToken,
) -> Result<SolverResult> {
    validate_nodes(nodes)?;
    let distances = DistanceMatrix::from_nodes(nodes);
    let engine = AntColony::new(config.clone());
    let (solution, elapsed) = timed(|| engine.solve(&distances, cancel))?;
    let result = SolverResult::from_node_ids(&solution, nodes, elapsed);
    log_result(engine.name(), nodes.len(), &result);
    Ok(result)
}

/// Solves with multi-start Lin-Kernighan; the path lists 1-based input positions.
pub fn run_lin_kernighan(
    nodes: &[GeoNode],
    config: &LinKernighanConfig,
    cancel: &CancelToken,
) -> Result<SolverResult> {
    validate_nodes(nodes)?;
    let distances = DistanceMatrix::from_nodes(nodes);
    let engine = LinKernighan::new(config.clone());
    let (solution, elapsed) = timed(|| engine.solve(&distances, cancel))?;
    let result = SolverResult::from_positions(&solution, elapsed);
    log_result(engine.name(), nodes.len(), &result);
    Ok(result)
}

/// Dispatches a request to the selected engine.
pub fn solve(
    engine: Engine,
    request: &AlgorithmRequest,
    config: &SolverConfig,
    cancel: &CancelToken,
) -> Result<SolverResult> {
    match engine {
        Engine::BranchAndBound => run_branch_and_bound(&request.nodes, cancel),
        Engine::AntColony => run_ant_colony(&request.nodes, &config.aco, cancel),
        Engine::LinKernighan => run_lin_kernighan(&request.nodes, &config.lin_kernighan, cancel),
    }
}

/// JSON in, JSON out. The solve runs without a cancellation deadline.
///
/// # Examples
///
/// ```
/// use u_tsp::service::{solve_json, Engine, SolverConfig};
///
/// let request = r#"{"nodes": [
///     {"nodeIndex": 1, "lat": 52.2297, "lng": 21.0122},
///     {"nodeIndex": 2, "lat": 50.0647, "lng": 19.9450},
///     {"nodeIndex": 3, "lat": 51.1079, "lng": 17.0385}
/// ]}"#;
/// let response = solve_json(Engine::BranchAndBound, request, &SolverConfig::default()).unwrap();
/// assert!(response.contains("\"bestPathIndexes\":[1,"));
/// ```
pub fn solve_json(engine: Engine, request: &str, config: &SolverConfig) -> Result<String> {
    let request: AlgorithmRequest = serde_json::from_str(request)?;
    let result = solve(engine, &request, config, &CancelToken::new())?;
    Ok(serde_json::to_string(&result)?)
}

/// Runs `search` and measures only its wall time.
fn timed<T>(search: impl FnOnce() -> Result<T>) -> Result<(T, Duration)> {
    let start = Instant::now();
    let value = search()?;
    Ok((value, start.elapsed()))
}

fn log_result(engine: &str, n: usize, result: &SolverResult) {
    info!(
        "{engine}: n={n} distance={:.3} km time={} ms",
        result.distance(),
        result.time()
    );
}
