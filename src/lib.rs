//! # u-tsp
//!
//! Travelling salesman solvers over geographic points: an exact
//! branch-and-bound search, an ant colony metaheuristic, and multi-start
//! Lin-Kernighan local search, sharing one great-circle distance model.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (GeoNode, Solution, SolverResult, TspEngine trait)
//! - [`distance`] — Great-circle distance matrix
//! - [`exact`] — Branch-and-bound with a two-cheapest-edges bound
//! - [`aco`] — Ant colony optimization with pheromone reinforcement
//! - [`local_search`] — Lin-Kernighan sequential edge exchange
//! - [`service`] — Request validation, engine dispatch and JSON boundary
//! - [`cancel`] — Cooperative cancellation and deadlines
//! - [`random`] — Seedable generators for the stochastic engines
//! - [`error`] — Error type and result alias
//!
//! ## Example
//!
//! ```
//! use u_tsp::models::GeoNode;
//! use u_tsp::service::{run_branch_and_bound, run_lin_kernighan};
//! use u_tsp::local_search::LinKernighanConfig;
//! use u_tsp::CancelToken;
//!
//! let nodes = vec![
//!     GeoNode::new(1, 52.2297, 21.0122),
//!     GeoNode::new(2, 50.0647, 19.9450),
//!     GeoNode::new(3, 51.1079, 17.0385),
//!     GeoNode::new(4, 54.3520, 18.6466),
//! ];
//! let cancel = CancelToken::new();
//! let exact = run_branch_and_bound(&nodes, &cancel).unwrap();
//! let lk = run_lin_kernighan(&nodes, &LinKernighanConfig::default().with_seed(1), &cancel).unwrap();
//! assert!(lk.distance() >= exact.distance() - 1e-9);
//! ```

pub mod aco;
pub mod cancel;
pub mod distance;
pub mod error;
pub mod exact;
pub mod local_search;
pub mod models;
pub mod random;
pub mod service;

pub use cancel::CancelToken;
pub use error::{Result, SolveError};
