//! Domain model types for geographic TSP.
//!
//! Provides the core abstractions: nodes with geographic coordinates, the
//! engine-level tour solution, the caller-facing result projection, and the
//! engine trait that ties them together.

mod engine;
mod geo_node;
mod result;
mod solution;

pub use engine::TspEngine;
pub use geo_node::GeoNode;
pub use result::SolverResult;
pub use solution::Solution;
