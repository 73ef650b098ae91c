//! Lin-Kernighan local search.
//!
//! - [`Edge`] / [`EdgeSet`] — Undirected tour edges
//! - [`Tour`] — Permutation with position index, edge set and cached length
//! - [`LinKernighanOptimizer`] — Sequential edge exchange on one tour
//! - [`LinKernighan`] — Multi-start engine over shuffled tours

mod config;
mod edge;
mod lin_kernighan;
mod tour;

pub use config::LinKernighanConfig;
pub use edge::{Edge, EdgeSet};
pub use lin_kernighan::{LinKernighan, LinKernighanOptimizer};
pub use tour::Tour;
