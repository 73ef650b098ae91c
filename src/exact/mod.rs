//! Exact solvers.
//!
//! - [`BranchAndBound`] — Depth-first search with a two-cheapest-edges lower bound

mod branch_and_bound;

pub use branch_and_bound::BranchAndBound;
