//! Solver engine trait.

use crate::cancel::CancelToken;
use crate::distance::DistanceMatrix;
use crate::error::Result;

use super::Solution;

/// A TSP engine that turns a distance matrix into a closed tour.
///
/// Engines are synchronous and own all of their search state for the
/// duration of one call; nothing is shared between calls. Implementations
/// poll `cancel` at their recursion or iteration boundaries.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Solution, TspEngine};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::{CancelToken, Result};
///
/// struct Identity;
///
/// impl TspEngine for Identity {
///     fn name(&self) -> &'static str { "identity" }
///     fn solve(&self, distances: &DistanceMatrix, cancel: &CancelToken) -> Result<Solution> {
///         cancel.check()?;
///         let tour: Vec<usize> = (0..distances.size()).collect();
///         let cost = distances.tour_length(&tour);
///         Ok(Solution::new(tour, cost))
///     }
/// }
///
/// let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).unwrap();
/// let sol = Identity.solve(&dm, &CancelToken::new()).unwrap();
/// assert_eq!(sol.cost(), 10.0);
/// ```
pub trait TspEngine {
    /// Short engine name used in log lines.
    fn name(&self) -> &'static str;

    /// Solves the instance described by `distances`.
    fn solve(&self, distances: &DistanceMatrix, cancel: &CancelToken) -> Result<Solution>;
}
