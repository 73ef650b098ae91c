//! Undirected tour edges.

use std::collections::HashSet;

/// An undirected edge stored as `(min, max)`.
///
/// # Examples
///
/// ```
/// use u_tsp::local_search::Edge;
///
/// assert_eq!(Edge::new(4, 1), Edge::new(1, 4));
/// assert_eq!(Edge::new(4, 1).endpoints(), (1, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(usize, usize);

/// A set of undirected edges.
pub type EdgeSet = HashSet<Edge>;

impl Edge {
    /// Creates the edge between `a` and `b`.
    pub fn new(a: usize, b: usize) -> Self {
        if a < b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// Both endpoints, smaller first.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.0, self.1)
    }

    /// Returns `true` if `node` is one of the endpoints.
    pub fn touches(&self, node: usize) -> bool {
        self.0 == node || self.1 == node
    }
}
