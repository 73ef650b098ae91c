//! Engine-level solution type.

/// A closed tour over internal node indices together with its length.
///
/// Internal index `i` is the position of the node in the input list. The
/// last node connects back to the first.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Solution;
///
/// let sol = Solution::new(vec![0, 2, 1], 12.5);
/// assert_eq!(sol.len(), 3);
/// assert!(sol.is_permutation());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    tour: Vec<usize>,
    cost: f64,
}

impl Solution {
    /// Creates a solution from a tour and its cost.
    pub fn new(tour: Vec<usize>, cost: f64) -> Self {
        Self { tour, cost }
    }

    /// An empty tour with zero cost.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Internal indices in visiting order.
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Total closed-cycle length.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of nodes in the tour.
    pub fn len(&self) -> usize {
        self.tour.len()
    }

    /// Returns `true` if the tour visits no nodes.
    pub fn is_empty(&self) -> bool {
        self.tour.is_empty()
    }

    /// Returns `true` if the tour is a permutation of `0..len`.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.tour.len()];
        for &node in &self.tour {
            if node >= seen.len() || seen[node] {
                return false;
            }
            seen[node] = true;
        }
        true
    }

    /// Consumes the solution, returning the tour.
    pub fn into_tour(self) -> Vec<usize> {
        self.tour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_empty() {
        let sol = Solution::empty();
        assert!(sol.is_empty());
        assert_eq!(sol.cost(), 0.0);
        assert!(sol.is_permutation());
    }

    #[test]
    fn test_is_permutation() {
        assert!(Solution::new(vec![2, 0, 1], 0.0).is_permutation());
        assert!(!Solution::new(vec![0, 0, 1], 0.0).is_permutation());
        assert!(!Solution::new(vec![0, 3, 1], 0.0).is_permutation());
    }

    #[test]
    fn test_into_tour() {
        let sol = Solution::new(vec![1, 0], 4.0);
        assert_eq!(sol.cost(), 4.0);
        assert_eq!(sol.into_tour(), vec![1, 0]);
    }
}
