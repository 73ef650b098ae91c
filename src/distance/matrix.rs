//! Dense distance matrix.

use crate::models::GeoNode;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once per solve from the input node list; row/column `i` is the node
/// at input position `i`. Supports both great-circle computation from node
/// coordinates and explicit distance specification.
///
/// # Examples
///
/// ```
/// use u_tsp::models::GeoNode;
/// use u_tsp::distance::DistanceMatrix;
///
/// let nodes = vec![
///     GeoNode::new(1, 0.0, 0.0),
///     GeoNode::new(2, 1.0, 0.0),
///     GeoNode::new(3, 1.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 111.1896).abs() < 1e-3);
/// assert_eq!(dm.get(2, 2), 0.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a great-circle distance matrix from node coordinates.
    pub fn from_nodes(nodes: &[GeoNode]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns every other location sorted by ascending distance from `from`.
    ///
    /// Ties keep index order, so the result is deterministic. `from` itself is
    /// never included, even when another location sits at distance zero.
    pub fn sorted_neighbors(&self, from: usize) -> Vec<usize> {
        let mut others: Vec<usize> = (0..self.size).filter(|&j| j != from).collect();
        others.sort_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)));
        others
    }

    /// Length of the closed cycle visiting `tour` in order and returning to
    /// its first element.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }
        let closing = self.get(tour[tour.len() - 1], tour[0]);
        tour.windows(2)
            .map(|w| self.get(w[0], w[1]))
            .sum::<f64>()
            + closing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> Vec<GeoNode> {
        vec![
            GeoNode::new(1, 0.0, 0.0),
            GeoNode::new(2, 1.0, 0.0),
            GeoNode::new(3, 0.0, 2.0),
        ]
    }

    #[test]
    fn test_from_nodes() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 111.189_577).abs() < 1e-3);
        assert!((dm.get(0, 2) - 2.0 * 111.189_577).abs() < 1e-3);
        for i in 0..3 {
            assert_eq!(dm.get(i, i), 0.0);
        }
    }

    #[test]
    fn test_symmetric_non_negative() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        assert!(dm.is_symmetric(1e-10));
        for i in 0..3 {
            for j in 0..3 {
                assert!(dm.get(i, j) >= 0.0);
            }
        }
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_sorted_neighbors() {
        #[rustfmt::skip]
        let dm = DistanceMatrix::from_data(4, vec![
            0.0, 3.0, 1.0, 2.0,
            3.0, 0.0, 4.0, 4.0,
            1.0, 4.0, 0.0, 5.0,
            2.0, 4.0, 5.0, 0.0,
        ]).expect("valid");
        assert_eq!(dm.sorted_neighbors(0), vec![2, 3, 1]);
        // tie between 2 and 3 keeps index order
        assert_eq!(dm.sorted_neighbors(1), vec![0, 2, 3]);
    }

    #[test]
    fn test_sorted_neighbors_excludes_self_with_zero_distance_twin() {
        let nodes = vec![
            GeoNode::new(1, 10.0, 10.0),
            GeoNode::new(2, 10.0, 10.0),
            GeoNode::new(3, 11.0, 10.0),
        ];
        let dm = DistanceMatrix::from_nodes(&nodes);
        assert_eq!(dm.sorted_neighbors(0), vec![1, 2]);
    }

    #[test]
    fn test_tour_length() {
        let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 2.0, 1.0, 0.0, 3.0, 2.0, 3.0, 0.0])
            .expect("valid");
        assert_eq!(dm.tour_length(&[0, 1, 2]), 6.0);
        assert_eq!(dm.tour_length(&[2, 1, 0]), 6.0);
        assert_eq!(dm.tour_length(&[0]), 0.0);
        assert_eq!(dm.tour_length(&[0, 1]), 2.0);
    }
}
