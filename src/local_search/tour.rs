//! Array tour with an edge set and position index.

use rand::Rng;

use crate::distance::DistanceMatrix;

use super::edge::{Edge, EdgeSet};

/// A Hamiltonian cycle stored as a permutation, its edge set, and its cost.
///
/// `position[v]` is the index of node `v` in `nodes`, so predecessor and
/// successor lookups are O(1). Every mutation rebuilds positions, edges and
/// cost together, so the three always describe the same cycle.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::{Edge, Tour};
///
/// let dm = DistanceMatrix::from_data(4, vec![
///     0.0, 1.0, 2.0, 1.0,
///     1.0, 0.0, 1.0, 2.0,
///     2.0, 1.0, 0.0, 1.0,
///     1.0, 2.0, 1.0, 0.0,
/// ]).unwrap();
/// let tour = Tour::new(vec![0, 1, 2, 3], &dm);
/// assert_eq!(tour.cost(), 4.0);
/// assert_eq!(tour.around(0), (3, 1));
/// assert!(tour.contains(&Edge::new(3, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct Tour {
    nodes: Vec<usize>,
    position: Vec<usize>,
    edges: EdgeSet,
    cost: f64,
}

impl Tour {
    /// Creates a tour from a permutation of `0..nodes.len()`.
    pub fn new(nodes: Vec<usize>, distances: &DistanceMatrix) -> Self {
        let mut tour = Self {
            nodes: Vec::new(),
            position: Vec::new(),
            edges: EdgeSet::new(),
            cost: 0.0,
        };
        tour.replace(nodes, distances);
        tour
    }

    /// The tour `0, 1, …, n-1`.
    pub fn identity(n: usize, distances: &DistanceMatrix) -> Self {
        Self::new((0..n).collect(), distances)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tour has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in visiting order.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Closed-cycle length.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Node at tour position `index`.
    pub fn at(&self, index: usize) -> usize {
        self.nodes[index]
    }

    /// Tour position of `node`.
    pub fn index_of(&self, node: usize) -> usize {
        self.position[node]
    }

    /// Predecessor and successor of `node`.
    pub fn around(&self, node: usize) -> (usize, usize) {
        let n = self.nodes.len();
        let i = self.position[node];
        (self.nodes[(i + n - 1) % n], self.nodes[(i + 1) % n])
    }

    /// Returns `true` if the edge is part of the cycle.
    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// The cycle's edges.
    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    /// Replaces the permutation, rebuilding positions, edges and cost.
    pub fn replace(&mut self, nodes: Vec<usize>, distances: &DistanceMatrix) {
        let n = nodes.len();
        let mut position = vec![0; n];
        for (i, &v) in nodes.iter().enumerate() {
            position[v] = i;
        }
        let edges = (0..n)
            .map(|i| Edge::new(nodes[i], nodes[(i + 1) % n]))
            .collect();
        self.cost = distances.tour_length(&nodes);
        self.nodes = nodes;
        self.position = position;
        self.edges = edges;
    }

    /// Randomly permutes the tour (Fisher-Yates) and re-costs it.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R, distances: &DistanceMatrix) {
        let mut perm = std::mem::take(&mut self.nodes);
        for i in (1..perm.len()).rev() {
            let j = rng.random_range(0..=i);
            perm.swap(i, j);
        }
        self.replace(perm, distances);
    }

    /// Rebuilds the cycle from `(edges − broken) ∪ joined`.
    ///
    /// Returns the new permutation, or `None` if the edge set is not a
    /// single Hamiltonian cycle (wrong edge count, a node without exactly
    /// two edges, or several disjoint cycles). The walk starts at this
    /// tour's first node and takes its current successor first when that
    /// edge survives, so empty `broken`/`joined` sets return the current
    /// permutation unchanged.
    pub fn generate(&self, broken: &EdgeSet, joined: &EdgeSet) -> Option<Vec<usize>> {
        let n = self.nodes.len();
        if n < 3 {
            return None;
        }

        let mut candidate: EdgeSet = self.edges.difference(broken).copied().collect();
        candidate.extend(joined.iter().copied());
        if candidate.len() != n {
            return None;
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::with_capacity(2); n];
        for edge in &candidate {
            let (a, b) = edge.endpoints();
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        if adjacency.iter().any(|adj| adj.len() != 2) {
            return None;
        }

        let start = self.nodes[0];
        let successor = self.nodes[1];
        let first = if adjacency[start].contains(&successor) {
            successor
        } else {
            adjacency[start][0]
        };

        let mut visited = vec![false; n];
        let mut path = Vec::with_capacity(n);
        visited[start] = true;
        path.push(start);
        let mut next = Some(first);
        while let Some(node) = next {
            visited[node] = true;
            path.push(node);
            next = adjacency[node].iter().copied().find(|&v| !visited[v]);
        }

        (path.len() == n).then_some(path)
    }

    /// Canonical key of this tour; see [`Tour::key_of`].
    pub fn key(&self) -> String {
        Self::key_of(&self.nodes)
    }

    /// Canonical string key of a cycle: rotated to start at node 0 and
    /// oriented so the smaller of its two neighbors comes second.
    ///
    /// Every rotation and reflection of the same cycle shares one key.
    pub fn key_of(nodes: &[usize]) -> String {
        let n = nodes.len();
        let Some(zero) = nodes.iter().position(|&v| v == 0) else {
            return String::new();
        };
        let mut rotated: Vec<usize> = nodes[zero..]
            .iter()
            .chain(&nodes[..zero])
            .copied()
            .collect();
        if n > 2 && rotated[n - 1] < rotated[1] {
            rotated[1..].reverse();
        }
        rotated
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
