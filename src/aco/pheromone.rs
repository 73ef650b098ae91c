//! Pheromone trail matrix.

/// A dense symmetric n×n pheromone matrix stored in row-major order.
///
/// Entries start at τ₀ and only ever change through [`deposit`](Self::deposit)
/// (adds a positive amount to both `[i][j]` and `[j][i]`) and
/// [`evaporate`](Self::evaporate) (scales every entry by `1 - ρ`), so they stay
/// non-negative and symmetric.
///
/// # Examples
///
/// ```
/// use u_tsp::aco::PheromoneMatrix;
///
/// let mut p = PheromoneMatrix::new(3, 1.0);
/// p.deposit(0, 2, 0.5);
/// p.evaporate(0.1);
/// assert!((p.get(2, 0) - 1.35).abs() < 1e-12);
/// assert!((p.get(0, 1) - 0.9).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates a matrix with every entry set to `initial`.
    pub fn new(size: usize, initial: f64) -> Self {
        Self {
            data: vec![initial; size * size],
            size,
        }
    }

    /// Pheromone on the edge between `from` and `to`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Adds `delta` to both directions of the edge.
    pub fn deposit(&mut self, a: usize, b: usize, delta: f64) {
        self.data[a * self.size + b] += delta;
        self.data[b * self.size + a] += delta;
    }

    /// Multiplies every entry by `1 - rho`.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        for value in &mut self.data {
            *value *= keep;
        }
    }

    /// Smallest entry; used to check the non-negativity invariant.
    pub fn min_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }
}
