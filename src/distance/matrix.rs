//! Dense cost matrix.

use crate::models::Location;

/// Cost of traversing the directed arc `from → to`.
///
/// Implemented by [`CostMatrix`] for raw travel costs and by the guided
/// local search for penalized costs, so move evaluation is written once.
pub trait ArcCost {
    /// Cost of the arc from location `from` to location `to`.
    fn arc(&self, from: usize, to: usize) -> f64;
}

/// A dense n×n cost matrix stored in row-major order.
///
/// Used for both distances (meters) and durations (seconds). Matrices need
/// not be symmetric.
///
/// # Examples
///
/// ```
/// use route_engine::distance::CostMatrix;
///
/// let m = CostMatrix::from_rows(&[vec![0.0, 5.0], vec![7.0, 0.0]]).unwrap();
/// assert_eq!(m.get(0, 1), 5.0);
/// assert_eq!(m.get(1, 0), 7.0);
/// assert_eq!(m.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a cost matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit row-major grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a matrix from nested rows.
    ///
    /// Returns `None` unless every row has as many entries as there are rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.iter().flatten().copied().collect(),
            size,
        })
    }

    /// Computes a matrix by applying `cost` to every ordered pair of locations.
    pub fn from_locations<F>(locations: &[Location], cost: F) -> Self
    where
        F: Fn(&Location, &Location) -> f64,
    {
        let n = locations.len();
        let mut m = Self::new(n);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    m.set(i, j, cost(&locations[i], &locations[j]));
                }
            }
        }
        m
    }

    /// Returns the cost from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the first entry that is negative or non-finite, as
    /// `(from, to, value)`.
    pub fn find_invalid(&self) -> Option<(usize, usize, f64)> {
        self.data
            .iter()
            .position(|v| !v.is_finite() || *v < 0.0)
            .map(|idx| (idx / self.size, idx % self.size, self.data[idx]))
    }

    /// Nested-row view of the matrix.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size.max(1)).map(<[f64]>::to_vec).collect()
    }
}

impl ArcCost for CostMatrix {
    fn arc(&self, from: usize, to: usize) -> f64 {
        self.get(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let m = CostMatrix::from_rows(&[
            vec![0.0, 1.0, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ])
        .expect("square");
        assert_eq!(m.size(), 3);
        assert_eq!(m.get(1, 2), 4.0);
        assert_eq!(m.get(2, 0), 5.0);
    }

    #[test]
    fn test_from_rows_not_square() {
        assert!(CostMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]).is_none());
        assert!(CostMatrix::from_rows(&[vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 2.0]]).is_none());
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(CostMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
        assert!(CostMatrix::from_data(2, vec![0.0, 1.0, 1.0, 0.0]).is_some());
    }

    #[test]
    fn test_from_locations() {
        let locs = vec![Location::new(0.0, 0.0), Location::new(0.0, 1.0)];
        let m = CostMatrix::from_locations(&locs, |a, b| a.distance_to(b));
        assert_eq!(m.get(0, 0), 0.0);
        assert!(m.get(0, 1) > 100_000.0);
        assert!((m.get(0, 1) - m.get(1, 0)).abs() < 1e-6);
    }

    #[test]
    fn test_find_invalid() {
        let mut m = CostMatrix::new(3);
        assert!(m.find_invalid().is_none());
        m.set(2, 1, -1.0);
        assert_eq!(m.find_invalid(), Some((2, 1, -1.0)));
        m.set(0, 2, f64::NAN);
        let (from, to, _) = m.find_invalid().expect("nan found first");
        assert_eq!((from, to), (0, 2));
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut m = CostMatrix::new(2);
        m.set(0, 1, 10.0);
        m.set(1, 0, 15.0);
        assert_eq!(m.arc(0, 1), 10.0);
        assert_eq!(m.arc(1, 0), 15.0);
    }

    #[test]
    fn test_to_rows() {
        let rows = vec![vec![0.0, 2.0], vec![3.0, 0.0]];
        let m = CostMatrix::from_rows(&rows).expect("square");
        assert_eq!(m.to_rows(), rows);
    }
}
