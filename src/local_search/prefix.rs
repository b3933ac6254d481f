//! Prefix sums of arc costs along a route.

use crate::distance::ArcCost;
use crate::models::Route;

/// Cumulative arc costs along a route, in both traversal directions.
///
/// `forward[k]` is the cost of `route[0] → … → route[k]`; `backward[k]` is
/// the cost of the same arcs traversed in reverse. With asymmetric costs the
/// two differ, and their difference prices a segment reversal in O(1).
#[derive(Debug, Clone, Default)]
pub struct PrefixCosts {
    forward: Vec<f64>,
    backward: Vec<f64>,
}

impl PrefixCosts {
    /// Computes prefix sums for the whole route.
    pub fn new<C: ArcCost + ?Sized>(route: &Route, cost: &C) -> Self {
        let mut prefix = Self {
            forward: vec![0.0; route.len()],
            backward: vec![0.0; route.len()],
        };
        prefix.rebuild_from(route, cost, 0);
        prefix
    }

    /// Recomputes entries from position `from` on; entries before it are kept.
    pub fn rebuild_from<C: ArcCost + ?Sized>(&mut self, route: &Route, cost: &C, from: usize) {
        let n = route.len();
        self.forward.resize(n, 0.0);
        self.backward.resize(n, 0.0);
        self.forward[0] = 0.0;
        self.backward[0] = 0.0;
        for k in from.max(1)..n {
            let (a, b) = (route.node(k - 1), route.node(k));
            self.forward[k] = self.forward[k - 1] + cost.arc(a, b);
            self.backward[k] = self.backward[k - 1] + cost.arc(b, a);
        }
    }

    /// Cost of the arcs between positions `i` and `j` (`i <= j`), forward.
    pub fn forward_between(&self, i: usize, j: usize) -> f64 {
        self.forward[j] - self.forward[i]
    }

    /// Cost of the arcs between positions `i` and `j` (`i <= j`), reversed.
    pub fn backward_between(&self, i: usize, j: usize) -> f64 {
        self.backward[j] - self.backward[i]
    }

    /// Total route cost.
    pub fn total(&self) -> f64 {
        self.forward.last().copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;

    fn asymmetric() -> CostMatrix {
        CostMatrix::from_rows(&[
            vec![0.0, 1.0, 2.0, 3.0],
            vec![10.0, 0.0, 4.0, 5.0],
            vec![20.0, 40.0, 0.0, 6.0],
            vec![30.0, 50.0, 60.0, 0.0],
        ])
        .expect("square")
    }

    #[test]
    fn test_totals() {
        let m = asymmetric();
        let route = Route::from_stops(&[1, 2, 3]);
        let p = PrefixCosts::new(&route, &m);
        assert_eq!(p.total(), route.cost(&m));
        assert_eq!(p.forward_between(1, 3), 4.0 + 6.0);
        assert_eq!(p.backward_between(1, 3), 40.0 + 60.0);
    }

    #[test]
    fn test_rebuild_from_suffix() {
        let m = asymmetric();
        let mut route = Route::from_stops(&[1, 2, 3]);
        let mut p = PrefixCosts::new(&route, &m);
        route.swap(2, 3);
        p.rebuild_from(&route, &m, 1);
        let fresh = PrefixCosts::new(&route, &m);
        assert_eq!(p.total(), fresh.total());
        assert_eq!(p.backward_between(0, 4), fresh.backward_between(0, 4));
    }
}
