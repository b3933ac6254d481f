//! Swap operator: exchange the positions of two stops.
//!
//! # Algorithm
//!
//! For positions `i < j`, the stops at `i` and `j` trade places. Four arcs
//! change (three when the stops are adjacent); the delta is O(1).
//!
//! # Complexity
//!
//! O(n²) candidate moves per pass.

use super::Move;
use crate::distance::ArcCost;
use crate::models::Route;

/// Enumerates swap moves for a route with `num_stops` stops.
///
/// Adjacent swaps are already produced by the relocate operator and are
/// skipped here.
pub fn swap_moves(num_stops: usize) -> impl Iterator<Item = Move> {
    (1..=num_stops).flat_map(move |i| ((i + 2)..=num_stops).map(move |j| Move::Swap { i, j }))
}

/// Cost change of exchanging the stops at positions `i < j`.
pub fn swap_delta<C: ArcCost + ?Sized>(route: &Route, i: usize, j: usize, cost: &C) -> f64 {
    let (a_prev, a, a_next) = (route.node(i - 1), route.node(i), route.node(i + 1));
    let (b_prev, b, b_next) = (route.node(j - 1), route.node(j), route.node(j + 1));

    if j == i + 1 {
        // a_prev → a → b → b_next  becomes  a_prev → b → a → b_next
        let old = cost.arc(a_prev, a) + cost.arc(a, b) + cost.arc(b, b_next);
        let new = cost.arc(a_prev, b) + cost.arc(b, a) + cost.arc(a, b_next);
        return new - old;
    }

    let old = cost.arc(a_prev, a) + cost.arc(a, a_next) + cost.arc(b_prev, b) + cost.arc(b, b_next);
    let new = cost.arc(a_prev, b) + cost.arc(b, a_next) + cost.arc(b_prev, a) + cost.arc(a, b_next);
    new - old
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;

    fn asymmetric(n: usize) -> CostMatrix {
        let mut m = CostMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    m.set(i, j, ((i * 11 + j * 5) % 19 + 2) as f64);
                }
            }
        }
        m
    }

    #[test]
    fn test_delta_matches_recomputed_cost() {
        let m = asymmetric(7);
        let route = Route::from_stops(&[4, 2, 6, 1, 5, 3]);
        let base = route.cost(&m);
        for i in 1..=6 {
            for j in (i + 1)..=6 {
                let mut swapped = route.clone();
                swapped.swap(i, j);
                let delta = swap_delta(&route, i, j, &m);
                assert!((base + delta - swapped.cost(&m)).abs() < 1e-9, "swap {i} {j}");
            }
        }
    }

    #[test]
    fn test_moves() {
        let moves: Vec<Move> = swap_moves(4).collect();
        assert_eq!(
            moves,
            vec![
                Move::Swap { i: 1, j: 3 },
                Move::Swap { i: 1, j: 4 },
                Move::Swap { i: 2, j: 4 },
            ]
        );
        assert_eq!(swap_moves(2).count(), 0);
    }
}
