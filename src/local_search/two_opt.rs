//! 2-opt operator: reverse a contiguous run of stops.
//!
//! # Algorithm
//!
//! Reversing positions `i..=j` replaces the boundary arcs
//! `r[i-1] → r[i]` and `r[j] → r[j+1]` with `r[i-1] → r[j]` and
//! `r[i] → r[j+1]`. With asymmetric costs every arc inside the run is also
//! traversed backwards:
//!
//! ```text
//! delta = c(r[i-1], r[j]) + c(r[i], r[j+1]) - c(r[i-1], r[i]) - c(r[j], r[j+1])
//!       + backward(i..j) - forward(i..j)
//! ```
//!
//! The inner terms come from [`PrefixCosts`], so each move is O(1).
//!
//! # Complexity
//!
//! O(n²) candidate moves per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::{Move, PrefixCosts};
use crate::distance::ArcCost;
use crate::models::Route;

/// Enumerates 2-opt moves for a route with `num_stops` stops.
///
/// Runs of two stops are adjacent swaps and are left to relocate.
pub fn two_opt_moves(num_stops: usize) -> impl Iterator<Item = Move> {
    (1..=num_stops).flat_map(move |i| ((i + 2)..=num_stops).map(move |j| Move::TwoOpt { i, j }))
}

/// Cost change of reversing positions `i..=j` (`i < j`).
///
/// # Examples
///
/// ```
/// use route_engine::distance::CostMatrix;
/// use route_engine::local_search::{two_opt_delta, PrefixCosts};
/// use route_engine::models::Route;
///
/// let m = CostMatrix::from_rows(&[
///     vec![0.0, 1.0, 2.0, 3.0],
///     vec![1.0, 0.0, 1.0, 2.0],
///     vec![2.0, 1.0, 0.0, 1.0],
///     vec![3.0, 2.0, 1.0, 0.0],
/// ]).unwrap();
/// let route = Route::from_stops(&[3, 2, 1]);
/// let prefix = PrefixCosts::new(&route, &m);
/// assert_eq!(two_opt_delta(&route, &prefix, 1, 3, &m), 0.0);
/// ```
pub fn two_opt_delta<C: ArcCost + ?Sized>(
    route: &Route,
    prefix: &PrefixCosts,
    i: usize,
    j: usize,
    cost: &C,
) -> f64 {
    let (prev, first) = (route.node(i - 1), route.node(i));
    let (last, next) = (route.node(j), route.node(j + 1));

    let old_boundary = cost.arc(prev, first) + cost.arc(last, next);
    let new_boundary = cost.arc(prev, last) + cost.arc(first, next);
    let inner = prefix.backward_between(i, j) - prefix.forward_between(i, j);

    new_boundary - old_boundary + inner
}
