//! Relocate operator: move a single stop to another position.
//!
//! # Algorithm
//!
//! Removes the stop at position `from` and reinserts it so that it ends up at
//! position `to`. The cost change touches at most six arcs and is computed in
//! O(1), including for asymmetric costs.
//!
//! # Complexity
//!
//! O(n²) candidate moves per pass.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::Move;
use crate::distance::ArcCost;
use crate::models::Route;

/// Enumerates relocate moves for a route with `num_stops` stops.
///
/// Moving a stop one position back is the same as moving its predecessor one
/// position forward, so only the latter is generated.
pub fn relocate_moves(num_stops: usize) -> impl Iterator<Item = Move> {
    (1..=num_stops).flat_map(move |from| {
        (1..=num_stops)
            .filter(move |&to| to != from && to + 1 != from)
            .map(move |to| Move::Relocate { from, to })
    })
}

/// Cost of removing the stop at `pos`.
///
/// Old: `prev → stop → next`; new: `prev → next`.
pub(crate) fn removal_cost<C: ArcCost + ?Sized>(route: &Route, pos: usize, cost: &C) -> f64 {
    let (prev, node, next) = (route.node(pos - 1), route.node(pos), route.node(pos + 1));
    cost.arc(prev, next) - cost.arc(prev, node) - cost.arc(node, next)
}

/// Cost of inserting `node` between the nodes at positions `before` and `before + 1`.
pub(crate) fn insertion_cost<C: ArcCost + ?Sized>(
    route: &Route,
    before: usize,
    node: usize,
    cost: &C,
) -> f64 {
    let (prev, next) = (route.node(before), route.node(before + 1));
    cost.arc(prev, node) + cost.arc(node, next) - cost.arc(prev, next)
}

/// Cost change of relocating the stop at `from` to end up at `to`.
///
/// # Examples
///
/// ```
/// use route_engine::distance::CostMatrix;
/// use route_engine::local_search::relocate_delta;
/// use route_engine::models::Route;
///
/// let m = CostMatrix::from_rows(&[
///     vec![0.0, 1.0, 2.0, 3.0],
///     vec![1.0, 0.0, 1.0, 2.0],
///     vec![2.0, 1.0, 0.0, 1.0],
///     vec![3.0, 2.0, 1.0, 0.0],
/// ]).unwrap();
/// let route = Route::from_stops(&[3, 1, 2]);
/// // Moving stop 3 to the end yields 0-1-2-3-0.
/// let delta = relocate_delta(&route, 1, 3, &m);
/// assert_eq!(route.cost(&m) + delta, 6.0);
/// ```
pub fn relocate_delta<C: ArcCost + ?Sized>(route: &Route, from: usize, to: usize, cost: &C) -> f64 {
    let node = route.node(from);
    let removal = removal_cost(route, from, cost);
    // After removal, positions past `from` shift down by one.
    let insertion = if from < to {
        insertion_cost(route, to, node, cost)
    } else {
        insertion_cost(route, to - 1, node, cost)
    };
    removal + insertion
}
