//! Cheapest feasible insertion.
//!
//! # Algorithm
//!
//! Starting from the empty route `[depot, depot]`, repeatedly evaluates every
//! (unrouted stop, position) pair and inserts the one with the smallest
//! distance increase
//!
//! ```text
//! c(prev, u) + c(u, next) - c(prev, next)
//! ```
//!
//! among those that keep the partial route feasible. Ties go to the lowest
//! stop index, then the lowest position.
//!
//! # Complexity
//!
//! O(n³) insertion candidates overall, each checked incrementally against
//! the resource trace.

use tracing::{debug, instrument};

use crate::error::{InfeasibleProblem, Resource};
use crate::evaluation::{ConstraintModel, ResourceTrace};
use crate::local_search::{Move, IMPROVEMENT_EPS};
use crate::models::Route;

/// Builds a feasible route visiting every stop, or reports the first stop
/// that cannot be placed.
///
/// # Examples
///
/// ```
/// use route_engine::constructive::cheapest_insertion;
/// use route_engine::evaluation::ConstraintModel;
/// use route_engine::models::{Location, ProblemBuilder, StopInput};
///
/// let stops = vec![StopInput::new("A", 1, 0.0, 0.0), StopInput::new("B", 1, 0.0, 0.0)];
/// let m = vec![
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 10.0],
///     vec![10.0, 30.0, 0.0],
/// ];
/// let problem = ProblemBuilder::new()
///     .build(Location::new(0.0, 0.0), &stops, &m, &m, 10, 60)
///     .unwrap();
///
/// let route = cheapest_insertion(&ConstraintModel::new(&problem)).unwrap();
/// assert_eq!(route.nodes(), &[0, 1, 2, 0]);
/// ```
#[instrument(skip_all, fields(stops = model.problem().num_stops()))]
pub fn cheapest_insertion(model: &ConstraintModel<'_>) -> Result<Route, InfeasibleProblem> {
    let problem = model.problem();
    let mut route = Route::new();
    let mut trace = ResourceTrace::new(model, &route);
    let mut unrouted: Vec<usize> = (1..problem.num_nodes()).collect();

    while !unrouted.is_empty() {
        let mut best: Option<(usize, usize, f64)> = None; // (unrouted slot, position, delta)

        for (slot, &node) in unrouted.iter().enumerate() {
            for pos in 1..route.len() {
                let (prev, next) = (route.node(pos - 1), route.node(pos));
                let delta = problem.distance(prev, node) + problem.distance(node, next)
                    - problem.distance(prev, next);
                if best.is_some_and(|(_, _, d)| delta >= d - IMPROVEMENT_EPS) {
                    continue;
                }
                if model.delta_feasible(&route, &trace, &Move::Insert { node, pos }) {
                    best = Some((slot, pos, delta));
                }
            }
        }

        match best {
            Some((slot, pos, _)) => {
                let node = unrouted.remove(slot);
                route.insert(pos, node);
                trace.rebuild_from(model, &route, pos);
            }
            None => {
                let node = unrouted[0];
                let resource = blocking_resource(model, &route, &trace, node);
                let stop_id = problem.node(node).id().to_string();
                debug!(stop = %stop_id, %resource, unplaced = unrouted.len(), "insertion failed");
                return Err(InfeasibleProblem {
                    stop_id,
                    resource,
                    unplaced: unrouted.len(),
                });
            }
        }
    }

    Ok(route)
}

/// Resource that prevents placing `node` anywhere in `route`.
///
/// Load is position-independent and reported first; otherwise the violation
/// at the cheapest position is reported.
fn blocking_resource(
    model: &ConstraintModel<'_>,
    route: &Route,
    trace: &ResourceTrace,
    node: usize,
) -> Resource {
    let problem = model.problem();
    let last = route.len() - 1;
    if trace.load(last) + i64::from(problem.demand(node)) > i64::from(problem.capacity()) {
        return Resource::Load;
    }
    let mut cheapest: Option<(usize, f64)> = None;
    for pos in 1..route.len() {
        let (prev, next) = (route.node(pos - 1), route.node(pos));
        let delta =
            problem.distance(prev, node) + problem.distance(node, next) - problem.distance(prev, next);
        if cheapest.is_none_or(|(_, d)| delta < d - IMPROVEMENT_EPS) {
            cheapest = Some((pos, delta));
        }
    }
    cheapest
        .and_then(|(pos, _)| model.delta_violation(route, trace, &Move::Insert { node, pos }))
        .unwrap_or(Resource::Duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, Problem, ProblemBuilder, StopInput};

    fn build(demands: &[i32], rows: &[Vec<f64>], capacity: i32, max_minutes: i32) -> Problem {
        let stops: Vec<StopInput> = demands
            .iter()
            .enumerate()
            .map(|(i, &d)| StopInput::new(format!("S{}", i + 1), d, 0.0, 0.0))
            .collect();
        ProblemBuilder::new()
            .build(Location::new(0.0, 0.0), &stops, rows, rows, capacity, max_minutes)
            .expect("valid")
    }

    fn uniform(n: usize, value: f64) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| (0..n).map(|j| if i == j { 0.0 } else { value }).collect())
            .collect()
    }

    #[test]
    fn test_single_stop() {
        let p = build(&[3], &uniform(2, 100.0), 10, 60);
        let route = cheapest_insertion(&ConstraintModel::new(&p)).expect("feasible");
        assert_eq!(route.nodes(), &[0, 1, 0]);
    }

    #[test]
    fn test_ties_prefer_lowest_index_then_position() {
        // All arcs equal: every insertion costs the same.
        let p = build(&[1, 1, 1], &uniform(4, 100.0), 10, 480);
        let route = cheapest_insertion(&ConstraintModel::new(&p)).expect("feasible");
        // Stop 1 first; then stop 2 at position 1; then stop 3 at position 1.
        assert_eq!(route.nodes(), &[0, 3, 2, 1, 0]);
    }

    #[test]
    fn test_prefers_cheapest_increment() {
        // Stops on a line at 1, 2, 3 km.
        let pos = [0.0, 3000.0, 1000.0, 2000.0];
        let rows: Vec<Vec<f64>> = pos
            .iter()
            .map(|a| pos.iter().map(|b| f64::abs(a - b)).collect())
            .collect();
        let p = build(&[1, 1, 1], &rows, 10, 480);
        let model = ConstraintModel::new(&p);
        let route = cheapest_insertion(&model).expect("feasible");
        assert_eq!(route.cost(p.distances()), 6000.0);
        assert!(model.is_feasible(&route));
        assert!(route.is_tour_of(4));
    }

    #[test]
    fn test_capacity_infeasible() {
        let p = build(&[10, 10, 10], &uniform(4, 100.0), 15, 480);
        let err = cheapest_insertion(&ConstraintModel::new(&p)).expect_err("infeasible");
        assert_eq!(err.resource, Resource::Load);
        assert_eq!(err.stop_id, "S2");
        assert_eq!(err.unplaced, 2);
    }

    #[test]
    fn test_duration_infeasible() {
        // Each arc takes 10 minutes; a 30 minute ceiling fits two stops.
        let p = build(&[1, 1, 1], &uniform(4, 600.0), 10, 30);
        let err = cheapest_insertion(&ConstraintModel::new(&p)).expect_err("infeasible");
        assert_eq!(err.resource, Resource::Duration);
        assert_eq!(err.unplaced, 1);
        assert_eq!(err.stop_id, "S3");
    }

    #[test]
    fn test_single_stop_over_duration() {
        let p = build(&[1], &uniform(2, 3600.0), 10, 60);
        let err = cheapest_insertion(&ConstraintModel::new(&p)).expect_err("infeasible");
        assert_eq!(err.stop_id, "S1");
        assert_eq!(err.resource, Resource::Duration);
    }

    #[test]
    fn test_time_window_blocks_late_stop() {
        let rows = uniform(3, 600.0);
        let stops = vec![
            StopInput::new("A", 1, 0.0, 0.0),
            StopInput::new("B", 1, 0.0, 0.0).with_time_window(0.0, 5.0),
        ];
        let p = ProblemBuilder::new()
            .build(Location::new(0.0, 0.0), &stops, &rows, &rows, 10, 480)
            .expect("valid");
        let model = ConstraintModel::new(&p).with_time_windows(true);
        let err = cheapest_insertion(&model).expect_err("B is unreachable by minute 5");
        assert_eq!(err.stop_id, "B");
        assert_eq!(err.resource, Resource::TimeWindow);

        // Ignored when not enforced.
        assert!(cheapest_insertion(&ConstraintModel::new(&p)).is_ok());
    }
}
