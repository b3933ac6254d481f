//! Local search over a single route.
//!
//! - [`relocate`](relocate_moves) — move one stop to another position
//! - [`swap`](swap_moves) — exchange two stops
//! - [`two_opt`](two_opt_moves) — reverse a run of stops
//!
//! All operators are expressed as [`Move`] values so that cost deltas and
//! feasibility checks are computed without materializing candidate routes.

mod exchange;
mod moves;
mod prefix;
mod relocate;
mod two_opt;

pub use exchange::{swap_delta, swap_moves};
pub use moves::Move;
pub use prefix::PrefixCosts;
pub use relocate::{relocate_delta, relocate_moves};
pub use two_opt::{two_opt_delta, two_opt_moves};

use crate::distance::ArcCost;
use crate::evaluation::{ConstraintModel, ResourceTrace};
use crate::models::Route;

/// Deltas above this are not counted as improvements.
pub const IMPROVEMENT_EPS: f64 = 1e-7;

/// All candidate moves, in a fixed order: relocate, swap, 2-opt.
pub fn neighborhood(num_stops: usize) -> impl Iterator<Item = Move> {
    relocate_moves(num_stops)
        .chain(swap_moves(num_stops))
        .chain(two_opt_moves(num_stops))
}

/// Outcome of scanning the neighborhood of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scan {
    /// The best feasible improving move and its cost delta.
    Improving(Move, f64),
    /// No feasible move improves the route.
    LocalOptimum,
    /// The scan was stopped before completing.
    Interrupted,
}

/// Scans the full neighborhood for the best feasible improving move.
///
/// `interrupted` is called once per evaluated move; returning `true` aborts
/// the scan. Among equal deltas the first move in [`neighborhood`] order
/// wins, so the result is deterministic.
pub fn best_improving_move<C, F>(
    route: &Route,
    prefix: &PrefixCosts,
    trace: &ResourceTrace,
    model: &ConstraintModel<'_>,
    cost: &C,
    mut interrupted: F,
) -> Scan
where
    C: ArcCost + ?Sized,
    F: FnMut() -> bool,
{
    let mut best: Option<(Move, f64)> = None;
    for mv in neighborhood(route.num_stops()) {
        if interrupted() {
            return Scan::Interrupted;
        }
        let delta = mv.delta(route, prefix, cost);
        let threshold = best.map_or(-IMPROVEMENT_EPS, |(_, d)| d - IMPROVEMENT_EPS);
        if delta < threshold && model.delta_feasible(route, trace, &mv) {
            best = Some((mv, delta));
        }
    }
    match best {
        Some((mv, delta)) => Scan::Improving(mv, delta),
        None => Scan::LocalOptimum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;
    use crate::models::{Location, Problem, ProblemBuilder, StopInput};

    fn line_problem(capacity: i32, max_minutes: i32) -> Problem {
        // Stops on a line at 1, 2, 3 km from the depot; 1 m = 1 s.
        let pos = [0.0, 1000.0, 2000.0, 3000.0];
        let rows: Vec<Vec<f64>> = pos
            .iter()
            .map(|a| pos.iter().map(|b| f64::abs(a - b)).collect())
            .collect();
        let stops: Vec<StopInput> = (1..=3)
            .map(|i| StopInput::new(format!("S{i}"), 1, 0.0, 0.0))
            .collect();
        ProblemBuilder::new()
            .build(Location::new(0.0, 0.0), &stops, &rows, &rows, capacity, max_minutes)
            .expect("valid")
    }

    #[test]
    fn test_neighborhood_order() {
        let moves: Vec<Move> = neighborhood(3).collect();
        assert_eq!(moves.first(), Some(&Move::Relocate { from: 1, to: 2 }));
        assert_eq!(moves.last(), Some(&Move::TwoOpt { i: 1, j: 3 }));
        assert_eq!(moves.len(), 4 + 1 + 1);
    }

    #[test]
    fn test_finds_improvement() {
        let problem = line_problem(10, 480);
        let model = ConstraintModel::new(&problem);
        let route = Route::from_stops(&[2, 1, 3]);
        let trace = ResourceTrace::new(&model, &route);
        let prefix = PrefixCosts::new(&route, problem.distances());
        match best_improving_move(&route, &prefix, &trace, &model, problem.distances(), || false) {
            Scan::Improving(mv, delta) => {
                assert!(delta < 0.0);
                let mut r = route.clone();
                mv.apply(&mut r);
                assert_eq!(r.cost(problem.distances()), 6000.0);
            }
            other => panic!("expected improvement, got {other:?}"),
        }
    }

    #[test]
    fn test_local_optimum_and_interrupt() {
        let problem = line_problem(10, 480);
        let model = ConstraintModel::new(&problem);
        let route = Route::from_stops(&[1, 2, 3]);
        let trace = ResourceTrace::new(&model, &route);
        let m: &CostMatrix = problem.distances();
        let prefix = PrefixCosts::new(&route, m);
        assert_eq!(
            best_improving_move(&route, &prefix, &trace, &model, m, || false),
            Scan::LocalOptimum
        );
        assert_eq!(
            best_improving_move(&route, &prefix, &trace, &model, m, || true),
            Scan::Interrupted
        );
    }
}
