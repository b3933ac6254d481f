//! Conversion of a final route into the caller-facing [`Solution`].

use std::time::Duration;

use crate::error::InternalError;
use crate::evaluation::{ConstraintModel, ResourceTrace};
use crate::models::{
    Route, RouteSegment, SequencedStop, Solution, SolverInfo, TerminationReason, DEPOT_ID,
};

/// Strategy identifiers reported in [`SolverInfo::strategy`].
pub const STRATEGY: &str = "CHEAPEST_INSERTION + GUIDED_LOCAL_SEARCH";

/// Facts about the search that produced a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchMetadata {
    /// Wall-clock time of construction and improvement.
    pub elapsed: Duration,
    /// Why the improvement phase stopped.
    pub termination: TerminationReason,
    /// Accepted improvement moves.
    pub iterations: usize,
}

/// Builds the [`Solution`] for `route`.
///
/// Segments, totals and arrival estimates are recomputed from the problem
/// matrices. The total duration is the sum of segment travel times; service
/// time only shows in the arrival estimates. Fails with [`InternalError`] if `route` does not visit every
/// stop exactly once or its distance is not finite.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use route_engine::evaluation::ConstraintModel;
/// use route_engine::extraction::{extract, SearchMetadata};
/// use route_engine::models::{Location, ProblemBuilder, Route, StopInput, TerminationReason};
///
/// let stops = vec![StopInput::new("A", 1, 0.0, 0.0)];
/// let d = vec![vec![0.0, 1500.0], vec![1500.0, 0.0]];
/// let t = vec![vec![0.0, 300.0], vec![300.0, 0.0]];
/// let problem = ProblemBuilder::new()
///     .build(Location::new(0.0, 0.0), &stops, &d, &t, 10, 60)
///     .unwrap();
/// let meta = SearchMetadata {
///     elapsed: Duration::from_millis(5),
///     termination: TerminationReason::Converged,
///     iterations: 0,
/// };
///
/// let solution = extract(&ConstraintModel::new(&problem), &Route::from_stops(&[1]), &meta).unwrap();
/// assert_eq!(solution.total_distance_km, 3.0);
/// assert_eq!(solution.total_duration_minutes, 10.0);
/// assert_eq!(solution.route_segments[1].to_id, "DEPOT");
/// ```
pub fn extract(
    model: &ConstraintModel<'_>,
    route: &Route,
    metadata: &SearchMetadata,
) -> Result<Solution, InternalError> {
    let problem = model.problem();
    if !route.is_tour_of(problem.num_nodes()) {
        return Err(InternalError::new(format!(
            "final route {:?} is not a tour of {} stops",
            route.nodes(),
            problem.num_stops()
        )));
    }
    let objective = route.cost(problem.distances());
    if !objective.is_finite() {
        return Err(InternalError::new(format!(
            "final route has non-finite distance {objective}"
        )));
    }

    let id = |node: usize| {
        if node == 0 {
            DEPOT_ID.to_string()
        } else {
            problem.node(node).id().to_string()
        }
    };

    let route_segments: Vec<RouteSegment> = route
        .arcs()
        .enumerate()
        .map(|(order, (from, to))| RouteSegment {
            from_id: id(from),
            to_id: id(to),
            distance_meters: problem.distance(from, to),
            duration_minutes: problem.duration(from, to) / 60.0,
            segment_order: order,
        })
        .collect();
    let travel_minutes: f64 = route_segments.iter().map(|s| s.duration_minutes).sum();

    let trace = ResourceTrace::new(model, route);
    let optimized_sequence: Vec<SequencedStop> = route
        .stops()
        .iter()
        .enumerate()
        .map(|(seq, &node)| {
            let arrival = trace.arrival(seq + 1);
            let within_time_window = problem.node(node).time_window().map(|tw| {
                let start = if model.enforces_time_windows() {
                    arrival + tw.waiting_seconds(arrival)
                } else {
                    arrival
                };
                tw.contains(start / 60.0)
            });
            SequencedStop {
                id: id(node),
                sequence_number: seq,
                estimated_arrival_minutes: round_to(arrival / 60.0, 1),
                within_time_window,
            }
        })
        .collect();

    Ok(Solution {
        route: route.nodes().to_vec(),
        optimized_sequence,
        route_segments,
        total_distance_km: round_to(objective / 1000.0, 2),
        total_duration_minutes: round_to(travel_minutes, 1),
        solver_info: SolverInfo {
            solve_time_seconds: metadata.elapsed.as_secs_f64(),
            objective_value: objective,
            status: metadata.termination,
            strategy: STRATEGY.to_string(),
            num_locations: problem.num_nodes(),
            iterations: metadata.iterations,
        },
    })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, Problem, ProblemBuilder, StopInput};

    fn meta() -> SearchMetadata {
        SearchMetadata {
            elapsed: Duration::from_millis(250),
            termination: TerminationReason::TimeLimit,
            iterations: 7,
        }
    }

    fn problem(stops: Vec<StopInput>) -> Problem {
        let d = vec![
            vec![0.0, 1234.0, 2000.0],
            vec![1300.0, 0.0, 777.0],
            vec![2100.0, 800.0, 0.0],
        ];
        let t = vec![
            vec![0.0, 125.0, 240.0],
            vec![130.0, 0.0, 95.0],
            vec![250.0, 100.0, 0.0],
        ];
        ProblemBuilder::new()
            .build(Location::new(0.0, 0.0), &stops, &d, &t, 10, 60)
            .expect("valid")
    }

    fn two_stops() -> Vec<StopInput> {
        vec![StopInput::new("A", 1, 0.0, 0.0), StopInput::new("B", 1, 0.0, 0.0)]
    }

    #[test]
    fn test_segments_and_totals() {
        let p = problem(two_stops());
        let solution = extract(&ConstraintModel::new(&p), &Route::from_stops(&[2, 1]), &meta())
            .expect("valid route");

        let ids: Vec<(&str, &str)> = solution
            .route_segments
            .iter()
            .map(|s| (s.from_id.as_str(), s.to_id.as_str()))
            .collect();
        assert_eq!(ids, vec![("DEPOT", "B"), ("B", "A"), ("A", "DEPOT")]);
        let orders: Vec<usize> = solution.route_segments.iter().map(|s| s.segment_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(solution.route_segments[1].duration_minutes, 100.0 / 60.0);

        // 2000 + 800 + 1300 m; 240 + 100 + 130 s.
        assert_eq!(solution.total_distance_km, 4.1);
        assert_eq!(solution.total_duration_minutes, 7.8);
        assert_eq!(solution.solver_info.objective_value, 4100.0);
        assert_eq!(solution.solver_info.status, TerminationReason::TimeLimit);
        assert_eq!(solution.solver_info.num_locations, 3);
        assert_eq!(solution.solver_info.iterations, 7);
        assert_eq!(solution.solver_info.solve_time_seconds, 0.25);
        assert_eq!(solution.solver_info.strategy, STRATEGY);
        assert_eq!(solution.route, vec![0, 2, 1, 0]);
    }

    #[test]
    fn test_sequence_and_arrivals() {
        let p = problem(two_stops());
        let solution = extract(&ConstraintModel::new(&p), &Route::from_stops(&[1, 2]), &meta())
            .expect("valid route");
        assert_eq!(solution.stop_ids(), vec!["A", "B"]);
        let seq: Vec<usize> = solution.optimized_sequence.iter().map(|s| s.sequence_number).collect();
        assert_eq!(seq, vec![0, 1]);
        // 125 s and 125 + 95 s.
        assert_eq!(solution.optimized_sequence[0].estimated_arrival_minutes, 2.1);
        assert_eq!(solution.optimized_sequence[1].estimated_arrival_minutes, 3.7);
        assert_eq!(solution.optimized_sequence[0].within_time_window, None);
    }

    #[test]
    fn test_time_window_reporting() {
        let stops = vec![
            StopInput::new("A", 1, 0.0, 0.0).with_time_window(0.0, 1.0),
            StopInput::new("B", 1, 0.0, 0.0).with_time_window(5.0, 30.0),
        ];
        let p = problem(stops);
        let route = Route::from_stops(&[1, 2]);

        // Advisory: A is reached at 2.1 min, B at 3.7 min.
        let advisory = extract(&ConstraintModel::new(&p), &route, &meta()).expect("valid");
        assert_eq!(advisory.optimized_sequence[0].within_time_window, Some(false));
        assert_eq!(advisory.optimized_sequence[1].within_time_window, Some(false));

        // Enforced: B waits until minute 5, which is inside its window.
        let stops = vec![
            StopInput::new("A", 1, 0.0, 0.0),
            StopInput::new("B", 1, 0.0, 0.0).with_time_window(5.0, 30.0),
        ];
        let p = problem(stops);
        let model = ConstraintModel::new(&p).with_time_windows(true);
        let enforced = extract(&model, &route, &meta()).expect("valid");
        assert_eq!(enforced.optimized_sequence[1].within_time_window, Some(true));
        // Arrival is reported before waiting; travel total is 125 + 95 + 250 s.
        assert_eq!(enforced.optimized_sequence[1].estimated_arrival_minutes, 3.7);
        assert_eq!(enforced.total_duration_minutes, 7.8);
    }

    #[test]
    fn test_total_duration_excludes_service_time() {
        let stops = vec![StopInput::new("A", 1, 0.0, 0.0), StopInput::new("B", 1, 0.0, 0.0)];
        let m = vec![
            vec![0.0, 600.0, 600.0],
            vec![600.0, 0.0, 600.0],
            vec![600.0, 600.0, 0.0],
        ];
        let p = ProblemBuilder::new()
            .with_service_minutes(5.0)
            .build(Location::new(0.0, 0.0), &stops, &m, &m, 10, 60)
            .expect("valid");
        let solution = extract(&ConstraintModel::new(&p), &Route::from_stops(&[1, 2]), &meta())
            .expect("valid route");

        let segments: f64 = solution.route_segments.iter().map(|s| s.duration_minutes).sum();
        assert_eq!(segments, 30.0);
        assert_eq!(solution.total_duration_minutes, 30.0);
        // B is reached after 10 min travel, 5 min at A and another 10 min.
        assert_eq!(solution.optimized_sequence[1].estimated_arrival_minutes, 25.0);
    }

    #[test]
    fn test_rejects_incomplete_route() {
        let p = problem(two_stops());
        let err = extract(&ConstraintModel::new(&p), &Route::from_stops(&[1]), &meta())
            .expect_err("B is missing");
        assert!(err.context.contains("not a tour"));

        let err = extract(&ConstraintModel::new(&p), &Route::from_stops(&[1, 1]), &meta())
            .expect_err("A is repeated");
        assert!(err.context.contains("not a tour"));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(4.105, 1), 4.1);
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(7.0, 2), 7.0);
    }
}
