//! Constraint model: load and duration dimensions with feasibility checks.

use super::ResourceTrace;
use crate::error::Resource;
use crate::local_search::Move;
use crate::models::{Problem, Route};

/// Resource values after visiting one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Cumulative load.
    pub load: i64,
    /// Elapsed seconds at arrival.
    pub arrival: f64,
    /// Elapsed seconds when leaving (after waiting and service).
    pub departure: f64,
}

/// Evaluates routes against the vehicle's resource limits.
///
/// Two cumulative dimensions are tracked from the depot:
///
/// - **load**: each stop adds its demand; bounded by capacity at every position;
/// - **duration**: each arc adds its travel time, each stop its service time;
///   bounded by the maximum route duration at every position.
///
/// When time windows are enforced, arriving after a stop's latest time is
/// infeasible and arriving early waits until its earliest time; waiting
/// counts toward the duration dimension.
///
/// # Examples
///
/// ```
/// use route_engine::evaluation::ConstraintModel;
/// use route_engine::models::{Location, ProblemBuilder, Route, StopInput};
///
/// let stops = vec![
///     StopInput::new("A", 10, 0.0, 0.0),
///     StopInput::new("B", 10, 0.0, 0.0),
/// ];
/// let m = vec![vec![0.0, 60.0, 60.0], vec![60.0, 0.0, 60.0], vec![60.0, 60.0, 0.0]];
/// let problem = ProblemBuilder::new()
///     .build(Location::new(0.0, 0.0), &stops, &m, &m, 15, 60)
///     .unwrap();
/// let model = ConstraintModel::new(&problem);
///
/// assert!(model.is_feasible(&Route::from_stops(&[1])));
/// assert!(!model.is_feasible(&Route::from_stops(&[1, 2])));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConstraintModel<'a> {
    problem: &'a Problem,
    enforce_time_windows: bool,
}

impl<'a> ConstraintModel<'a> {
    /// Creates a model with load and duration dimensions only.
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            enforce_time_windows: false,
        }
    }

    /// Enables or disables arrival-time window enforcement.
    pub fn with_time_windows(mut self, enforce: bool) -> Self {
        self.enforce_time_windows = enforce;
        self
    }

    /// The problem this model evaluates.
    pub fn problem(&self) -> &'a Problem {
        self.problem
    }

    /// Returns `true` if time windows are enforced.
    pub fn enforces_time_windows(&self) -> bool {
        self.enforce_time_windows
    }

    /// Resource values after traveling from `prev` (left at `departure`
    /// carrying `load`) to `node`.
    pub fn step(&self, prev: usize, load: i64, departure: f64, node: usize) -> Step {
        let arrival = departure + self.problem.duration(prev, node);
        let start = match self.problem.node(node).time_window() {
            Some(tw) if self.enforce_time_windows => arrival + tw.waiting_seconds(arrival),
            _ => arrival,
        };
        Step {
            load: load + i64::from(self.problem.demand(node)),
            arrival,
            departure: start + self.problem.service_time(node),
        }
    }

    /// Returns the first bound violated by `step` at `node`, if any.
    pub fn violation(&self, node: usize, step: &Step) -> Option<Resource> {
        if step.load > i64::from(self.problem.capacity()) {
            return Some(Resource::Load);
        }
        if step.departure > self.problem.max_duration() {
            return Some(Resource::Duration);
        }
        if self.enforce_time_windows {
            if let Some(tw) = self.problem.node(node).time_window() {
                if tw.is_violated(step.arrival) {
                    return Some(Resource::TimeWindow);
                }
            }
        }
        None
    }

    /// Returns `true` if every position of `route` respects every bound.
    pub fn is_feasible(&self, route: &Route) -> bool {
        self.first_violation(route).is_none()
    }

    /// First violated position and resource, walking from the depot.
    pub fn first_violation(&self, route: &Route) -> Option<(usize, Resource)> {
        let mut load = 0;
        let mut departure = 0.0;
        for k in 1..route.len() {
            let node = route.node(k);
            let step = self.step(route.node(k - 1), load, departure, node);
            if let Some(resource) = self.violation(node, &step) {
                return Some((k, resource));
            }
            load = step.load;
            departure = step.departure;
        }
        None
    }

    /// Checks the route produced by `mv` without building it.
    ///
    /// `trace` must be the trace of `route`, which must itself be feasible.
    /// Positions before the affected range are taken from the trace. Past the
    /// affected range the replay stops as soon as the vehicle is no later and
    /// no heavier than it was on the current route, since the remaining
    /// suffix is then known to be feasible.
    pub fn delta_feasible(&self, route: &Route, trace: &ResourceTrace, mv: &Move) -> bool {
        self.delta_violation(route, trace, mv).is_none()
    }

    /// Like [`delta_feasible`](Self::delta_feasible), returning the violated resource.
    pub fn delta_violation(&self, route: &Route, trace: &ResourceTrace, mv: &Move) -> Option<Resource> {
        let (lo, hi) = mv.affected();
        let len = mv.resulting_len(route);

        let mut prev = route.node(lo - 1);
        let mut load = trace.load(lo - 1);
        let mut departure = trace.departure(lo - 1);
        for k in lo..len {
            let node = mv.node_at(route, k);
            let step = self.step(prev, load, departure, node);
            if let Some(resource) = self.violation(node, &step) {
                return Some(resource);
            }
            if k > hi {
                let origin = mv.origin_of(k);
                if step.departure <= trace.departure(origin) && step.load <= trace.load(origin) {
                    return None;
                }
            }
            prev = node;
            load = step.load;
            departure = step.departure;
        }
        None
    }
}
