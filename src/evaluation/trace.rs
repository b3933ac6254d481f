//! Cumulative resource values along a route.

use super::ConstraintModel;
use crate::models::Route;

/// Load and elapsed time at every position of a route.
///
/// Index-addressed like the route itself. After a move changes positions
/// `lo..`, [`rebuild_from`](Self::rebuild_from) recomputes only that suffix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceTrace {
    load: Vec<i64>,
    arrival: Vec<f64>,
    departure: Vec<f64>,
}

impl ResourceTrace {
    /// Computes the trace of `route`.
    pub fn new(model: &ConstraintModel<'_>, route: &Route) -> Self {
        let mut trace = Self {
            load: vec![0; route.len()],
            arrival: vec![0.0; route.len()],
            departure: vec![0.0; route.len()],
        };
        trace.rebuild_from(model, route, 1);
        trace
    }

    /// Recomputes positions `from..` from the values at `from - 1`.
    pub fn rebuild_from(&mut self, model: &ConstraintModel<'_>, route: &Route, from: usize) {
        let n = route.len();
        self.load.resize(n, 0);
        self.arrival.resize(n, 0.0);
        self.departure.resize(n, 0.0);
        for k in from.max(1)..n {
            let step = model.step(
                route.node(k - 1),
                self.load[k - 1],
                self.departure[k - 1],
                route.node(k),
            );
            self.load[k] = step.load;
            self.arrival[k] = step.arrival;
            self.departure[k] = step.departure;
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.load.len()
    }

    /// Returns `true` if the trace covers no positions.
    pub fn is_empty(&self) -> bool {
        self.load.is_empty()
    }

    /// Cumulative load after serving position `k`.
    pub fn load(&self, k: usize) -> i64 {
        self.load[k]
    }

    /// Elapsed seconds at arrival at position `k`.
    pub fn arrival(&self, k: usize) -> f64 {
        self.arrival[k]
    }

    /// Elapsed seconds when leaving position `k` (after waiting and service).
    pub fn departure(&self, k: usize) -> f64 {
        self.departure[k]
    }
}
