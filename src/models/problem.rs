//! Immutable problem instance and its validating builder.

use std::collections::HashSet;

use super::{Location, Node, StopInput, TimeWindow};
use crate::distance::CostMatrix;
use crate::error::ValidationError;

/// A validated single-vehicle routing problem.
///
/// Node 0 is the depot, nodes `1..=num_stops()` are delivery stops in input
/// order. Created by [`ProblemBuilder`]; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Problem {
    nodes: Vec<Node>,
    distances: CostMatrix,
    durations: CostMatrix,
    capacity: i32,
    max_duration: f64,
    service_time: f64,
}

impl Problem {
    /// All nodes (index 0 = depot).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node at `index`.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Number of nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of delivery stops (excluding the depot).
    pub fn num_stops(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Distance matrix, meters.
    pub fn distances(&self) -> &CostMatrix {
        &self.distances
    }

    /// Meters from `from` to `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Seconds from `from` to `to`.
    pub fn duration(&self, from: usize, to: usize) -> f64 {
        self.durations.get(from, to)
    }

    /// Demand of node `index` (0 for the depot).
    pub fn demand(&self, index: usize) -> i32 {
        self.nodes[index].demand()
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Maximum route duration, seconds.
    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Service time at node `index`, seconds (0 for the depot).
    pub fn service_time(&self, index: usize) -> f64 {
        if index == 0 {
            0.0
        } else {
            self.service_time
        }
    }
}

/// Validates raw input and builds a [`Problem`].
///
/// # Examples
///
/// ```
/// use route_engine::models::{Location, ProblemBuilder, StopInput};
///
/// let stops = vec![StopInput::new("A", 2, 33.588, -7.611)];
/// let dist = vec![vec![0.0, 1200.0], vec![1300.0, 0.0]];
/// let dur = vec![vec![0.0, 180.0], vec![200.0, 0.0]];
///
/// let problem = ProblemBuilder::new()
///     .build(Location::new(33.573, -7.590), &stops, &dist, &dur, 20, 480)
///     .unwrap();
/// assert_eq!(problem.num_stops(), 1);
/// assert_eq!(problem.max_duration(), 480.0 * 60.0);
///
/// let err = ProblemBuilder::new()
///     .build(Location::new(33.573, -7.590), &stops, &dist, &dur, 0, 480)
///     .unwrap_err();
/// assert!(err.reason().contains("capacity"));
/// ```
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    min_stops: usize,
    max_stops: Option<usize>,
    service_minutes: f64,
}

impl Default for ProblemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemBuilder {
    /// Creates a builder accepting any stop count ≥ 1 and no service time.
    pub fn new() -> Self {
        Self {
            min_stops: 1,
            max_stops: None,
            service_minutes: 0.0,
        }
    }

    /// Restricts the accepted stop count to `min..=max`.
    pub fn with_stop_limits(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_stops = min.max(1);
        self.max_stops = max;
        self
    }

    /// Sets a fixed service time spent at every stop.
    pub fn with_service_minutes(mut self, minutes: f64) -> Self {
        self.service_minutes = minutes;
        self
    }

    /// Builds a problem from raw input.
    ///
    /// Matrices are `(stops.len() + 1)` square, depot first. Fails with a
    /// [`ValidationError`] on any malformed or out-of-range input.
    pub fn build(
        &self,
        depot: Location,
        stops: &[StopInput],
        distance_matrix: &[Vec<f64>],
        duration_matrix: &[Vec<f64>],
        capacity: i32,
        max_duration_minutes: i32,
    ) -> Result<Problem, ValidationError> {
        if stops.is_empty() {
            return Err(ValidationError::NoStops);
        }
        let count = stops.len();
        if count < self.min_stops || self.max_stops.is_some_and(|max| count > max) {
            return Err(ValidationError::StopCount {
                count,
                min: self.min_stops,
                max: self.max_stops,
            });
        }
        if capacity <= 0 {
            return Err(ValidationError::NonPositiveCapacity(capacity));
        }
        if max_duration_minutes <= 0 {
            return Err(ValidationError::NonPositiveMaxDuration(max_duration_minutes));
        }
        if !self.service_minutes.is_finite() || self.service_minutes < 0.0 {
            return Err(ValidationError::InvalidServiceTime(self.service_minutes));
        }
        if !depot.is_valid() {
            return Err(ValidationError::InvalidLocation {
                id: super::DEPOT_ID.to_string(),
                lat: depot.lat,
                lon: depot.lon,
            });
        }

        let n = count + 1;
        let distances = to_matrix("distance", distance_matrix, n)?;
        let durations = to_matrix("duration", duration_matrix, n)?;

        let mut nodes = Vec::with_capacity(n);
        nodes.push(Node::depot(Some(depot)));
        let mut seen = HashSet::with_capacity(count);
        for (index, stop) in stops.iter().enumerate() {
            nodes.push(to_node(index, stop)?);
            if !seen.insert(stop.id.as_str()) {
                return Err(ValidationError::DuplicateStopId(stop.id.clone()));
            }
        }

        Ok(Problem {
            nodes,
            distances,
            durations,
            capacity,
            max_duration: f64::from(max_duration_minutes) * 60.0,
            service_time: self.service_minutes * 60.0,
        })
    }
}

fn to_matrix(
    matrix: &'static str,
    rows: &[Vec<f64>],
    expected: usize,
) -> Result<CostMatrix, ValidationError> {
    if rows.len() != expected {
        return Err(ValidationError::MatrixDimension {
            matrix,
            expected,
            actual: rows.len(),
        });
    }
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
        return Err(ValidationError::MatrixNotSquare {
            matrix,
            row,
            len: r.len(),
        });
    }
    let m = CostMatrix::from_rows(rows).ok_or(ValidationError::MatrixDimension {
        matrix,
        expected,
        actual: rows.len(),
    })?;
    if let Some((from, to, value)) = m.find_invalid() {
        return Err(ValidationError::InvalidMatrixEntry {
            matrix,
            from,
            to,
            value,
        });
    }
    Ok(m)
}

fn to_node(index: usize, stop: &StopInput) -> Result<Node, ValidationError> {
    if stop.id.trim().is_empty() {
        return Err(ValidationError::EmptyStopId { index });
    }
    if stop.demand <= 0 {
        return Err(ValidationError::NonPositiveDemand {
            stop_id: stop.id.clone(),
            demand: stop.demand,
        });
    }
    let location = stop.location();
    if !location.is_valid() {
        return Err(ValidationError::InvalidLocation {
            id: stop.id.clone(),
            lat: stop.lat,
            lon: stop.lon,
        });
    }

    let mut node = Node::stop(stop.id.clone(), stop.demand).with_location(location);
    match (stop.time_window_start, stop.time_window_end) {
        (None, None) => {}
        (Some(start), Some(end)) => {
            let tw = TimeWindow::new(start, end).ok_or_else(|| {
                ValidationError::InvalidTimeWindow {
                    stop_id: stop.id.clone(),
                }
            })?;
            node = node.with_time_window(tw);
        }
        _ => {
            return Err(ValidationError::InvalidTimeWindow {
                stop_id: stop.id.clone(),
            })
        }
    }
    Ok(node)
}
