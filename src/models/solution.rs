//! Solution types returned to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why the improvement phase stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The wall-clock budget elapsed.
    TimeLimit,
    /// No improving move remained and penalties stopped yielding progress.
    Converged,
    /// The caller requested an early stop.
    Cancelled,
}

impl TerminationReason {
    /// Tag reported in `solver_info.status`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::TimeLimit => "time_limit",
            TerminationReason::Converged => "converged",
            TerminationReason::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stop in visiting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencedStop {
    /// Stop identifier from the request.
    pub id: String,
    /// Zero-based position among the stops.
    pub sequence_number: usize,
    /// Elapsed minutes from route start at arrival.
    pub estimated_arrival_minutes: f64,
    /// Whether the estimated arrival lies within the stop's window, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub within_time_window: Option<bool>,
}

/// One leg of the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from_id: String,
    pub to_id: String,
    pub distance_meters: f64,
    pub duration_minutes: f64,
    /// Zero-based, strictly increasing.
    pub segment_order: usize,
}

/// Search metadata reported alongside the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverInfo {
    /// Wall-clock time spent in construction and improvement.
    pub solve_time_seconds: f64,
    /// Unpenalized route distance, meters.
    pub objective_value: f64,
    /// Termination reason.
    pub status: TerminationReason,
    /// Construction and improvement strategy identifiers.
    pub strategy: String,
    /// Depot plus stops.
    pub num_locations: usize,
    /// Accepted improvement moves.
    pub iterations: usize,
}

/// Optimized route for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Node indices, depot at both ends.
    #[serde(skip)]
    pub route: Vec<usize>,
    pub optimized_sequence: Vec<SequencedStop>,
    pub route_segments: Vec<RouteSegment>,
    /// Rounded to 2 decimals.
    pub total_distance_km: f64,
    /// Rounded to 1 decimal.
    pub total_duration_minutes: f64,
    pub solver_info: SolverInfo,
}

impl Solution {
    /// Stop ids in visiting order.
    pub fn stop_ids(&self) -> Vec<&str> {
        self.optimized_sequence.iter().map(|s| s.id.as_str()).collect()
    }

    /// Unrounded sum of segment distances, meters.
    pub fn segment_distance_meters(&self) -> f64 {
        self.route_segments.iter().map(|s| s.distance_meters).sum()
    }
}
