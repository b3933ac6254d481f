//! Raw optimization input as received from the calling layer.

use serde::{Deserialize, Serialize};

use super::Location;

fn default_capacity() -> i32 {
    20
}

fn default_max_duration() -> i32 {
    480
}

/// A delivery stop as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopInput {
    /// Caller-side identifier, unique within a request.
    pub id: String,
    /// Units consumed against vehicle capacity (must be ≥ 1).
    pub demand: i32,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Earliest arrival, minutes from route start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window_start: Option<f64>,
    /// Latest arrival, minutes from route start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window_end: Option<f64>,
}

impl StopInput {
    /// Creates a stop without a time window.
    pub fn new(id: impl Into<String>, demand: i32, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            demand,
            lat,
            lon,
            time_window_start: None,
            time_window_end: None,
        }
    }

    /// Sets the arrival window, in minutes from route start.
    pub fn with_time_window(mut self, start: f64, end: f64) -> Self {
        self.time_window_start = Some(start);
        self.time_window_end = Some(end);
        self
    }

    /// Coordinates of this stop.
    pub fn location(&self) -> Location {
        Location::new(self.lat, self.lon)
    }
}

/// A single-vehicle optimization request.
///
/// Matrices are optional: when absent they are fetched through a
/// [`MatrixProvider`](crate::distance::MatrixProvider).
///
/// # Examples
///
/// ```
/// use route_engine::models::OptimizationRequest;
///
/// let json = r#"{
///     "depot": {"lat": 33.573, "lon": -7.590},
///     "stops": [{"id": "A", "demand": 2, "lat": 33.588, "lon": -7.611}]
/// }"#;
/// let request: OptimizationRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.vehicle_capacity, 20);
/// assert_eq!(request.max_duration_minutes, 480);
/// assert!(request.distance_matrix.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    /// Start and end of the route.
    pub depot: Location,
    /// Stops to visit, in input order (node `i + 1` is `stops[i]`).
    pub stops: Vec<StopInput>,
    /// Distances in meters, `(N+1) x (N+1)`, depot first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_matrix: Option<Vec<Vec<f64>>>,
    /// Durations in seconds, `(N+1) x (N+1)`, depot first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_matrix: Option<Vec<Vec<f64>>>,
    /// Maximum load of the vehicle.
    #[serde(default = "default_capacity")]
    pub vehicle_capacity: i32,
    /// Maximum route duration, in minutes.
    #[serde(default = "default_max_duration")]
    pub max_duration_minutes: i32,
}

impl OptimizationRequest {
    /// Creates a request with the reference defaults (capacity 20, 480 minutes).
    pub fn new(depot: Location, stops: Vec<StopInput>) -> Self {
        Self {
            depot,
            stops,
            distance_matrix: None,
            duration_matrix: None,
            vehicle_capacity: default_capacity(),
            max_duration_minutes: default_max_duration(),
        }
    }

    /// Attaches precomputed matrices.
    pub fn with_matrices(mut self, distances: Vec<Vec<f64>>, durations: Vec<Vec<f64>>) -> Self {
        self.distance_matrix = Some(distances);
        self.duration_matrix = Some(durations);
        self
    }

    /// Sets the vehicle capacity.
    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.vehicle_capacity = capacity;
        self
    }

    /// Sets the maximum route duration in minutes.
    pub fn with_max_duration_minutes(mut self, minutes: i32) -> Self {
        self.max_duration_minutes = minutes;
        self
    }

    /// Depot followed by all stops, in node order.
    pub fn locations(&self) -> Vec<Location> {
        std::iter::once(self.depot)
            .chain(self.stops.iter().map(StopInput::location))
            .collect()
    }
}
