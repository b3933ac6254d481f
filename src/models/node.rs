//! Locations, time windows and route nodes.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances, in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Identifier reported for the depot in route output.
pub const DEPOT_ID: &str = "DEPOT";

/// A geographic coordinate in decimal degrees.
///
/// # Examples
///
/// ```
/// use route_engine::models::Location;
///
/// let a = Location::new(33.573, -7.590);
/// assert!(a.is_valid());
/// assert_eq!(a.distance_to(&a), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lon: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns `true` if both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Great-circle (haversine) distance to another location, in meters.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let dlat = lat2 - lat1;
        let dlon = (other.lon - self.lon).to_radians();
        let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
    }
}

/// An arrival time window, in minutes from the route start.
///
/// The vehicle should arrive no later than `latest` and may arrive as early
/// as `earliest` (waiting is allowed if early).
///
/// # Examples
///
/// ```
/// use route_engine::models::TimeWindow;
///
/// let tw = TimeWindow::new(60.0, 120.0).unwrap();
/// assert!(tw.contains(90.0));
/// assert!(!tw.contains(150.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    earliest: f64,
    latest: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest`, either bound is negative or
    /// either value is non-finite.
    pub fn new(earliest: f64, latest: f64) -> Option<Self> {
        if !earliest.is_finite() || !latest.is_finite() || earliest < 0.0 || earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// Earliest allowable arrival, in minutes.
    pub fn earliest(&self) -> f64 {
        self.earliest
    }

    /// Latest allowable arrival, in minutes.
    pub fn latest(&self) -> f64 {
        self.latest
    }

    /// Returns `true` if the given time (minutes) falls within this window.
    pub fn contains(&self, minutes: f64) -> bool {
        minutes >= self.earliest && minutes <= self.latest
    }

    /// Seconds to wait when arriving at `arrival_seconds`.
    pub fn waiting_seconds(&self, arrival_seconds: f64) -> f64 {
        (self.earliest * 60.0 - arrival_seconds).max(0.0)
    }

    /// Returns `true` if arriving at `arrival_seconds` is too late.
    pub fn is_violated(&self, arrival_seconds: f64) -> bool {
        arrival_seconds > self.latest * 60.0
    }
}

/// A node of a routing problem: the depot (index 0) or a delivery stop.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    demand: i32,
    location: Option<Location>,
    time_window: Option<TimeWindow>,
}

impl Node {
    /// Creates a delivery stop.
    pub fn stop(id: impl Into<String>, demand: i32) -> Self {
        Self {
            id: id.into(),
            demand,
            location: None,
            time_window: None,
        }
    }

    /// Creates the depot node (id `DEPOT`, demand 0).
    pub fn depot(location: Option<Location>) -> Self {
        Self {
            id: DEPOT_ID.to_string(),
            demand: 0,
            location,
            time_window: None,
        }
    }

    /// Sets the coordinates of this node.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets a time window for this node.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = Some(tw);
        self
    }

    /// Identifier used in output.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Units this node adds to the vehicle load.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Coordinates, if known.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Time window constraint, if any.
    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref()
    }
}
