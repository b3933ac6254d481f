//! Optimizer configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gls::GlsConfig;

/// Configuration of a [`RouteOptimizer`](super::RouteOptimizer).
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names.
///
/// # Examples
///
/// ```
/// use route_engine::optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::from_json(r#"{"time_limit_ms": 2000, "max_stops": 20}"#).unwrap();
/// assert_eq!(config.time_limit_ms, 2000);
/// assert_eq!(config.max_stops, Some(20));
/// assert_eq!(config.min_stops, 1);
/// assert_eq!(config.gls.max_stagnant_rounds, 100);
///
/// let config = OptimizerConfig::default()
///     .with_stop_limits(5, Some(20))
///     .with_time_windows(true);
/// assert!(config.enforce_time_windows);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Wall-clock budget for construction and improvement, milliseconds.
    pub time_limit_ms: u64,
    /// Fewest stops a request may carry.
    pub min_stops: usize,
    /// Most stops a request may carry (`None` for no limit).
    pub max_stops: Option<usize>,
    /// Fixed dwell time at every stop, minutes.
    pub service_minutes: f64,
    /// Reject arrivals after a stop's latest time and wait for its earliest.
    pub enforce_time_windows: bool,
    /// Guided local search parameters.
    pub gls: GlsConfig,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 30_000,
            min_stops: 1,
            max_stops: None,
            service_minutes: 0.0,
            enforce_time_windows: false,
            gls: GlsConfig::default(),
        }
    }
}

impl OptimizerConfig {
    /// Parses a JSON document, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Search budget as a [`Duration`].
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    /// Sets the search budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the accepted stop count range.
    pub fn with_stop_limits(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_stops = min;
        self.max_stops = max;
        self
    }

    /// Sets the dwell time at every stop, in minutes.
    pub fn with_service_minutes(mut self, minutes: f64) -> Self {
        self.service_minutes = minutes;
        self
    }

    /// Enables or disables time-window enforcement.
    pub fn with_time_windows(mut self, enforce: bool) -> Self {
        self.enforce_time_windows = enforce;
        self
    }

    /// Sets the guided local search parameters.
    pub fn with_gls(mut self, gls: GlsConfig) -> Self {
        self.gls = gls;
        self
    }
}
