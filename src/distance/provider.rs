//! Distance/duration providers.
//!
//! A [`MatrixProvider`] turns an ordered list of coordinates into a pair of
//! square matrices. Network-backed providers live outside this crate; they
//! report failures through [`ProviderError`], which the optimizer passes to
//! its caller without retrying.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::CostMatrix;
use crate::models::Location;

/// Category of a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    /// Credentials were rejected.
    Authentication,
    /// Request quota or rate limit exceeded.
    QuotaExceeded,
    /// Connection or protocol failure.
    Transport,
    /// The response was missing matrices or had the wrong shape.
    MalformedResponse,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderErrorKind::Authentication => "authentication failure",
            ProviderErrorKind::QuotaExceeded => "quota exceeded",
            ProviderErrorKind::Transport => "transport failure",
            ProviderErrorKind::MalformedResponse => "malformed response",
        };
        f.write_str(name)
    }
}

/// Failure reported by a [`MatrixProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    /// What went wrong.
    pub kind: ProviderErrorKind,
    /// Provider-specific detail.
    pub detail: String,
}

impl ProviderError {
    /// Creates a new provider error.
    pub fn new(kind: ProviderErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Shorthand for a [`ProviderErrorKind::MalformedResponse`] error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::MalformedResponse, detail)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "distance provider {}: {}", self.kind, self.detail)
    }
}

impl std::error::Error for ProviderError {}

/// Distance (meters) and duration (seconds) matrices for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrices {
    /// Row `i`, column `j`: meters from location `i` to location `j`.
    pub distances: Vec<Vec<f64>>,
    /// Row `i`, column `j`: seconds from location `i` to location `j`.
    pub durations: Vec<Vec<f64>>,
}

/// Source of pairwise travel costs.
pub trait MatrixProvider: Send + Sync {
    /// Returns matrices whose dimension equals `locations.len()`.
    fn matrices(&self, locations: &[Location]) -> Result<Matrices, ProviderError>;
}

/// Checks the shape of provider output against the requested location count.
///
/// # Examples
///
/// ```
/// use route_engine::distance::{validate_matrices, Matrices, ProviderErrorKind};
///
/// let ok = Matrices {
///     distances: vec![vec![0.0, 1.0], vec![1.0, 0.0]],
///     durations: vec![vec![0.0, 2.0], vec![2.0, 0.0]],
/// };
/// assert!(validate_matrices(&ok, 2).is_ok());
///
/// let err = validate_matrices(&ok, 3).unwrap_err();
/// assert_eq!(err.kind, ProviderErrorKind::MalformedResponse);
/// ```
pub fn validate_matrices(matrices: &Matrices, expected: usize) -> Result<(), ProviderError> {
    for (name, rows) in [("distance", &matrices.distances), ("duration", &matrices.durations)] {
        if rows.is_empty() {
            return Err(ProviderError::malformed(format!("missing {name} matrix")));
        }
        if rows.len() != expected {
            return Err(ProviderError::malformed(format!(
                "{name} matrix size mismatch: expected {expected}, got {}",
                rows.len()
            )));
        }
        if let Some(row) = rows.iter().position(|r| r.len() != expected) {
            return Err(ProviderError::malformed(format!(
                "{name} matrix row {row} has {} entries, expected {expected}",
                rows[row].len()
            )));
        }
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ProviderError::malformed(format!(
                "{name} matrix contains a non-finite entry"
            )));
        }
    }
    Ok(())
}

/// Offline provider based on great-circle distance and a constant speed.
///
/// Durations are `distance / speed`; distances may be scaled by a detour
/// factor to approximate road networks.
///
/// # Examples
///
/// ```
/// use route_engine::distance::{HaversineProvider, MatrixProvider};
/// use route_engine::models::Location;
///
/// let provider = HaversineProvider::new(36.0).unwrap();
/// let m = provider
///     .matrices(&[Location::new(0.0, 0.0), Location::new(0.0, 0.01)])
///     .unwrap();
/// assert_eq!(m.distances.len(), 2);
/// // 36 km/h = 10 m/s
/// assert!((m.durations[0][1] - m.distances[0][1] / 10.0).abs() < 1e-9);
///
/// assert!(HaversineProvider::new(0.0).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct HaversineProvider {
    speed_kmh: f64,
    detour_factor: f64,
}

impl HaversineProvider {
    /// Creates a provider for the given average speed in km/h.
    ///
    /// Returns `None` unless the speed is finite and positive.
    pub fn new(speed_kmh: f64) -> Option<Self> {
        (speed_kmh.is_finite() && speed_kmh > 0.0).then_some(Self {
            speed_kmh,
            detour_factor: 1.0,
        })
    }

    /// Multiplies every straight-line distance by `factor`.
    ///
    /// Factors that are not finite and at least 1 are ignored.
    pub fn with_detour_factor(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor >= 1.0 {
            self.detour_factor = factor;
        }
        self
    }
}

impl Default for HaversineProvider {
    fn default() -> Self {
        Self {
            speed_kmh: 30.0,
            detour_factor: 1.0,
        }
    }
}

impl MatrixProvider for HaversineProvider {
    /// Coordinates are expected to be in range; the optimizer checks them
    /// before calling any provider.
    fn matrices(&self, locations: &[Location]) -> Result<Matrices, ProviderError> {
        let factor = self.detour_factor;
        let distances =
            CostMatrix::from_locations(locations, |a, b| a.distance_to(b) * factor);
        let meters_per_second = self.speed_kmh / 3.6;
        let mut durations = CostMatrix::new(locations.len());
        for i in 0..locations.len() {
            for j in 0..locations.len() {
                durations.set(i, j, distances.get(i, j) / meters_per_second);
            }
        }

        Ok(Matrices {
            distances: distances.to_rows(),
            durations: durations.to_rows(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(n: usize) -> Vec<Vec<f64>> {
        vec![vec![0.0; n]; n]
    }

    #[test]
    fn test_validate_missing() {
        let m = Matrices {
            distances: vec![],
            durations: square(2),
        };
        let err = validate_matrices(&m, 2).expect_err("missing");
        assert_eq!(err.kind, ProviderErrorKind::MalformedResponse);
        assert!(err.detail.contains("missing distance"));
    }

    #[test]
    fn test_validate_ragged_row() {
        let mut durations = square(3);
        durations[1].pop();
        let m = Matrices {
            distances: square(3),
            durations,
        };
        let err = validate_matrices(&m, 3).expect_err("ragged");
        assert!(err.detail.contains("duration matrix row 1"));
    }

    #[test]
    fn test_validate_non_finite() {
        let mut distances = square(2);
        distances[0][1] = f64::NAN;
        let m = Matrices {
            distances,
            durations: square(2),
        };
        assert!(validate_matrices(&m, 2).is_err());
    }

    #[test]
    fn test_haversine_provider_shape() {
        let provider = HaversineProvider::default().with_detour_factor(1.3);
        let locs = vec![
            Location::new(33.573, -7.590),
            Location::new(33.588, -7.611),
            Location::new(33.560, -7.620),
        ];
        let m = provider.matrices(&locs).expect("ok");
        assert!(validate_matrices(&m, 3).is_ok());
        assert_eq!(m.distances[1][1], 0.0);
        let straight = locs[0].distance_to(&locs[1]);
        assert!((m.distances[0][1] - straight * 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_haversine_provider_rejects_bad_speed() {
        assert!(HaversineProvider::new(0.0).is_none());
        assert!(HaversineProvider::new(-12.0).is_none());
        assert!(HaversineProvider::new(f64::NAN).is_none());
        assert!(HaversineProvider::new(f64::INFINITY).is_none());
        assert!(HaversineProvider::new(40.0).is_some());
    }

    #[test]
    fn test_haversine_provider_ignores_bad_detour_factor() {
        let locs = vec![Location::new(0.0, 0.0), Location::new(0.0, 0.01)];
        let plain = HaversineProvider::default().matrices(&locs).expect("ok");
        let scaled = HaversineProvider::default()
            .with_detour_factor(0.5)
            .with_detour_factor(f64::NAN)
            .matrices(&locs)
            .expect("ok");
        assert_eq!(plain, scaled);
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::new(ProviderErrorKind::QuotaExceeded, "429 from upstream");
        assert_eq!(
            err.to_string(),
            "distance provider quota exceeded: 429 from upstream"
        );
    }
}
