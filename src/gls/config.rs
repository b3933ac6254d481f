//! Guided local search configuration.

use serde::{Deserialize, Serialize};

/// Configuration parameters for guided local search.
///
/// # Examples
///
/// ```
/// use route_engine::gls::GlsConfig;
///
/// let config = GlsConfig::default()
///     .with_lambda_coefficient(0.2)
///     .with_max_stagnant_rounds(50);
/// assert_eq!(config.lambda_coefficient, 0.2);
/// assert_eq!(config.max_stagnant_rounds, 50);
/// assert_eq!(config.check_interval, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlsConfig {
    /// Penalty weight relative to the mean arc cost of the first local optimum.
    pub lambda_coefficient: f64,
    /// Consecutive local optima without a new best before stopping.
    pub max_stagnant_rounds: usize,
    /// Evaluated moves between budget checks.
    pub check_interval: usize,
}

impl Default for GlsConfig {
    fn default() -> Self {
        Self {
            lambda_coefficient: 0.1,
            max_stagnant_rounds: 100,
            check_interval: 64,
        }
    }
}

impl GlsConfig {
    /// Sets the penalty weight coefficient.
    pub fn with_lambda_coefficient(mut self, coefficient: f64) -> Self {
        self.lambda_coefficient = coefficient;
        self
    }

    /// Sets the number of non-improving local optima tolerated.
    pub fn with_max_stagnant_rounds(mut self, rounds: usize) -> Self {
        self.max_stagnant_rounds = rounds;
        self
    }

    /// Sets how many moves are evaluated between budget checks.
    pub fn with_check_interval(mut self, interval: usize) -> Self {
        self.check_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GlsConfig = serde_json::from_str(r#"{"max_stagnant_rounds": 10}"#).expect("json");
        assert_eq!(config.max_stagnant_rounds, 10);
        assert_eq!(config.lambda_coefficient, 0.1);
        assert_eq!(config.check_interval, 64);
    }
}
