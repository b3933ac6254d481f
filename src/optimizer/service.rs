//! The optimizer facade: provider, builder, search and extraction wired together.

use tracing::{info, instrument, warn};

use super::OptimizerConfig;
use crate::constructive::cheapest_insertion;
use crate::distance::{validate_matrices, MatrixProvider};
use crate::error::{InternalError, OptimizeError, ValidationError};
use crate::evaluation::ConstraintModel;
use crate::extraction::{extract, SearchMetadata};
use crate::gls::{CancelToken, GlsRunner, SearchBudget};
use crate::models::{OptimizationRequest, Problem, ProblemBuilder, Solution, DEPOT_ID};

/// Single-vehicle route optimizer.
///
/// Holds configuration only; every call builds its own problem and search
/// state, so one optimizer can serve concurrent requests.
///
/// # Examples
///
/// ```
/// use route_engine::models::{Location, OptimizationRequest, StopInput};
/// use route_engine::optimizer::{OptimizerConfig, RouteOptimizer};
///
/// let stops = vec![StopInput::new("A", 2, 33.588, -7.611), StopInput::new("B", 3, 33.560, -7.620)];
/// let m = vec![
///     vec![0.0, 900.0, 1200.0],
///     vec![900.0, 0.0, 700.0],
///     vec![1200.0, 700.0, 0.0],
/// ];
/// let request = OptimizationRequest::new(Location::new(33.573, -7.590), stops)
///     .with_matrices(m.clone(), m);
///
/// let optimizer = RouteOptimizer::new(OptimizerConfig::default());
/// let solution = optimizer.optimize(&request).unwrap();
/// assert_eq!(solution.total_distance_km, 2.8);
/// assert_eq!(solution.route_segments.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
}

impl RouteOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Problem builder carrying the configured business limits.
    pub fn builder(&self) -> ProblemBuilder {
        ProblemBuilder::new()
            .with_stop_limits(self.config.min_stops, self.config.max_stops)
            .with_service_minutes(self.config.service_minutes)
    }

    /// Optimizes a request whose matrices are supplied inline.
    pub fn optimize(&self, request: &OptimizationRequest) -> Result<Solution, OptimizeError> {
        let distances = request
            .distance_matrix
            .as_deref()
            .ok_or(ValidationError::MissingMatrix { matrix: "distance" })?;
        let durations = request
            .duration_matrix
            .as_deref()
            .ok_or(ValidationError::MissingMatrix { matrix: "duration" })?;
        let problem = self.build(request, distances, durations)?;
        self.solve(&problem)
    }

    /// Optimizes a request, fetching matrices from `provider`.
    ///
    /// Provider errors are returned unchanged; the call is not retried.
    #[instrument(skip_all, fields(stops = request.stops.len()))]
    pub fn optimize_with(
        &self,
        request: &OptimizationRequest,
        provider: &dyn MatrixProvider,
    ) -> Result<Solution, OptimizeError> {
        check_locations(request)?;
        let locations = request.locations();
        let matrices = provider.matrices(&locations).inspect_err(|e| {
            warn!(kind = %e.kind, "matrix provider failed");
        })?;
        validate_matrices(&matrices, locations.len())?;
        let problem = self.build(request, &matrices.distances, &matrices.durations)?;
        self.solve(&problem)
    }

    /// Searches a validated problem with the configured budget.
    pub fn solve(&self, problem: &Problem) -> Result<Solution, OptimizeError> {
        self.solve_with_cancel(problem, &CancelToken::new())
    }

    /// Like [`solve`](Self::solve), stopping early once `cancel` is set.
    ///
    /// Construction always completes; the budget and the token only cut the
    /// improvement phase short, and the best route found so far is returned.
    #[instrument(skip_all, fields(stops = problem.num_stops()))]
    pub fn solve_with_cancel(
        &self,
        problem: &Problem,
        cancel: &CancelToken,
    ) -> Result<Solution, OptimizeError> {
        let model = ConstraintModel::new(problem).with_time_windows(self.config.enforce_time_windows);
        let mut budget =
            SearchBudget::new(self.config.time_limit(), cancel, self.config.gls.check_interval);

        let initial = cheapest_insertion(&model)?;
        info!(
            cost = initial.cost(problem.distances()),
            elapsed_ms = budget.elapsed().as_millis() as u64,
            "initial route built"
        );

        let result = GlsRunner::run(&model, initial, &self.config.gls, &mut budget);
        if let Some((pos, resource)) = model.first_violation(&result.route) {
            return Err(InternalError::new(format!(
                "search returned a route violating {resource} at position {pos}"
            ))
            .into());
        }

        let metadata = SearchMetadata {
            elapsed: budget.elapsed(),
            termination: result.termination,
            iterations: result.iterations,
        };
        let solution = extract(&model, &result.route, &metadata)?;
        info!(
            distance_km = solution.total_distance_km,
            duration_min = solution.total_duration_minutes,
            status = %metadata.termination,
            "route optimized"
        );
        Ok(solution)
    }

    fn build(
        &self,
        request: &OptimizationRequest,
        distances: &[Vec<f64>],
        durations: &[Vec<f64>],
    ) -> Result<Problem, ValidationError> {
        self.builder().build(
            request.depot,
            &request.stops,
            distances,
            durations,
            request.vehicle_capacity,
            request.max_duration_minutes,
        )
    }
}

/// Rejects empty requests and bad coordinates before a provider is called.
fn check_locations(request: &OptimizationRequest) -> Result<(), ValidationError> {
    if request.stops.is_empty() {
        return Err(ValidationError::NoStops);
    }
    if !request.depot.is_valid() {
        return Err(ValidationError::InvalidLocation {
            id: DEPOT_ID.to_string(),
            lat: request.depot.lat,
            lon: request.depot.lon,
        });
    }
    if let Some(stop) = request.stops.iter().find(|s| !s.location().is_valid()) {
        return Err(ValidationError::InvalidLocation {
            id: stop.id.clone(),
            lat: stop.lat,
            lon: stop.lon,
        });
    }
    Ok(())
}
