//! Guided local search execution loop.

use std::time::Duration;

use tracing::{debug, info, instrument, trace};

use super::budget::SearchBudget;
use super::config::GlsConfig;
use super::penalties::{EdgePenalties, PenalizedCost};
use crate::evaluation::{ConstraintModel, ResourceTrace};
use crate::local_search::{best_improving_move, PrefixCosts, Scan, IMPROVEMENT_EPS};
use crate::models::{Route, TerminationReason};

/// Result of a guided local search run.
#[derive(Debug, Clone)]
pub struct GlsResult {
    /// Best feasible route found.
    pub route: Route,
    /// Raw (unpenalized) distance of `route`.
    pub cost: f64,
    /// Why the search stopped.
    pub termination: TerminationReason,
    /// Accepted moves.
    pub iterations: usize,
    /// Local optima reached.
    pub local_optima: usize,
    /// Time spent in the search.
    pub elapsed: Duration,
}

/// Executes guided local search.
pub struct GlsRunner;

impl GlsRunner {
    /// Improves a feasible `initial` route until the budget runs out or the
    /// search converges.
    ///
    /// Each step applies the best feasible improving move under the
    /// penalized cost. At a local optimum the maximum-utility edges are
    /// penalized and the descent resumes. The best route by raw distance is
    /// kept throughout, so the result is never worse than `initial`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use route_engine::evaluation::ConstraintModel;
    /// use route_engine::gls::{CancelToken, GlsConfig, GlsRunner, SearchBudget};
    /// use route_engine::models::{Location, ProblemBuilder, Route, StopInput};
    ///
    /// let stops: Vec<StopInput> = (1..=3)
    ///     .map(|i| StopInput::new(format!("S{i}"), 1, 0.0, 0.0))
    ///     .collect();
    /// let pos = [0.0f64, 1000.0, 2000.0, 3000.0];
    /// let m: Vec<Vec<f64>> = pos.iter().map(|a| pos.iter().map(|b| (a - b).abs()).collect()).collect();
    /// let problem = ProblemBuilder::new()
    ///     .build(Location::new(0.0, 0.0), &stops, &m, &m, 10, 480)
    ///     .unwrap();
    /// let model = ConstraintModel::new(&problem);
    /// let token = CancelToken::new();
    /// let mut budget = SearchBudget::new(Duration::from_secs(10), &token, 64);
    ///
    /// let result = GlsRunner::run(&model, Route::from_stops(&[2, 1, 3]), &GlsConfig::default(), &mut budget);
    /// assert_eq!(result.cost, 6000.0);
    /// ```
    #[instrument(skip_all, fields(stops = initial.num_stops()))]
    pub fn run(
        model: &ConstraintModel<'_>,
        initial: Route,
        config: &GlsConfig,
        budget: &mut SearchBudget<'_>,
    ) -> GlsResult {
        let distances = model.problem().distances();
        let mut penalties = EdgePenalties::new(model.problem().num_nodes());
        // Plain descent until the first local optimum fixes the weight.
        let mut lambda = 0.0;

        let mut current = initial;
        let mut trace = ResourceTrace::new(model, &current);
        let mut prefix = PrefixCosts::new(&current, distances);

        let mut best = current.clone();
        let mut best_cost = current.cost(distances);
        let mut best_at_last_optimum = best_cost;

        let mut iterations = 0usize;
        let mut local_optima = 0usize;
        let mut stagnant = 0usize;

        info!(cost = best_cost, "search started");

        let termination = loop {
            if let Some(reason) = budget.check() {
                break reason;
            }

            let cost = PenalizedCost::new(distances, &penalties, lambda);
            match best_improving_move(&current, &prefix, &trace, model, &cost, || budget.tick()) {
                Scan::Interrupted => {
                    break budget.stopped().unwrap_or(TerminationReason::TimeLimit);
                }
                Scan::Improving(mv, _) => {
                    mv.apply(&mut current);
                    let (lo, _) = mv.affected();
                    prefix.rebuild_from(&current, &cost, lo);
                    trace.rebuild_from(model, &current, lo);
                    iterations += 1;

                    let raw = current.cost(distances);
                    if raw < best_cost - IMPROVEMENT_EPS {
                        best = current.clone();
                        best_cost = raw;
                        debug!(cost = best_cost, iterations, operator = mv.operator(), "new best");
                    }
                }
                Scan::LocalOptimum => {
                    local_optima += 1;
                    if best_cost < best_at_last_optimum - IMPROVEMENT_EPS || local_optima == 1 {
                        stagnant = 0;
                    } else {
                        stagnant += 1;
                    }
                    best_at_last_optimum = best_cost;

                    if current.num_stops() < 2 || stagnant >= config.max_stagnant_rounds {
                        break TerminationReason::Converged;
                    }
                    if local_optima == 1 {
                        let arcs = (current.len() - 1) as f64;
                        lambda = config.lambda_coefficient * current.cost(distances) / arcs;
                    }
                    let penalized = penalties.penalize(&current, distances);
                    if penalized == 0 {
                        break TerminationReason::Converged;
                    }
                    trace!(penalized, total = penalties.total(), lambda, "penalties updated");

                    let cost = PenalizedCost::new(distances, &penalties, lambda);
                    prefix = PrefixCosts::new(&current, &cost);
                }
            }
        };

        let elapsed = budget.elapsed();
        info!(
            cost = best_cost,
            %termination,
            iterations,
            local_optima,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );

        GlsResult {
            route: best,
            cost: best_cost,
            termination,
            iterations,
            local_optima,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::cheapest_insertion;
    use crate::gls::CancelToken;
    use crate::models::{Location, Problem, ProblemBuilder, StopInput};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Random Euclidean instance; 1 m = 1 s.
    fn random_problem(n: usize, seed: u64, capacity: i32) -> Problem {
        let mut rng = StdRng::seed_from_u64(seed);
        let pts: Vec<(f64, f64)> = (0..=n)
            .map(|_| (rng.random_range(0.0..3000.0), rng.random_range(0.0..3000.0)))
            .collect();
        let rows: Vec<Vec<f64>> = pts
            .iter()
            .map(|a| {
                pts.iter()
                    .map(|b| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt().round())
                    .collect()
            })
            .collect();
        let stops: Vec<StopInput> = (1..=n)
            .map(|i| StopInput::new(format!("S{i}"), rng.random_range(1..4), 0.0, 0.0))
            .collect();
        ProblemBuilder::new()
            .build(Location::new(0.0, 0.0), &stops, &rows, &rows, capacity, 480)
            .expect("valid")
    }

    fn run(problem: &Problem, limit: Duration, token: &CancelToken) -> (f64, GlsResult) {
        let model = ConstraintModel::new(problem);
        let initial = cheapest_insertion(&model).expect("feasible");
        let initial_cost = initial.cost(problem.distances());
        let config = GlsConfig::default().with_max_stagnant_rounds(20);
        let mut budget = SearchBudget::new(limit, token, config.check_interval);
        (initial_cost, GlsRunner::run(&model, initial, &config, &mut budget))
    }

    #[test]
    fn test_never_worse_than_initial_and_feasible() {
        let problem = random_problem(15, 7, 100);
        let (initial_cost, result) = run(&problem, Duration::from_secs(30), &CancelToken::new());
        assert!(result.cost <= initial_cost + 1e-9);
        assert!(result.route.is_tour_of(problem.num_nodes()));
        assert!(ConstraintModel::new(&problem).is_feasible(&result.route));
        assert!((result.route.cost(problem.distances()) - result.cost).abs() < 1e-6);
        assert_eq!(result.termination, TerminationReason::Converged);
        assert!(result.local_optima > 0);
    }

    #[test]
    fn test_zero_budget_returns_initial() {
        let problem = random_problem(10, 3, 100);
        let model = ConstraintModel::new(&problem);
        let initial = cheapest_insertion(&model).expect("feasible");
        let (_, result) = run(&problem, Duration::ZERO, &CancelToken::new());
        assert_eq!(result.termination, TerminationReason::TimeLimit);
        assert_eq!(result.route, initial);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_cancelled_before_start() {
        let problem = random_problem(10, 5, 100);
        let token = CancelToken::new();
        token.cancel();
        let (initial_cost, result) = run(&problem, Duration::from_secs(30), &token);
        assert_eq!(result.termination, TerminationReason::Cancelled);
        assert_eq!(result.cost, initial_cost);
    }

    #[test]
    fn test_single_stop_converges_immediately() {
        let problem = random_problem(1, 1, 10);
        let (_, result) = run(&problem, Duration::from_secs(30), &CancelToken::new());
        assert_eq!(result.termination, TerminationReason::Converged);
        assert_eq!(result.route.nodes(), &[0, 1, 0]);
        assert_eq!(result.local_optima, 1);
    }

    #[test]
    fn test_deterministic_when_converged() {
        let problem = random_problem(12, 11, 100);
        let (_, a) = run(&problem, Duration::from_secs(30), &CancelToken::new());
        let (_, b) = run(&problem, Duration::from_secs(30), &CancelToken::new());
        assert_eq!(a.route, b.route);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.local_optima, b.local_optima);
    }

    #[test]
    fn test_reaches_optimum_on_line() {
        // Stops on a line; any out-and-back order is optimal at 2 × 4000.
        let pos = [0.0f64, 4000.0, 1000.0, 3000.0, 2000.0];
        let rows: Vec<Vec<f64>> = pos
            .iter()
            .map(|a| pos.iter().map(|b| (a - b).abs()).collect())
            .collect();
        let stops: Vec<StopInput> = (1..=4)
            .map(|i| StopInput::new(format!("S{i}"), 1, 0.0, 0.0))
            .collect();
        let problem = ProblemBuilder::new()
            .build(Location::new(0.0, 0.0), &stops, &rows, &rows, 10, 480)
            .expect("valid");
        let model = ConstraintModel::new(&problem);
        let token = CancelToken::new();
        let mut budget = SearchBudget::new(Duration::from_secs(30), &token, 64);
        let result = GlsRunner::run(
            &model,
            Route::from_stops(&[1, 2, 3, 4]),
            &GlsConfig::default(),
            &mut budget,
        );
        assert_eq!(result.cost, 8000.0);
    }
}
