//! # route-engine
//!
//! Single-vehicle delivery route optimization: a depot, a set of stops with
//! demands, a capacity and a maximum route duration. An initial route is
//! built by cheapest feasible insertion and improved by guided local search
//! under a wall-clock budget.
//!
//! ## Modules
//!
//! - [`models`] — Request, problem, route and solution types
//! - [`distance`] — Cost matrices and matrix providers
//! - [`evaluation`] — Load, duration and time-window feasibility
//! - [`constructive`] — Cheapest insertion
//! - [`local_search`] — Relocate, swap and 2-opt moves with O(1) deltas
//! - [`gls`] — Guided local search, search budget and cancellation
//! - [`extraction`] — Route to segments, totals and solver info
//! - [`optimizer`] — [`RouteOptimizer`] facade and [`OptimizerConfig`]
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use route_engine::distance::HaversineProvider;
//! use route_engine::models::{Location, OptimizationRequest, StopInput};
//! use route_engine::RouteOptimizer;
//!
//! let request = OptimizationRequest::new(
//!     Location::new(33.573, -7.590),
//!     vec![
//!         StopInput::new("A", 2, 33.588, -7.611),
//!         StopInput::new("B", 3, 33.560, -7.620),
//!         StopInput::new("C", 1, 33.600, -7.580),
//!     ],
//! );
//! let solution = RouteOptimizer::default()
//!     .optimize_with(&request, &HaversineProvider::default())
//!     .unwrap();
//! assert_eq!(solution.optimized_sequence.len(), 3);
//! assert_eq!(solution.route_segments.len(), 4);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod extraction;
pub mod gls;
pub mod local_search;
pub mod models;
pub mod optimizer;

pub use error::OptimizeError;
pub use gls::CancelToken;
pub use optimizer::{OptimizerConfig, RouteOptimizer};
