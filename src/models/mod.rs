//! Domain model types for single-vehicle routing.
//!
//! Provides locations and time windows, the raw request shape, the
//! validated immutable [`Problem`], routes as position-addressed node
//! sequences, and the solution returned to callers.

mod node;
mod problem;
mod request;
mod route;
mod solution;

pub use node::{Location, Node, TimeWindow, DEPOT_ID};
pub use problem::{Problem, ProblemBuilder};
pub use request::{OptimizationRequest, StopInput};
pub use route::Route;
pub use solution::{RouteSegment, SequencedStop, Solution, SolverInfo, TerminationReason};
