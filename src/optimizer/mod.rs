//! Optimizer facade.
//!
//! [`RouteOptimizer`] validates a request, obtains matrices, builds the
//! initial route, improves it and converts the result. It holds
//! [`OptimizerConfig`] only.

mod config;
mod service;

pub use config::OptimizerConfig;
pub use service::RouteOptimizer;
