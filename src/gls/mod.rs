//! Guided Local Search (GLS).
//!
//! A trajectory metaheuristic that escapes local optima by penalizing the
//! features of the solutions it gets stuck in. Here the features are directed
//! edges: at every local optimum the edges with maximum utility
//! `cost / (1 + penalty)` receive one more penalty, and moves are evaluated
//! under `cost + λ·penalty` while the reported cost stays the raw one.
//!
//! # References
//!
//! - Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//!   application to the traveling salesman problem", *European Journal of
//!   Operational Research* 113(2), 469-499.

mod budget;
mod config;
mod penalties;
mod runner;

pub use budget::{CancelToken, SearchBudget};
pub use config::GlsConfig;
pub use penalties::{EdgePenalties, PenalizedCost};
pub use runner::{GlsResult, GlsRunner};
