//! Route feasibility checking.
//!
//! - [`ConstraintModel`] — load, duration and time-window rules
//! - [`ResourceTrace`] — cumulative resource values per route position

mod evaluator;
mod trace;

pub use evaluator::{ConstraintModel, Step};
pub use trace::ResourceTrace;
