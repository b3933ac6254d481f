//! Construction of the initial feasible route.
//!
//! - [`cheapest_insertion`] — cheapest feasible insertion, O(n³)

mod cheapest_insertion;

pub use cheapest_insertion::cheapest_insertion;
