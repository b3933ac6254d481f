//! Distance and travel time matrices.
//!
//! Provides the dense [`CostMatrix`], the [`ArcCost`] abstraction used by
//! move evaluation, and the [`MatrixProvider`] collaborator contract.

mod matrix;
mod provider;

pub use matrix::{ArcCost, CostMatrix};
pub use provider::{
    validate_matrices, HaversineProvider, MatrixProvider, Matrices, ProviderError,
    ProviderErrorKind,
};
