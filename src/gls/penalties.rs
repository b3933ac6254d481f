//! Edge penalties and the penalized arc cost.

use crate::distance::{ArcCost, CostMatrix};
use crate::models::Route;

/// Penalty counter per directed edge.
#[derive(Debug, Clone)]
pub struct EdgePenalties {
    counts: Vec<u32>,
    size: usize,
}

impl EdgePenalties {
    /// Creates zeroed counters for `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            counts: vec![0; size * size],
            size,
        }
    }

    /// Penalty of the edge `from → to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> u32 {
        self.counts[from * self.size + to]
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Penalizes the edges of `route` with maximum utility
    /// `cost(e) / (1 + penalty(e))`.
    ///
    /// Returns the number of edges penalized; zero when no edge has
    /// positive utility.
    pub fn penalize(&mut self, route: &Route, distances: &CostMatrix) -> usize {
        let utility = |p: &Self, a: usize, b: usize| distances.get(a, b) / (1.0 + f64::from(p.get(a, b)));

        let max = route
            .arcs()
            .map(|(a, b)| utility(self, a, b))
            .fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return 0;
        }

        let selected: Vec<(usize, usize)> = route
            .arcs()
            .filter(|&(a, b)| utility(self, a, b) >= max * (1.0 - 1e-12))
            .collect();
        for &(a, b) in &selected {
            let slot = &mut self.counts[a * self.size + b];
            *slot = slot.saturating_add(1);
        }
        selected.len()
    }
}

/// Raw cost plus `lambda` times the edge penalty.
#[derive(Debug, Clone, Copy)]
pub struct PenalizedCost<'a> {
    distances: &'a CostMatrix,
    penalties: &'a EdgePenalties,
    lambda: f64,
}

impl<'a> PenalizedCost<'a> {
    pub fn new(distances: &'a CostMatrix, penalties: &'a EdgePenalties, lambda: f64) -> Self {
        Self {
            distances,
            penalties,
            lambda,
        }
    }
}

impl ArcCost for PenalizedCost<'_> {
    #[inline]
    fn arc(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to) + self.lambda * f64::from(self.penalties.get(from, to))
    }
}
