//! Route moves addressed by position.
//!
//! A move describes the route it would produce without building it:
//! [`Move::node_at`] maps a position of the resulting route to a node, and
//! [`Move::affected`] bounds the positions whose node differs from the
//! current route. This lets feasibility and cost checks replay only the
//! changed part of a route.

use super::{exchange, relocate, two_opt, PrefixCosts};
use crate::distance::ArcCost;
use crate::models::Route;

/// A candidate change to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Insert an unrouted `node` so it ends up at position `pos`.
    Insert { node: usize, pos: usize },
    /// Move the stop at position `from` so it ends up at position `to`.
    Relocate { from: usize, to: usize },
    /// Exchange the stops at positions `i < j`.
    Swap { i: usize, j: usize },
    /// Reverse the stops at positions `i..=j`, `i < j`.
    TwoOpt { i: usize, j: usize },
}

impl Move {
    /// Number of positions of the route after this move.
    pub fn resulting_len(&self, route: &Route) -> usize {
        match self {
            Move::Insert { .. } => route.len() + 1,
            _ => route.len(),
        }
    }

    /// First and last position (in the resulting route) whose node changes.
    pub fn affected(&self) -> (usize, usize) {
        match *self {
            Move::Insert { pos, .. } => (pos, pos),
            Move::Relocate { from, to } => (from.min(to), from.max(to)),
            Move::Swap { i, j } | Move::TwoOpt { i, j } => (i, j),
        }
    }

    /// Node at position `k` of the resulting route.
    pub fn node_at(&self, route: &Route, k: usize) -> usize {
        match *self {
            Move::Insert { node, pos } => match k {
                k if k < pos => route.node(k),
                k if k == pos => node,
                k => route.node(k - 1),
            },
            Move::Relocate { from, to } if from < to => match k {
                k if k < from || k > to => route.node(k),
                k if k == to => route.node(from),
                k => route.node(k + 1),
            },
            Move::Relocate { from, to } => match k {
                k if k < to || k > from => route.node(k),
                k if k == to => route.node(from),
                k => route.node(k - 1),
            },
            Move::Swap { i, j } => match k {
                k if k == i => route.node(j),
                k if k == j => route.node(i),
                k => route.node(k),
            },
            Move::TwoOpt { i, j } => {
                if (i..=j).contains(&k) {
                    route.node(i + j - k)
                } else {
                    route.node(k)
                }
            }
        }
    }

    /// Position in the current route that holds the same node as position
    /// `k` of the resulting route, for `k` past the affected range.
    pub fn origin_of(&self, k: usize) -> usize {
        match self {
            Move::Insert { .. } => k - 1,
            _ => k,
        }
    }

    /// Cost change of applying this move under `cost`.
    ///
    /// `prefix` must hold the prefix sums of `route` under the same `cost`.
    pub fn delta<C: ArcCost + ?Sized>(&self, route: &Route, prefix: &PrefixCosts, cost: &C) -> f64 {
        match *self {
            Move::Insert { node, pos } => {
                let prev = route.node(pos - 1);
                let next = route.node(pos);
                cost.arc(prev, node) + cost.arc(node, next) - cost.arc(prev, next)
            }
            Move::Relocate { from, to } => relocate::relocate_delta(route, from, to, cost),
            Move::Swap { i, j } => exchange::swap_delta(route, i, j, cost),
            Move::TwoOpt { i, j } => two_opt::two_opt_delta(route, prefix, i, j, cost),
        }
    }

    /// Applies this move to `route`.
    pub fn apply(&self, route: &mut Route) {
        match *self {
            Move::Insert { node, pos } => route.insert(pos, node),
            Move::Relocate { from, to } => route.relocate(from, to),
            Move::Swap { i, j } => route.swap(i, j),
            Move::TwoOpt { i, j } => route.reverse(i, j),
        }
    }

    /// Short operator name, for logging.
    pub fn operator(&self) -> &'static str {
        match self {
            Move::Insert { .. } => "insert",
            Move::Relocate { .. } => "relocate",
            Move::Swap { .. } => "swap",
            Move::TwoOpt { .. } => "2-opt",
        }
    }
}
