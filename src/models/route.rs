//! Single-vehicle route as an index-addressed node sequence.

use crate::distance::ArcCost;

/// An ordered sequence of node indices that starts and ends at the depot.
///
/// Position 0 and the last position always hold node 0. With `n` stops the
/// route has `n + 2` positions. Moves address positions, not nodes.
///
/// # Examples
///
/// ```
/// use route_engine::models::Route;
///
/// let mut route = Route::new();
/// route.insert(1, 3);
/// route.insert(1, 2);
/// assert_eq!(route.nodes(), &[0, 2, 3, 0]);
/// assert_eq!(route.stops(), &[2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    nodes: Vec<usize>,
}

impl Default for Route {
    fn default() -> Self {
        Self::new()
    }
}

impl Route {
    /// Creates an empty route: depot → depot.
    pub fn new() -> Self {
        Self { nodes: vec![0, 0] }
    }

    /// Creates a route visiting `stops` in order.
    pub fn from_stops(stops: &[usize]) -> Self {
        let mut nodes = Vec::with_capacity(stops.len() + 2);
        nodes.push(0);
        nodes.extend_from_slice(stops);
        nodes.push(0);
        Self { nodes }
    }

    /// All positions including both depot visits.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Stops in visiting order (depot excluded).
    pub fn stops(&self) -> &[usize] {
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Node at position `pos`.
    pub fn node(&self, pos: usize) -> usize {
        self.nodes[pos]
    }

    /// Number of positions (`num_stops() + 2`).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stops.
    pub fn num_stops(&self) -> usize {
        self.nodes.len() - 2
    }

    /// Returns `true` if the route visits no stops.
    pub fn is_empty(&self) -> bool {
        self.num_stops() == 0
    }

    /// Inserts `node` so that it ends up at position `pos` (`1..len()`).
    pub fn insert(&mut self, pos: usize, node: usize) {
        debug_assert!(pos >= 1 && pos < self.nodes.len());
        self.nodes.insert(pos, node);
    }

    /// Moves the stop at position `from` so that it ends up at position `to`.
    pub fn relocate(&mut self, from: usize, to: usize) {
        let node = self.nodes.remove(from);
        self.nodes.insert(to, node);
    }

    /// Exchanges the stops at positions `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.nodes.swap(i, j);
    }

    /// Reverses the stops at positions `i..=j`.
    pub fn reverse(&mut self, i: usize, j: usize) {
        self.nodes[i..=j].reverse();
    }

    /// Consecutive `(from, to)` node pairs.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total cost of the route under `cost`.
    pub fn cost<C: ArcCost + ?Sized>(&self, cost: &C) -> f64 {
        self.arcs().map(|(a, b)| cost.arc(a, b)).sum()
    }

    /// Returns `true` if the route starts and ends at the depot and visits
    /// every node `1..num_nodes` exactly once.
    pub fn is_tour_of(&self, num_nodes: usize) -> bool {
        if self.nodes.len() != num_nodes + 1 || self.nodes[0] != 0 || self.nodes[num_nodes] != 0 {
            return false;
        }
        let mut seen = vec![false; num_nodes];
        for &node in self.stops() {
            if node == 0 || node >= num_nodes || seen[node] {
                return false;
            }
            seen[node] = true;
        }
        true
    }
}
