//! Path-finding trait and the default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The simulation requests routes through the [`PathFinder`] trait, so an
//! application can swap in A* or a congestion-aware finder without touching
//! the agent state machine.
//!
//! # Weights
//!
//! Routes minimise the summed edge `length`.  `time_cost` is carried along
//! in [`Route::total_time_secs`] but never used as a weight.
//!
//! # Determinism
//!
//! Frontier entries are ordered by `(distance, sequence number)`, where the
//! sequence number increases with every push.  Two entries at equal distance
//! therefore pop in the order they were discovered; location coordinates
//! never take part in the comparison.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use campus_core::{EdgeId, LocationId};

use crate::{CampusGraph, GraphError, GraphResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered chain of edges from a source to a destination.
///
/// A route is immutable once computed; travellers keep their own index into
/// `edges` rather than popping from the front.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub edges: Vec<EdgeId>,
    /// Sum of edge lengths.
    pub total_length: f64,
    /// Sum of edge time costs, in seconds.
    pub total_time_secs: f64,
}

impl Route {
    /// Build a route from an edge chain, summing its length and time cost.
    pub fn from_edges(graph: &CampusGraph, edges: Vec<EdgeId>) -> Self {
        let total_length    = edges.iter().map(|e| graph.edge_length[e.index()]).sum();
        let total_time_secs = edges.iter().map(|e| graph.edge_time_cost[e.index()]).sum();
        Self { edges, total_length, total_time_secs }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge at position `i`, or `None` past the end.
    #[inline]
    pub fn edge(&self, i: usize) -> Option<EdgeId> {
        self.edges.get(i).copied()
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable route computation.
///
/// Implementations must be `Send + Sync`: agents may request routes from
/// several Rayon workers at once.
pub trait PathFinder: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields an empty route.  An unreachable destination is
    /// [`GraphError::NoRoute`], never an empty route.
    fn route(&self, graph: &CampusGraph, from: LocationId, to: LocationId) -> GraphResult<Route>;
}

// ── DijkstraPathFinder ────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the CSR graph, weighted by edge length.
/// O((V + E) log V).
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPathFinder;

impl PathFinder for DijkstraPathFinder {
    fn route(&self, graph: &CampusGraph, from: LocationId, to: LocationId) -> GraphResult<Route> {
        let edges = dijkstra(graph, from, to)?;
        Ok(Route::from_edges(graph, edges))
    }
}

/// Shortest edge chain from `start` to `end`.
///
/// Returns an empty sequence both when `start == end` and when `end` cannot
/// be reached.  Callers that need to tell the two apart compare the
/// endpoints first or ask [`CampusGraph::is_reachable`].
pub fn shortest_path(graph: &CampusGraph, start: LocationId, end: LocationId) -> Vec<EdgeId> {
    dijkstra(graph, start, end).unwrap_or_default()
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Frontier entry: `(distance, sequence, location)`.  `Reverse` turns the
/// max-heap into a min-heap; `sequence` is unique so `location` never
/// decides an ordering.
type Frontier = BinaryHeap<Reverse<(OrderedFloat<f64>, u64, LocationId)>>;

fn dijkstra(graph: &CampusGraph, from: LocationId, to: LocationId) -> GraphResult<Vec<EdgeId>> {
    if !graph.contains(from) {
        return Err(GraphError::UnknownLocation(from));
    }
    if !graph.contains(to) {
        return Err(GraphError::UnknownLocation(to));
    }
    if from == to {
        return Ok(Vec::new());
    }

    let n = graph.location_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];
    let mut settled   = vec![false; n];

    let mut seq: u64 = 0;
    let mut heap: Frontier = BinaryHeap::new();
    dist[from.index()] = 0.0;
    heap.push(Reverse((OrderedFloat(0.0), seq, from)));

    while let Some(Reverse((OrderedFloat(cost), _, loc))) = heap.pop() {
        if settled[loc.index()] {
            continue;
        }
        settled[loc.index()] = true;

        if loc == to {
            return Ok(reconstruct(graph, &prev_edge, to));
        }

        for edge in graph.out_edges(loc) {
            let next = graph.edge_to[edge.index()];
            if settled[next.index()] {
                continue;
            }
            let candidate = cost + graph.edge_length[edge.index()];
            // Strict: the first edge found at a given distance keeps the slot.
            if candidate < dist[next.index()] {
                dist[next.index()] = candidate;
                prev_edge[next.index()] = edge;
                seq += 1;
                heap.push(Reverse((OrderedFloat(candidate), seq, next)));
            }
        }
    }

    Err(GraphError::NoRoute { from, to })
}

fn reconstruct(graph: &CampusGraph, prev_edge: &[EdgeId], to: LocationId) -> Vec<EdgeId> {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = graph.edge_from[e.index()];
    }
    edges.reverse();
    edges
}
