//! Campus graph representation and builder.
//!
//! # Data layout
//!
//! Outgoing edges are stored in **Compressed Sparse Row (CSR)** form.  For a
//! `LocationId n` its outgoing edges are the `EdgeId`s
//!
//! ```text
//! node_out_start[n] .. node_out_start[n+1]
//! ```
//!
//! Edges are grouped by source with a *stable* sort, so within one source
//! they keep the order in which they were added.  Dijkstra scans them in
//! that order, which is what makes equal-length alternatives resolve to the
//! first inserted edge.
//!
//! # Identity
//!
//! Locations are identified by `LocationId` (dense, assigned in insertion
//! order) and looked up by name.  Map points are attributes: the R-tree only
//! answers "which location is nearest to this point", never "which location
//! *is* this point".

use std::collections::VecDeque;

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use campus_core::{EdgeId, LocationId, MapPoint, SegmentId};

use crate::{GraphError, GraphResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct LocationEntry {
    point: [f32; 2], // [x, y]
    id:    LocationId,
}

impl RTreeObject for LocationEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for LocationEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── EdgeRef ───────────────────────────────────────────────────────────────────

/// A copied-out view of one directed edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeRef {
    pub id:        EdgeId,
    pub from:      LocationId,
    pub to:        LocationId,
    /// Path-finding weight.
    pub length:    f64,
    /// Seconds needed to traverse at constant pace.  Always `> 0`.
    pub time_cost: f64,
    pub segment:   SegmentId,
}

// ── CampusGraph ───────────────────────────────────────────────────────────────

/// Immutable directed campus graph.  Build with [`CampusGraphBuilder`].
pub struct CampusGraph {
    // ── Location data (indexed by LocationId) ─────────────────────────────
    pub location_names:  Vec<String>,
    pub location_points: Vec<MapPoint>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Length = `location_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    pub edge_from:      Vec<LocationId>,
    pub edge_to:        Vec<LocationId>,
    pub edge_length:    Vec<f64>,
    pub edge_time_cost: Vec<f64>,
    pub edge_segment:   Vec<SegmentId>,

    name_index:  FxHashMap<String, LocationId>,
    spatial_idx: RTree<LocationEntry>,
}

impl CampusGraph {
    /// A graph with no locations.  Every route request against it fails.
    pub fn empty() -> Self {
        CampusGraphBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn location_count(&self) -> usize {
        self.location_names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.location_names.is_empty()
    }

    #[inline]
    pub fn contains(&self, loc: LocationId) -> bool {
        loc.index() < self.location_count()
    }

    // ── Locations ─────────────────────────────────────────────────────────

    /// Resolve a location name.
    pub fn location_id(&self, name: &str) -> Option<LocationId> {
        self.name_index.get(name).copied()
    }

    /// Like [`location_id`](Self::location_id) but returns a typed error.
    pub fn require_location(&self, name: &str) -> GraphResult<LocationId> {
        self.location_id(name)
            .ok_or_else(|| GraphError::UnknownLocationName(name.to_owned()))
    }

    pub fn name(&self, loc: LocationId) -> &str {
        &self.location_names[loc.index()]
    }

    pub fn point(&self, loc: LocationId) -> MapPoint {
        self.location_points[loc.index()]
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// Outgoing edges of `loc`, in insertion order.
    #[inline]
    pub fn out_edges(&self, loc: LocationId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[loc.index()] as usize;
        let end   = self.node_out_start[loc.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, loc: LocationId) -> usize {
        let start = self.node_out_start[loc.index()] as usize;
        let end   = self.node_out_start[loc.index() + 1] as usize;
        end - start
    }

    pub fn edge(&self, id: EdgeId) -> EdgeRef {
        let i = id.index();
        EdgeRef {
            id,
            from:      self.edge_from[i],
            to:        self.edge_to[i],
            length:    self.edge_length[i],
            time_cost: self.edge_time_cost[i],
            segment:   self.edge_segment[i],
        }
    }

    /// First edge (in insertion order) from `from` to `to`, if any.
    pub fn edge_between(&self, from: LocationId, to: LocationId) -> Option<EdgeId> {
        if !self.contains(from) {
            return None;
        }
        self.out_edges(from).find(|e| self.edge_to[e.index()] == to)
    }

    /// Point at `fraction ∈ [0, 1]` along `edge` from its source.
    pub fn point_on_edge(&self, edge: EdgeId, fraction: f32) -> MapPoint {
        let from = self.point(self.edge_from[edge.index()]);
        let to   = self.point(self.edge_to[edge.index()]);
        from.lerp(to, fraction)
    }

    // ── Reachability ──────────────────────────────────────────────────────

    /// `true` if some directed chain of edges leads from `from` to `to`.
    ///
    /// Breadth-first search, independent of the weighted path-finder, so
    /// callers can tell "unreachable" apart from "already there".
    pub fn is_reachable(&self, from: LocationId, to: LocationId) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        if from == to {
            return true;
        }
        let mut seen = vec![false; self.location_count()];
        let mut queue = VecDeque::from([from]);
        seen[from.index()] = true;
        while let Some(loc) = queue.pop_front() {
            for e in self.out_edges(loc) {
                let next = self.edge_to[e.index()];
                if next == to {
                    return true;
                }
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The location nearest to `point`.  `None` only for an empty graph.
    ///
    /// When several locations share the nearest point the choice among them
    /// is unspecified; use [`locations_at`](Self::locations_at) to see all.
    pub fn nearest_location(&self, point: MapPoint) -> Option<LocationId> {
        self.spatial_idx
            .nearest_neighbor(&[point.x, point.y])
            .map(|e| e.id)
    }

    /// Every location whose point equals `point`, in id order.
    pub fn locations_at(&self, point: MapPoint) -> Vec<LocationId> {
        let mut ids: Vec<LocationId> = self
            .spatial_idx
            .locate_all_at_point(&[point.x, point.y])
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

// ── CampusGraphBuilder ────────────────────────────────────────────────────────

/// Construct a [`CampusGraph`] incrementally, then call [`build`](Self::build).
///
/// Every insertion is validated immediately, so `build()` itself cannot fail.
///
/// # Example
///
/// ```
/// use campus_core::{MapPoint, SegmentId};
/// use campus_graph::CampusGraphBuilder;
///
/// let mut b = CampusGraphBuilder::new();
/// let dorm = b.add_location("Dorm", MapPoint::new(0.1, 0.2)).unwrap();
/// let lib  = b.add_location("Library", MapPoint::new(0.5, 0.5)).unwrap();
/// b.add_segment(SegmentId(1), dorm, lib, 120.0, 90.0).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.location_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // one per direction
/// ```
pub struct CampusGraphBuilder {
    names:      Vec<String>,
    points:     Vec<MapPoint>,
    name_index: FxHashMap<String, LocationId>,
    raw_edges:  Vec<RawEdge>,
}

struct RawEdge {
    from:      LocationId,
    to:        LocationId,
    length:    f64,
    time_cost: f64,
    segment:   SegmentId,
}

impl CampusGraphBuilder {
    pub fn new() -> Self {
        Self {
            names:      Vec::new(),
            points:     Vec::new(),
            name_index: FxHashMap::default(),
            raw_edges:  Vec::new(),
        }
    }

    pub fn with_capacity(locations: usize, edges: usize) -> Self {
        Self {
            names:      Vec::with_capacity(locations),
            points:     Vec::with_capacity(locations),
            name_index: FxHashMap::with_capacity_and_hasher(locations, Default::default()),
            raw_edges:  Vec::with_capacity(edges),
        }
    }

    /// Add a named location and return its `LocationId` (sequential from 0).
    pub fn add_location(&mut self, name: &str, point: MapPoint) -> GraphResult<LocationId> {
        if self.name_index.contains_key(name) {
            return Err(GraphError::DuplicateLocation(name.to_owned()));
        }
        if !point.is_normalized() {
            return Err(GraphError::InvalidPoint { name: name.to_owned(), point });
        }
        let id = LocationId(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.points.push(point);
        self.name_index.insert(name.to_owned(), id);
        Ok(id)
    }

    pub fn location_id(&self, name: &str) -> Option<LocationId> {
        self.name_index.get(name).copied()
    }

    /// Add one **directed** edge.
    pub fn add_directed_edge(
        &mut self,
        segment:   SegmentId,
        from:      LocationId,
        to:        LocationId,
        length:    f64,
        time_cost: f64,
    ) -> GraphResult<()> {
        self.check_location(from)?;
        self.check_location(to)?;
        if !(length >= 0.0 && length.is_finite() && time_cost > 0.0 && time_cost.is_finite()) {
            return Err(GraphError::InvalidEdge { segment, length, time_cost });
        }
        self.raw_edges.push(RawEdge { from, to, length, time_cost, segment });
        Ok(())
    }

    /// Add a bidirectional path segment as two directed edges with identical
    /// length and time cost.
    pub fn add_segment(
        &mut self,
        segment:   SegmentId,
        a:         LocationId,
        b:         LocationId,
        length:    f64,
        time_cost: f64,
    ) -> GraphResult<()> {
        self.add_directed_edge(segment, a, b, length, time_cost)?;
        self.add_directed_edge(segment, b, a, length, time_cost)
    }

    /// [`add_segment`](Self::add_segment) with endpoints given by name.
    pub fn add_segment_by_name(
        &mut self,
        segment:   SegmentId,
        a:         &str,
        b:         &str,
        length:    f64,
        time_cost: f64,
    ) -> GraphResult<()> {
        let a = self
            .location_id(a)
            .ok_or_else(|| GraphError::UnknownLocationName(a.to_owned()))?;
        let b = self
            .location_id(b)
            .ok_or_else(|| GraphError::UnknownLocationName(b.to_owned()))?;
        self.add_segment(segment, a, b, length, time_cost)
    }

    pub fn location_count(&self) -> usize { self.names.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`CampusGraph`].
    pub fn build(self) -> CampusGraph {
        let node_count = self.names.len();

        // Stable: edges from the same source keep their insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:      Vec<LocationId> = raw.iter().map(|e| e.from).collect();
        let edge_to:        Vec<LocationId> = raw.iter().map(|e| e.to).collect();
        let edge_length:    Vec<f64>        = raw.iter().map(|e| e.length).collect();
        let edge_time_cost: Vec<f64>        = raw.iter().map(|e| e.time_cost).collect();
        let edge_segment:   Vec<SegmentId>  = raw.iter().map(|e| e.segment).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        let entries: Vec<LocationEntry> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| LocationEntry { point: [p.x, p.y], id: LocationId(i as u32) })
            .collect();

        CampusGraph {
            location_names:  self.names,
            location_points: self.points,
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
            edge_time_cost,
            edge_segment,
            name_index:      self.name_index,
            spatial_idx:     RTree::bulk_load(entries),
        }
    }

    fn check_location(&self, loc: LocationId) -> GraphResult<()> {
        if loc.index() < self.names.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownLocation(loc))
        }
    }
}

impl Default for CampusGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
