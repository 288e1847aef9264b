//! Waypoint graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for neighbor lists.
//! Given a `NodeId n`, its neighbors occupy the slice:
//!
//! ```text
//! adj[ adj_start[n] .. adj_start[n+1] ]
//! ```
//!
//! Edges are undirected by construction: every link is stored in both
//! endpoints' rows, so the symmetry invariant (`B ∈ adj(A) ⇔ A ∈ adj(B)`)
//! holds for any graph a `GraphBuilder` can produce.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over node positions answers the two window
//! queries the engine needs: cross-link candidate lookup during `build()`,
//! and end-node selection within the routing tolerance.
//!
//! # Lifetime
//!
//! Graphs are per-event throwaways.  Every routing event rebuilds from the
//! obstacle set's current bounding boxes; nothing is reused or patched.

use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::FxHashSet;

use wisp_core::{ElementId, NodeId, Point, Rect, WispError, WispResult};

// ── GraphConfig ───────────────────────────────────────────────────────────────

/// Graph-construction parameters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphConfig {
    /// Horizontal distance between consecutive samples along an obstacle's
    /// top edge.  Default: 8 px.
    pub sample_spacing: f32,

    /// How far above an obstacle's top edge its samples sit.  Default: 16 px.
    pub sample_rise: f32,

    /// Cross-link candidate window: another element's node qualifies when
    /// both `|dx|` and `|dy|` are strictly below this.  Axis-independent,
    /// not a Euclidean radius.  Default: 100 px.
    pub link_window: f32,

    /// Maximum cross-element links added per node.  The cap is global per
    /// node, not per neighboring element — a node adjacent to many elements
    /// may starve a nearby single element of links.  Routing shapes depend
    /// on this asymmetry; keep it.  Default: 6.
    pub max_cross_links: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            sample_spacing:  8.0,
            sample_rise:     16.0,
            link_window:     100.0,
            max_cross_links: 6,
        }
    }
}

impl GraphConfig {
    /// Reject configurations the builder cannot sample with.
    pub fn validate(&self) -> WispResult<()> {
        if !(self.sample_spacing > 0.0) {
            return Err(WispError::Config(format!(
                "sample_spacing must be > 0, got {}",
                self.sample_spacing
            )));
        }
        if !(self.link_window > 0.0) {
            return Err(WispError::Config(format!(
                "link_window must be > 0, got {}",
                self.link_window
            )));
        }
        Ok(())
    }
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, y]` point with the
/// associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

// ── WaypointGraph ─────────────────────────────────────────────────────────────

/// Undirected waypoint graph in CSR format plus a spatial index for window
/// queries.
///
/// All array fields are `pub` for direct indexed access on the routing hot
/// path.  Do not construct directly; use [`GraphBuilder`].
pub struct WaypointGraph {
    /// Position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    /// The obstacle element each node was sampled from.  Used only to
    /// exclude same-element pairs from cross-linking — an associative link,
    /// never ownership.
    pub node_elem: Vec<ElementId>,

    /// CSR row pointer.  Neighbors of node `n` are
    /// `adj[adj_start[n] .. adj_start[n+1]]`.  Length = `node_count + 1`.
    pub adj_start: Vec<u32>,

    /// Concatenated neighbor lists.  Each undirected link appears twice,
    /// once per endpoint.
    pub adj: Vec<NodeId>,

    spatial_idx: RTree<NodeEntry>,
}

impl WaypointGraph {
    /// A graph with no nodes — what an empty obstacle set builds to.
    pub fn empty() -> Self {
        GraphBuilder::new(GraphConfig::default()).build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of undirected links (each stored twice in `adj`).
    pub fn link_count(&self) -> usize {
        self.adj.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the neighbors of `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.adj_start[node.index()] as usize;
        let end   = self.adj_start[node.index() + 1] as usize;
        self.adj[start..end].iter().copied()
    }

    /// Degree of `node` (number of neighbors).
    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        let start = self.adj_start[node.index()] as usize;
        let end   = self.adj_start[node.index() + 1] as usize;
        end - start
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node with minimum Manhattan distance to `p` — the conventional
    /// start node for routing.  Ties go to the lower `NodeId`.
    ///
    /// Returns `None` only if the graph has no nodes (the NoStartNode
    /// condition; the caller aborts routing for the event).
    pub fn nearest_node(&self, p: Point) -> Option<NodeId> {
        self.node_pos
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.manhattan(p).total_cmp(&b.manhattan(p)))
            .map(|(i, _)| NodeId(i as u32))
    }

    /// The node nearest to `p` (Manhattan) among those strictly within `tol`
    /// of `p` on both axes — end-node selection.  `None` when no node
    /// qualifies (the NoRouteTarget condition).
    pub fn node_within(&self, p: Point, tol: f32) -> Option<NodeId> {
        let envelope = AABB::from_corners([p.x - tol, p.y - tol], [p.x + tol, p.y + tol]);
        self.spatial_idx
            .locate_in_envelope(&envelope)
            .filter(|e| self.node_pos[e.id.index()].within(p, tol, tol))
            .min_by(|a, b| {
                let da = self.node_pos[a.id.index()].manhattan(p);
                let db = self.node_pos[b.id.index()].manhattan(p);
                da.total_cmp(&db).then(a.id.cmp(&b.id))
            })
            .map(|e| e.id)
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`WaypointGraph`] from obstacle bounding boxes, then call
/// [`build`](Self::build).
///
/// `add_obstacle` samples and chains one element's top edge; `build()` runs
/// the cross-link pass, finalizes the CSR arrays, and bulk-loads the R-tree.
///
/// # Example
///
/// ```
/// use wisp_core::{ElementId, Point, Rect};
/// use wisp_spatial::{GraphBuilder, GraphConfig};
///
/// let mut b = GraphBuilder::new(GraphConfig::default());
/// b.add_obstacle(ElementId(0), Rect::new(0.0, 100.0, 80.0, 24.0));
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 11); // ceil(80/8) + 1
/// assert_eq!(graph.node_pos[0], Point::new(0.0, 84.0));
/// ```
pub struct GraphBuilder {
    config:    GraphConfig,
    node_pos:  Vec<Point>,
    node_elem: Vec<ElementId>,
    adjacency: Vec<Vec<NodeId>>,
    /// Ordered node pairs already linked, so mirroring never duplicates an
    /// edge when both endpoints pick each other in the cross-link pass.
    seen:      FxHashSet<(NodeId, NodeId)>,
}

impl GraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid GraphConfig");
        Self {
            config,
            node_pos:  Vec::new(),
            node_elem: Vec::new(),
            adjacency: Vec::new(),
            seen:      FxHashSet::default(),
        }
    }

    /// Sample `bounds`' top edge and chain the samples.
    ///
    /// Samples sit `sample_rise` above the top edge at offsets
    /// `0, S, 2S, …` strictly below `width`, plus one final sample exactly
    /// at the right edge — the last segment may be shorter than the spacing,
    /// which keeps both corners represented for any width.  For width `W`
    /// this yields `ceil(W / S) + 1` samples.  Consecutive samples are
    /// linked into a path.
    pub fn add_obstacle(&mut self, element: ElementId, bounds: Rect) {
        let y = bounds.y - self.config.sample_rise;
        let mut prev: Option<NodeId> = None;

        let mut i: u32 = 0;
        loop {
            let off = i as f32 * self.config.sample_spacing;
            if off >= bounds.width {
                break;
            }
            let id = self.add_node(element, Point::new(bounds.x + off, y));
            if let Some(p) = prev {
                self.link(p, id);
            }
            prev = Some(id);
            i += 1;
        }

        let last = self.add_node(element, Point::new(bounds.right(), y));
        if let Some(p) = prev {
            self.link(p, last);
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Consume the builder: cross-link nodes across elements, then produce a
    /// [`WaypointGraph`].
    ///
    /// Cross-linking: for every node, candidates are nodes of a *different*
    /// element strictly within `link_window` on both axes, sorted by
    /// Manhattan distance ascending; the nearest `max_cross_links` are
    /// linked (mirrored on both endpoints).
    pub fn build(mut self) -> WaypointGraph {
        let entries: Vec<NodeEntry> = self
            .node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.x, pos.y],
                id: NodeId(i as u32),
            })
            .collect();
        // Bulk-load for O(N log N) construction (faster than N inserts).
        let spatial_idx = RTree::bulk_load(entries);

        let w = self.config.link_window;
        for i in 0..self.node_pos.len() {
            let node = NodeId(i as u32);
            let p = self.node_pos[i];
            let envelope = AABB::from_corners([p.x - w, p.y - w], [p.x + w, p.y + w]);

            let mut candidates: Vec<NodeId> = spatial_idx
                .locate_in_envelope(&envelope)
                .filter(|e| {
                    e.id != node
                        && self.node_elem[e.id.index()] != self.node_elem[i]
                        && self.node_pos[e.id.index()].within(p, w, w)
                })
                .map(|e| e.id)
                .collect();

            candidates.sort_by(|&a, &b| {
                let da = self.node_pos[a.index()].manhattan(p);
                let db = self.node_pos[b.index()].manhattan(p);
                da.total_cmp(&db).then(a.cmp(&b))
            });

            for &other in candidates.iter().take(self.config.max_cross_links) {
                self.link(node, other);
            }
        }

        // Finalize CSR arrays.
        let mut adj_start = Vec::with_capacity(self.node_pos.len() + 1);
        let mut adj = Vec::new();
        adj_start.push(0u32);
        for row in &self.adjacency {
            adj.extend_from_slice(row);
            adj_start.push(adj.len() as u32);
        }

        WaypointGraph {
            node_pos:  self.node_pos,
            node_elem: self.node_elem,
            adj_start,
            adj,
            spatial_idx,
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn add_node(&mut self, element: ElementId, pos: Point) -> NodeId {
        let id = NodeId(self.node_pos.len() as u32);
        self.node_pos.push(pos);
        self.node_elem.push(element);
        self.adjacency.push(Vec::new());
        id
    }

    /// Add an undirected link, mirrored on both endpoints.  Self-links and
    /// duplicates are ignored.
    fn link(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if !self.seen.insert(key) {
            return;
        }
        self.adjacency[a.index()].push(b);
        self.adjacency[b.index()].push(a);
    }
}
