//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The engine calls routing via the [`Router`] trait, so applications can
//! swap in custom implementations (A*, beelines, easing-aware planners)
//! without touching the pipeline.  The default [`DijkstraRouter`] is more
//! than sufficient for graphs of a few hundred waypoints.
//!
//! # Cost units
//!
//! Edge weights are Euclidean pixel distances between node positions
//! (`f32`), compared with `total_cmp`; heap keys carry the `NodeId` as a
//! secondary key so tie-breaking is deterministic (ties are not
//! behaviorally load-bearing, but reproducible runs are worth having).
//!
//! # Search state
//!
//! `dist` and `prev` are vectors indexed by `NodeId`, owned by a single
//! `route()` call.  Nothing is stored on the graph, so no search state can
//! leak between routing events.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use wisp_core::{NodeId, Point};

use crate::SpatialError;
use crate::graph::WaypointGraph;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: an ordered node chain from start to end,
/// both endpoints included, and its total Euclidean length in pixels.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Nodes to visit in order.  First is the start node, last is the end
    /// node; a trivial route (start == end) holds that single node.
    pub nodes: Vec<NodeId>,
    /// Cumulative Euclidean length in pixels.
    pub total_len: f32,
}

impl Route {
    /// `true` if the route involves no travel (start == end).
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Resolve the node chain to waypoint positions.
    pub fn points(&self, graph: &WaypointGraph) -> Vec<Point> {
        self.nodes.iter().map(|&n| graph.node_pos[n.index()]).collect()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Returns [`SpatialError::NoRoute`] when `to` is not reachable from `from`
/// (an isolated obstacle cluster); `from == to` is a trivial route, not an
/// error.  Callers treat `NoRoute` as recoverable.
pub trait Router: Send + Sync {
    fn route(
        &self,
        graph: &WaypointGraph,
        from: NodeId,
        to: NodeId,
    ) -> Result<Route, SpatialError>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR waypoint graph.
///
/// Terminates early once the end node is selected as current; unreached
/// nodes keep infinite tentative cost, and exhausting the heap without
/// selecting the end node is reported as [`SpatialError::NoRoute`] rather
/// than reconstructing a malformed predecessor chain.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph: &WaypointGraph,
        from: NodeId,
        to: NodeId,
    ) -> Result<Route, SpatialError> {
        dijkstra(graph, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Min-heap key: cost first (`total_cmp`), then `NodeId` for determinism.
#[derive(Copy, Clone, PartialEq)]
struct HeapKey {
    cost: f32,
    node: NodeId,
}

impl Eq for HeapKey {}

impl Ord for HeapKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cost.total_cmp(&other.cost).then(self.node.cmp(&other.node))
    }
}

impl PartialOrd for HeapKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(
    graph: &WaypointGraph,
    from: NodeId,
    to: NodeId,
) -> Result<Route, SpatialError> {
    if from == to {
        return Ok(Route { nodes: vec![from], total_len: 0.0 });
    }

    let n = graph.node_count();
    // dist[v] = best known cost (px) to reach v.
    let mut dist = vec![f32::INFINITY; n];
    // prev[v] = predecessor of v on the best known path; INVALID if unreached.
    let mut prev = vec![NodeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<HeapKey>> = BinaryHeap::new();
    heap.push(Reverse(HeapKey { cost: 0.0, node: from }));

    while let Some(Reverse(HeapKey { cost, node })) = heap.pop() {
        if node == to {
            return Ok(reconstruct(&prev, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        let pos = graph.node_pos[node.index()];
        for neighbor in graph.neighbors(node) {
            let new_cost = cost + pos.distance(graph.node_pos[neighbor.index()]);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(Reverse(HeapKey { cost: new_cost, node: neighbor }));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(prev: &[NodeId], to: NodeId, total_len: f32) -> Route {
    let mut nodes = Vec::new();
    let mut cur = to;
    while cur != NodeId::INVALID {
        nodes.push(cur);
        cur = prev[cur.index()];
    }
    nodes.reverse();
    Route { nodes, total_len }
}
