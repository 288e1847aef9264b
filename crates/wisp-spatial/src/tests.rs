//! Unit tests for wisp-spatial.
//!
//! All tests use hand-placed obstacle rectangles so expected sample
//! positions can be asserted exactly.

#[cfg(test)]
mod helpers {
    use wisp_core::{ElementId, Rect};

    use crate::{GraphBuilder, GraphConfig, WaypointGraph};

    /// The canonical fixture: one input of width 80 at (0, 100), spacing 8.
    ///
    /// Samples: x = 0, 8, …, 72, 80 at y = 84 (16 px above the top edge),
    /// chain-linked in order.  NodeId i ⇔ x = 8·i.
    pub fn single_input() -> WaypointGraph {
        let mut b = GraphBuilder::new(GraphConfig::default());
        b.add_obstacle(ElementId(0), Rect::new(0.0, 100.0, 80.0, 24.0));
        b.build()
    }

    /// Two stacked inputs 50 px apart vertically — well inside the 100 px
    /// link window, so the cross-link pass connects them.
    ///
    /// Element 0 samples at y = 84, element 1 samples at y = 134.
    pub fn stacked_pair() -> WaypointGraph {
        let mut b = GraphBuilder::new(GraphConfig::default());
        b.add_obstacle(ElementId(0), Rect::new(0.0, 100.0, 80.0, 24.0));
        b.add_obstacle(ElementId(1), Rect::new(0.0, 150.0, 80.0, 24.0));
        b.build()
    }

    /// Two inputs 400 px apart vertically — outside the link window on the
    /// y axis, so the graph has two disconnected chains.
    pub fn far_pair() -> WaypointGraph {
        let mut b = GraphBuilder::new(GraphConfig::default());
        b.add_obstacle(ElementId(0), Rect::new(0.0, 100.0, 80.0, 24.0));
        b.add_obstacle(ElementId(1), Rect::new(0.0, 500.0, 80.0, 24.0));
        b.build()
    }
}

// ── Builder & sampling ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use wisp_core::{ElementId, NodeId, Point, Rect};

    use crate::{GraphBuilder, GraphConfig, WaypointGraph};

    #[test]
    fn empty_build() {
        let g = WaypointGraph::empty();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.link_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn sample_count_is_ceil_plus_one() {
        // width 80, spacing 8 → ceil(80/8) + 1 = 11
        assert_eq!(super::helpers::single_input().node_count(), 11);

        // width 20, spacing 8 → samples at 0, 8, 16, 20 → ceil(20/8) + 1 = 4
        let mut b = GraphBuilder::new(GraphConfig::default());
        b.add_obstacle(ElementId(0), Rect::new(10.0, 100.0, 20.0, 24.0));
        let g = b.build();
        assert_eq!(g.node_count(), 4);
        let xs: Vec<f32> = g.node_pos.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![10.0, 18.0, 26.0, 30.0]);

        // width 0 → the right-edge sample only
        let mut b = GraphBuilder::new(GraphConfig::default());
        b.add_obstacle(ElementId(0), Rect::new(5.0, 100.0, 0.0, 24.0));
        assert_eq!(b.build().node_count(), 1);
    }

    #[test]
    fn first_and_last_samples_sit_on_the_corners() {
        let g = super::helpers::single_input();
        assert_eq!(g.node_pos[0], Point::new(0.0, 84.0));
        assert_eq!(g.node_pos[10], Point::new(80.0, 84.0));
        // All samples ride 16 px above the top edge.
        assert!(g.node_pos.iter().all(|p| p.y == 84.0));
    }

    #[test]
    fn chain_links_consecutive_samples() {
        let g = super::helpers::single_input();
        // Interior nodes see exactly their two chain neighbors.
        for i in 1..10u32 {
            let n: Vec<NodeId> = g.neighbors(NodeId(i)).collect();
            assert_eq!(n, vec![NodeId(i - 1), NodeId(i + 1)]);
        }
        // Endpoints see one.
        assert_eq!(g.degree(NodeId(0)), 1);
        assert_eq!(g.degree(NodeId(10)), 1);
    }

    #[test]
    fn edge_symmetry_holds_everywhere() {
        let g = super::helpers::stacked_pair();
        for i in 0..g.node_count() as u32 {
            let a = NodeId(i);
            for b in g.neighbors(a) {
                assert!(
                    g.neighbors(b).any(|n| n == a),
                    "edge {a} → {b} has no mirror"
                );
            }
        }
    }

    #[test]
    fn cross_links_connect_nearby_elements_only() {
        let near = super::helpers::stacked_pair();
        let chain_links = 10 + 10; // two 11-node chains
        assert!(near.link_count() > chain_links, "expected cross links");

        // Every link is either a chain segment (same element, same y) or a
        // cross link strictly inside the window on both axes.
        for i in 0..near.node_count() as u32 {
            let a = NodeId(i);
            let pa = near.node_pos[a.index()];
            for b in near.neighbors(a) {
                let pb = near.node_pos[b.index()];
                if near.node_elem[a.index()] == near.node_elem[b.index()] {
                    assert_eq!(pa.y, pb.y);
                } else {
                    assert!(pb.within(pa, 100.0, 100.0));
                }
            }
        }

        let far = super::helpers::far_pair();
        assert_eq!(far.link_count(), chain_links, "far elements must not link");
    }

    #[test]
    fn cross_link_cap_is_global_per_node() {
        // Two interleaved chains (elements 1 and 2) sit 10 px apart, so each
        // of their nodes has 6 candidates closer than the lone node of
        // element 0 and never links it.  The lone node links exactly its
        // 6 nearest cross-element candidates — the global cap, not a
        // per-element quota.
        let mut b = GraphBuilder::new(GraphConfig::default());
        b.add_obstacle(ElementId(1), Rect::new(0.0, 100.0, 80.0, 24.0)); // y = 84
        b.add_obstacle(ElementId(2), Rect::new(0.0, 110.0, 80.0, 24.0)); // y = 94
        b.add_obstacle(ElementId(0), Rect::new(40.0, 176.0, 0.0, 24.0)); // lone, y = 160
        let g = b.build();

        let lone = NodeId(22); // 11 + 11 chain nodes precede it
        assert_eq!(g.node_elem[lone.index()], ElementId(0));
        assert_eq!(g.degree(lone), 6);
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod queries {
    use wisp_core::{NodeId, Point};

    use crate::WaypointGraph;

    #[test]
    fn nearest_node_by_manhattan() {
        let g = super::helpers::single_input();
        assert_eq!(g.nearest_node(Point::new(3.0, 84.0)), Some(NodeId(0)));
        assert_eq!(g.nearest_node(Point::new(5.0, 84.0)), Some(NodeId(1)));
        // Far away still resolves to the closest end of the chain.
        assert_eq!(g.nearest_node(Point::new(500.0, 0.0)), Some(NodeId(10)));
    }

    #[test]
    fn nearest_node_empty_graph_is_none() {
        assert_eq!(WaypointGraph::empty().nearest_node(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn node_within_finds_nearest_in_window() {
        let g = super::helpers::single_input();
        // Exact sample.
        assert_eq!(g.node_within(Point::new(40.0, 84.0), 20.0), Some(NodeId(5)));
        // Off-sample x snaps to the nearest sample.
        assert_eq!(g.node_within(Point::new(37.0, 84.0), 20.0), Some(NodeId(5)));
    }

    #[test]
    fn node_within_window_is_strict() {
        let g = super::helpers::single_input();
        // y distance of exactly 20 px fails the strict threshold.
        assert_eq!(g.node_within(Point::new(40.0, 104.0), 20.0), None);
        // 21 px away in y: no node qualifies at all.
        assert_eq!(g.node_within(Point::new(40.0, 105.0), 20.0), None);
        // x = 60: the sample at x = 40 is exactly 20 away and excluded; the
        // equidistant qualifiers at x = 56 and 64 tie, lower NodeId wins.
        assert_eq!(g.node_within(Point::new(60.0, 84.0), 20.0), Some(NodeId(7)));
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use wisp_core::{NodeId, Point};

    use crate::{DijkstraRouter, Router, SpatialError};

    #[test]
    fn trivial_same_node() {
        let g = super::helpers::single_input();
        let r = DijkstraRouter.route(&g, NodeId(3), NodeId(3)).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.nodes, vec![NodeId(3)]);
        assert_eq!(r.total_len, 0.0);
    }

    #[test]
    fn chain_route_is_the_monotonic_chain() {
        let g = super::helpers::single_input();
        let r = DijkstraRouter.route(&g, NodeId(0), NodeId(5)).unwrap();

        let expected: Vec<NodeId> = (0..=5).map(NodeId).collect();
        assert_eq!(r.nodes, expected);
        assert_eq!(r.total_len, 40.0); // 5 segments × 8 px

        let pts = r.points(&g);
        assert_eq!(pts.first().copied(), Some(Point::new(0.0, 84.0)));
        assert_eq!(pts.last().copied(), Some(Point::new(40.0, 84.0)));
    }

    #[test]
    fn route_includes_both_endpoints() {
        let g = super::helpers::stacked_pair();
        let from = NodeId(0);
        let to = NodeId(21); // last node of the second chain
        let r = DijkstraRouter.route(&g, from, to).unwrap();
        assert_eq!(r.nodes.first().copied(), Some(from));
        assert_eq!(r.nodes.last().copied(), Some(to));
    }

    #[test]
    fn route_length_is_consistent_and_short() {
        let g = super::helpers::stacked_pair();
        let r = DijkstraRouter.route(&g, NodeId(0), NodeId(21)).unwrap();

        // total_len must equal the sum of its own segment lengths.
        let pts = r.points(&g);
        let walked: f32 = pts.windows(2).map(|w| w[0].distance(w[1])).sum();
        assert!((r.total_len - walked).abs() < 1e-3);

        // Never longer than the naive cross-then-chain walk, never shorter
        // than the straight line between the endpoints.
        let start = g.node_pos[0];
        let end = g.node_pos[21];
        assert!(r.total_len <= 50.0 + 80.0);
        assert!(r.total_len >= start.distance(end));
    }

    #[test]
    fn disconnected_components_report_no_route() {
        let g = super::helpers::far_pair();
        let result = DijkstraRouter.route(&g, NodeId(0), NodeId(12));
        assert!(matches!(result, Err(SpatialError::NoRoute { .. })));
    }
}
