//! The `MarkerEngine` and its per-event pipeline.
//!
//! One invocation per input event (key release or pointer click):
//!
//! 1. Resolve the event element's bounds and derive the target point from
//!    the caret measurement.
//! 2. First event ever: place the marker directly on the target.
//! 3. Follow slack: nearby targets are dropped so the marker lingers while
//!    a caret advances within a word.
//! 4. Rebuild the proximity graph from the current obstacle set.
//! 5. Pick the start node (nearest to the marker) and end node (within the
//!    tolerance window of the target).
//! 6. Route and enqueue — or fall back to a single direct hop when no end
//!    node qualifies or the end node is unreachable.
//!
//! Every failure is local and silent: the event is skipped or degraded,
//! `last_position` survives, and an armed idle cycle keeps running.

use wisp_core::{ElementId, Point, WispResult};
use wisp_sched::{Animator, IdleTimer, Scheduler, TimerToken};
use wisp_spatial::{DijkstraRouter, GraphBuilder, Router, SpatialError};

use crate::observer::MarkerObserver;
use crate::surface::{CaretProbe, ObstacleSource};
use crate::EngineConfig;

// ── Event outcomes ────────────────────────────────────────────────────────────

/// Why an event was dropped without enqueuing anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The event element is no longer mounted; no bounds to measure.
    UnknownElement,
    /// The target is within the follow-slack window of the marker.
    WithinFollowSlack,
    /// The obstacle set produced zero graph nodes; routing has nothing to
    /// work with and the event is silently absorbed.
    NoStartNode,
}

/// Why graph routing was bypassed in favor of a single direct hop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// No graph node within the end-node tolerance window of the target.
    NoRouteTarget,
    /// An end node exists but no path connects it to the start node.
    UnreachableEndNode,
}

/// What one input event did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// First event: the marker was placed on the target with a settle hop.
    Placed,
    /// The event was dropped; nothing was enqueued.
    Skipped(SkipReason),
    /// A route was enqueued; `hops` counts its instructions (waypoint hops
    /// plus the final hop onto the literal target).
    Routed { hops: usize },
    /// Routing was bypassed; one direct hop to the target was enqueued.
    DirectHop(FallbackReason),
}

/// Result of one input event: the outcome plus an idle timer the host must
/// schedule if the scheduler's queue ran dry during the call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EventResult {
    pub outcome: RouteOutcome,
    pub idle:    Option<IdleTimer>,
}

impl EventResult {
    fn new(outcome: RouteOutcome, idle: Option<IdleTimer>) -> Self {
        Self { outcome, idle }
    }
}

// ── MarkerEngine ──────────────────────────────────────────────────────────────

/// Owns the collaborators and drives the per-event pipeline.
///
/// # Type parameters
///
/// - `S`: obstacle enumeration/measurement (host side).
/// - `C`: caret measurement (host side).
/// - `A`: motion playback (host side).
/// - `R`: routing algorithm — [`DijkstraRouter`] unless swapped via
///   [`with_router`](Self::with_router).
///
/// The host forwards animation completions and idle-timer expiries through
/// [`on_animation_finished`](Self::on_animation_finished) and
/// [`on_idle_timeout`](Self::on_idle_timeout); both are thin passthroughs to
/// the scheduler.
pub struct MarkerEngine<S, C, A, R = DijkstraRouter>
where
    S: ObstacleSource,
    C: CaretProbe,
    A: Animator,
    R: Router,
{
    /// Obstacle enumeration and measurement.
    pub surface: S,

    /// Caret measurement.
    pub caret: C,

    /// The routing algorithm.
    pub router: R,

    /// The instruction scheduler (owns the animator).
    pub scheduler: Scheduler<A>,

    config: EngineConfig,
}

impl<S, C, A> MarkerEngine<S, C, A>
where
    S: ObstacleSource,
    C: CaretProbe,
    A: Animator,
{
    /// Create an engine with the default Dijkstra router.
    pub fn new(surface: S, caret: C, animator: A, config: EngineConfig) -> WispResult<Self> {
        Self::with_router(surface, caret, animator, DijkstraRouter, config)
    }
}

impl<S, C, A, R> MarkerEngine<S, C, A, R>
where
    S: ObstacleSource,
    C: CaretProbe,
    A: Animator,
    R: Router,
{
    /// Create an engine with a custom routing algorithm.
    pub fn with_router(
        surface:  S,
        caret:    C,
        animator: A,
        router:   R,
        config:   EngineConfig,
    ) -> WispResult<Self> {
        config.validate()?;
        let scheduler = Scheduler::new(animator, config.sched.clone());
        Ok(Self { surface, caret, router, scheduler, config })
    }

    // ── Input triggers ────────────────────────────────────────────────────

    /// A key was released inside `element` with the caret at `char_offset`.
    pub fn on_key_release<O: MarkerObserver>(
        &mut self,
        element:     ElementId,
        char_offset: usize,
        observer:    &mut O,
    ) -> EventResult {
        self.handle_event(element, char_offset, observer)
    }

    /// `element` was clicked.  Clicks carry no caret offset, so the caret is
    /// measured at character offset 0.
    pub fn on_pointer_click<O: MarkerObserver>(
        &mut self,
        element:  ElementId,
        observer: &mut O,
    ) -> EventResult {
        self.handle_event(element, 0, observer)
    }

    // ── Scheduler passthroughs ────────────────────────────────────────────

    /// Host signal: the in-flight motion finished.
    pub fn on_animation_finished(&mut self) -> Option<IdleTimer> {
        self.scheduler.on_animation_finished()
    }

    /// Host signal: an idle timer expired.
    pub fn on_idle_timeout(&mut self, token: TimerToken) -> Option<IdleTimer> {
        self.scheduler.on_idle_timeout(token)
    }

    // ── Pipeline ──────────────────────────────────────────────────────────

    fn handle_event<O: MarkerObserver>(
        &mut self,
        element:     ElementId,
        char_offset: usize,
        observer:    &mut O,
    ) -> EventResult {
        // ── Phase 1: derive the target point ──────────────────────────────
        let Some(bounds) = self.surface.bounds(element) else {
            observer.on_skip(SkipReason::UnknownElement);
            return EventResult::new(RouteOutcome::Skipped(SkipReason::UnknownElement), None);
        };
        let caret = self.caret.caret_offset(element, char_offset);
        let target = Point::new(bounds.x + caret.x, bounds.y - self.config.caret_rise);
        observer.on_target(element, target);

        // ── Phase 2: first event places the marker directly ───────────────
        let Some(last) = self.scheduler.last_position() else {
            let idle = self.scheduler.enqueue_direct(target);
            return EventResult::new(RouteOutcome::Placed, idle);
        };

        // ── Phase 3: follow slack ─────────────────────────────────────────
        if target.within(last, self.config.follow_slack_x, self.config.follow_slack_y) {
            observer.on_skip(SkipReason::WithinFollowSlack);
            return EventResult::new(RouteOutcome::Skipped(SkipReason::WithinFollowSlack), None);
        }

        // ── Phase 4: rebuild the proximity graph ──────────────────────────
        //
        // From scratch on every event: element positions may have shifted
        // since the last keystroke, and nodes are transient by design.
        let mut builder = GraphBuilder::new(self.config.graph.clone());
        for obstacle in self.surface.obstacles() {
            builder.add_obstacle(obstacle.element, obstacle.bounds);
        }
        let graph = builder.build();
        observer.on_graph_built(graph.node_count(), graph.link_count());

        // ── Phase 5: pick the endpoints ───────────────────────────────────
        let Some(start) = graph.nearest_node(last) else {
            // Zero nodes: nothing to route over.  An armed idle cycle keeps
            // running untouched.
            observer.on_skip(SkipReason::NoStartNode);
            return EventResult::new(RouteOutcome::Skipped(SkipReason::NoStartNode), None);
        };
        let Some(end) = graph.node_within(target, self.config.end_node_tolerance) else {
            observer.on_fallback(FallbackReason::NoRouteTarget);
            let idle = self.scheduler.enqueue_direct(target);
            return EventResult::new(
                RouteOutcome::DirectHop(FallbackReason::NoRouteTarget),
                idle,
            );
        };

        // ── Phase 6: route and enqueue ────────────────────────────────────
        match self.router.route(&graph, start, end) {
            Ok(route) => {
                observer.on_route(&route);
                let waypoints = route.points(&graph);
                let hops = waypoints.len() + 1;
                let idle = self.scheduler.enqueue_route(&waypoints, target);
                EventResult::new(RouteOutcome::Routed { hops }, idle)
            }
            Err(SpatialError::NoRoute { .. }) => {
                observer.on_fallback(FallbackReason::UnreachableEndNode);
                let idle = self.scheduler.enqueue_direct(target);
                EventResult::new(
                    RouteOutcome::DirectHop(FallbackReason::UnreachableEndNode),
                    idle,
                )
            }
        }
    }
}
