//! Engine observer trait for instrumentation and diagnostics.

use wisp_core::{ElementId, Point};
use wisp_spatial::Route;

use crate::engine::{FallbackReason, SkipReason};

/// Callbacks invoked by [`MarkerEngine`][crate::MarkerEngine] at key points
/// of each event's pipeline.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Routing is a decorative subsystem:
/// these hooks exist for debugging overlays and tests, never for surfacing
/// anything to the user.
///
/// # Example — fallback counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct FallbackCounter { count: usize }
///
/// impl MarkerObserver for FallbackCounter {
///     fn on_fallback(&mut self, _reason: FallbackReason) {
///         self.count += 1;
///     }
/// }
/// ```
pub trait MarkerObserver {
    /// A target point was derived from an input event.
    fn on_target(&mut self, _element: ElementId, _target: Point) {}

    /// A proximity graph was built for this event.
    fn on_graph_built(&mut self, _nodes: usize, _links: usize) {}

    /// A route was found and is being converted to instructions.
    fn on_route(&mut self, _route: &Route) {}

    /// Routing could not be used; a direct hop was enqueued instead.
    fn on_fallback(&mut self, _reason: FallbackReason) {}

    /// The event was dropped without enqueuing anything.
    fn on_skip(&mut self, _reason: SkipReason) {}
}

/// A [`MarkerObserver`] that does nothing.
pub struct NoopObserver;

impl MarkerObserver for NoopObserver {}
