//! Host collaborator traits: obstacle enumeration and caret measurement.
//!
//! The engine never touches a document or widget tree.  The host measures;
//! the engine routes.  Both traits are queried fresh on every event — layout
//! can shift between keystrokes and nothing here is cached.

use wisp_core::{ElementId, Point, Rect};

/// An interactive on-screen element the marker routes around: a text input,
/// text area, or button, with its current viewport bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub element: ElementId,
    pub bounds:  Rect,
}

/// Enumerates and measures the obstacle elements.
pub trait ObstacleSource {
    /// All current obstacle elements.  May legitimately be empty — the
    /// engine then skips routing for the event.
    fn obstacles(&self) -> Vec<Obstacle>;

    /// Current bounding box of one element, or `None` if it is no longer
    /// mounted.  Used to resolve the element an input event arrived on.
    fn bounds(&self, element: ElementId) -> Option<Rect>;
}

/// Measures the caret position inside an input-like element.
pub trait CaretProbe {
    /// Pixel offset of the caret at `char_offset` within `element`'s local
    /// box.  Only the `x` component participates in target derivation; the
    /// target's `y` comes from the element's top edge.
    fn caret_offset(&self, element: ElementId, char_offset: usize) -> Point;
}
