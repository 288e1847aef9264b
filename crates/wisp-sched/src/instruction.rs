//! Atomic motion directives.

use std::fmt;

use wisp_core::Point;

/// How a motion is rendered.  Hop is the only kind today; the marker moves
/// in discrete arcs rather than gliding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionKind {
    Hop,
}

/// A directed motion directive — the unit of work the scheduler drains one
/// at a time.  Immutable once created.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    pub kind: MotionKind,
    pub from: Point,
    pub to:   Point,
}

impl Instruction {
    #[inline]
    pub fn hop(from: Point, to: Point) -> Self {
        Self { kind: MotionKind::Hop, from, to }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hop {} → {}", self.from, self.to)
    }
}
