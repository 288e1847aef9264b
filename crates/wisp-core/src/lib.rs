//! `wisp-core` — foundational types for the `wisp` marker engine.
//!
//! This crate is a dependency of every other `wisp-*` crate.  It intentionally
//! has no `wisp-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`ids`]   | `ElementId`, `NodeId`                             |
//! | [`geo`]   | `Point`, `Rect`, Euclidean and Manhattan metrics  |
//! | [`rng`]   | `MarkerRng` (seeded, deterministic)               |
//! | [`error`] | `WispError`, `WispResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{WispError, WispResult};
pub use geo::{Point, Rect};
pub use ids::{ElementId, NodeId};
pub use rng::MarkerRng;
