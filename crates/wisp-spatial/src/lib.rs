//! `wisp-spatial` — proximity waypoint graph and shortest-path routing.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`graph`]  | `WaypointGraph` (CSR + R-tree), `GraphBuilder`, `GraphConfig` |
//! | [`router`] | `Router` trait, `Route`, `DijkstraRouter`                 |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod error;
pub mod graph;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use graph::{GraphBuilder, GraphConfig, WaypointGraph};
pub use router::{DijkstraRouter, Route, Router};
