//! `wisp-engine` — the marker's event pipeline.
//!
//! Ties the other `wisp-*` crates together: a key-release or pointer-click
//! event becomes a target point, a fresh proximity graph, a shortest-path
//! route, and a drained instruction sequence — with direct-hop fallbacks
//! when routing cannot help and an idle bounce when nothing happens.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`config`]   | `EngineConfig`                                          |
//! | [`engine`]   | `MarkerEngine`, `EventResult`, `RouteOutcome`, `SkipReason`, `FallbackReason` |
//! | [`observer`] | `MarkerObserver`, `NoopObserver`                        |
//! | [`surface`]  | `ObstacleSource`, `CaretProbe`, `Obstacle`              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Propagates serde derives through the `wisp-*` stack.     |

pub mod config;
pub mod engine;
pub mod observer;
pub mod surface;


pub use config::EngineConfig;
pub use engine::{EventResult, FallbackReason, MarkerEngine, RouteOutcome, SkipReason};
pub use observer::{MarkerObserver, NoopObserver};
pub use surface::{CaretProbe, Obstacle, ObstacleSource};
