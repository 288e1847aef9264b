//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `WispError` via `From` impls, or keep them separate.  Routing failures are
//! deliberately *not* represented here: they are recoverable conditions the
//! engine absorbs (see `wisp-spatial::SpatialError`), never surfaced errors.

use thiserror::Error;

/// The top-level error type for `wisp-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum WispError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `wisp-*` crates.
pub type WispResult<T> = Result<T, WispError>;
