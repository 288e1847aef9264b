//! `wisp-sched` — animation queue, single-flight discipline, and idle bounce.
//!
//! # Crate layout
//!
//! | Module          | Contents                                             |
//! |-----------------|------------------------------------------------------|
//! | [`instruction`] | `Instruction`, `MotionKind`                          |
//! | [`animator`]    | `Animator` trait, `NoopAnimator`, `RecordingAnimator`, `HOP_DURATION_MS` |
//! | [`scheduler`]   | `Scheduler`, `SchedulerConfig`, `IdleTimer`, `TimerToken` |
//!
//! # Runtime model (summary)
//!
//! The scheduler is a pure state machine: it never blocks, sleeps, or spawns.
//! The two suspension points of the system — the in-flight motion and the
//! idle delay — are externalized as host-driven re-entry calls:
//!
//! ```text
//! enqueue_route / enqueue_direct ──► drain ──► Animator::play
//!         host signals completion ──► on_animation_finished ──► drain …
//!   queue runs dry ──► IdleTimer { token, delay_ms } returned to the host
//!         host timer fires ──► on_idle_timeout(token) ──► bounce sequence
//! ```
//!
//! Any method may hand back an [`IdleTimer`]; the host schedules it and
//! reports expiry with the token.  Stale tokens are ignored, which is how
//! idle cancellation works — no timer handles, no races.

pub mod animator;
pub mod instruction;
pub mod scheduler;


pub use animator::{Animator, HOP_DURATION_MS, NoopAnimator, RecordingAnimator};
pub use instruction::{Instruction, MotionKind};
pub use scheduler::{IdleTimer, Scheduler, SchedulerConfig, TimerToken};
