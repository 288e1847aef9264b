//! The instruction scheduler: queue, single-flight lock, and idle bounce.
//!
//! # State machine
//!
//! All mutable state lives in one owned struct with four transitions
//! (`enqueue_route` / `enqueue_direct`, `on_animation_finished`,
//! `on_idle_timeout`), so every reachable state is enumerable and testable
//! without a rendering surface.
//!
//! # Single-flight discipline
//!
//! `lock` is the sole guard: set when an instruction is dispatched, cleared
//! exactly once when the host reports completion.  The runtime is
//! single-threaded and cooperative, so the flag is never contended — the
//! check-then-set discipline is what prevents overlapping `Animator::play`
//! calls.
//!
//! # Optimistic position
//!
//! `last_position` is updated when an instruction is *dispatched*, not when
//! it completes.  Routing decisions therefore always start from the intended
//! end of the last dispatched hop, not the visually-settled position.

use std::collections::VecDeque;

use wisp_core::{MarkerRng, Point, WispError, WispResult};

use crate::{Animator, Instruction};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Scheduler knobs.  Defaults: a 3–6 s idle delay and four 8 px bounce
/// pairs.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    /// Lower bound of the uniformly sampled idle delay, in milliseconds.
    pub idle_delay_min_ms: u32,
    /// Upper bound (inclusive) of the idle delay, in milliseconds.
    pub idle_delay_max_ms: u32,
    /// How far up (in px) each idle bounce lifts the marker.
    pub bounce_height: f32,
    /// Number of up/down pairs per idle sequence (two instructions each).
    pub bounce_pairs: u32,
    /// Seed for the idle-delay RNG.  Same seed, same delay sequence.
    pub seed: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            idle_delay_min_ms: 3_000,
            idle_delay_max_ms: 6_000,
            bounce_height:     8.0,
            bounce_pairs:      4,
            seed:              0,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> WispResult<()> {
        if self.idle_delay_min_ms > self.idle_delay_max_ms {
            return Err(WispError::Config(format!(
                "idle delay range is inverted: {}..={} ms",
                self.idle_delay_min_ms, self.idle_delay_max_ms
            )));
        }
        Ok(())
    }
}

// ── Idle timer handle ─────────────────────────────────────────────────────────

/// Identifies one armed idle timer.
///
/// Cancellation is by invalidation: enqueuing a route (or arming a newer
/// timer) bumps the expected token, and a timeout delivered with a stale
/// token is a no-op.  The host never needs to tear a timer down.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TimerToken(pub u64);

/// A request for the host to call
/// [`Scheduler::on_idle_timeout`]`(token)` after `delay_ms` milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IdleTimer {
    pub token:    TimerToken,
    pub delay_ms: u32,
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Owns the animation queue and the single-flight discipline.
///
/// Every transition method returns `Option<IdleTimer>`; `Some` means the
/// queue ran dry and the host must schedule the returned timer.
pub struct Scheduler<A: Animator> {
    /// Playback collaborator.
    pub animator: A,

    config:        SchedulerConfig,
    queue:         VecDeque<Instruction>,
    lock:          bool,
    last_position: Option<Point>,
    /// Token of the currently armed idle timer, if any.
    armed:         Option<TimerToken>,
    next_token:    u64,
    rng:           MarkerRng,
}

impl<A: Animator> Scheduler<A> {
    pub fn new(animator: A, config: SchedulerConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid SchedulerConfig");
        let rng = MarkerRng::new(config.seed);
        Self {
            animator,
            config,
            queue:         VecDeque::new(),
            lock:          false,
            last_position: None,
            armed:         None,
            next_token:    0,
            rng,
        }
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// `true` while a motion is in flight.
    pub fn is_locked(&self) -> bool {
        self.lock
    }

    /// Instructions still queued (excluding any in-flight motion).
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// The authoritative marker location: the `to` point of the most
    /// recently dispatched instruction.  `None` until the first dispatch.
    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Replace the queue with the hops of `waypoints` plus a final hop to
    /// the literal `target`, then start draining.
    ///
    /// One instruction is built per waypoint (`from` = the previous
    /// waypoint; the first instruction settles on the first waypoint), and
    /// the appended final hop lands the marker exactly on `target` rather
    /// than on the nearest sampled node.  Replacement is last-route-wins:
    /// instructions still queued from a previous route are discarded; an
    /// in-flight motion completes first.
    ///
    /// An empty `waypoints` builds nothing — the call only cancels any
    /// pending idle timer and re-drains.
    pub fn enqueue_route(&mut self, waypoints: &[Point], target: Point) -> Option<IdleTimer> {
        self.cancel_idle();

        if waypoints.is_empty() {
            return self.drain();
        }

        let mut instructions = VecDeque::with_capacity(waypoints.len() + 1);
        let mut prev = waypoints[0];
        for &p in waypoints {
            instructions.push_back(Instruction::hop(prev, p));
            prev = p;
        }
        instructions.push_back(Instruction::hop(prev, target));

        self.queue = instructions;
        self.drain()
    }

    /// Replace the queue with a single hop straight to `target`, bypassing
    /// graph routing — the recovery path when no usable route exists, and
    /// the placement path for the very first event (no prior position: the
    /// hop degenerates to a settle on `target`).
    pub fn enqueue_direct(&mut self, target: Point) -> Option<IdleTimer> {
        self.cancel_idle();
        let from = self.last_position.unwrap_or(target);
        self.queue = VecDeque::from([Instruction::hop(from, target)]);
        self.drain()
    }

    /// Host signal: the in-flight motion finished.  Clears the lock (exactly
    /// one clear per set) and continues draining.
    pub fn on_animation_finished(&mut self) -> Option<IdleTimer> {
        self.lock = false;
        self.drain()
    }

    /// Host signal: an idle timer expired.
    ///
    /// Stale tokens — anything but the most recently armed timer — are
    /// ignored.  A live expiry synthesizes the bounce sequence
    /// (`bounce_pairs` × an up hop and a settle back down, from the current
    /// position) and drains it; once that sequence finishes, draining
    /// naturally arms the next idle timer, so an undisturbed marker keeps
    /// breathing.
    pub fn on_idle_timeout(&mut self, token: TimerToken) -> Option<IdleTimer> {
        if self.armed != Some(token) {
            return None;
        }
        self.armed = None;

        let Some(pos) = self.last_position else {
            // Nothing has ever been dispatched; nowhere to bounce from.
            return Some(self.arm_idle());
        };

        let up = pos.offset(0.0, -self.config.bounce_height);
        let mut seq = VecDeque::with_capacity(self.config.bounce_pairs as usize * 2);
        for _ in 0..self.config.bounce_pairs {
            seq.push_back(Instruction::hop(pos, up));
            seq.push_back(Instruction::hop(pos, pos));
        }

        self.queue = seq;
        self.drain()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Dispatch the next instruction, or arm the idle timer on an empty
    /// queue.  No-op while a motion is in flight — the completion signal
    /// retries.
    fn drain(&mut self) -> Option<IdleTimer> {
        if self.lock {
            return None;
        }
        match self.queue.pop_front() {
            None => Some(self.arm_idle()),
            Some(instruction) => {
                self.lock = true;
                self.last_position = Some(instruction.to);
                self.animator.play(&instruction);
                None
            }
        }
    }

    /// Arm a fresh idle timer with a uniformly sampled delay.  Any
    /// previously armed token becomes stale.
    fn arm_idle(&mut self) -> IdleTimer {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.armed = Some(token);
        let delay_ms = self
            .rng
            .gen_range(self.config.idle_delay_min_ms..=self.config.idle_delay_max_ms);
        IdleTimer { token, delay_ms }
    }

    fn cancel_idle(&mut self) {
        self.armed = None;
    }
}
