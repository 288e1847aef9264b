//! form-demo — scripted walkthrough of the wisp marker engine.
//!
//! Builds a five-input signup form, replays a short typing-and-clicking
//! session, and prints every motion the marker plays — including the idle
//! bounce cycles after the session goes quiet.  No rendering surface: the
//! animator writes to stdout and completions are driven synchronously.

use anyhow::Result;

use wisp_core::{ElementId, Point, Rect};
use wisp_engine::{
    CaretProbe, EngineConfig, FallbackReason, MarkerEngine, MarkerObserver, Obstacle,
    ObstacleSource, RouteOutcome, SkipReason,
};
use wisp_sched::{Animator, HOP_DURATION_MS, IdleTimer, Instruction};
use wisp_spatial::Route;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64 = 42;
const CHAR_WIDTH_PX: f32 = 8.0; // monospace caret advance
const IDLE_CYCLES:   u32 = 2;

// ── Host stand-ins ────────────────────────────────────────────────────────────

/// A fixed form layout: five stacked inputs (one offset to the left, as
/// forms love to do) and a submit button.
struct SignupForm {
    obstacles: Vec<Obstacle>,
}

impl SignupForm {
    fn new() -> Self {
        let input = |id: u32, x: f32, y: f32| Obstacle {
            element: ElementId(id),
            bounds:  Rect::new(x, y, 160.0, 24.0),
        };
        Self {
            obstacles: vec![
                input(0, 200.0, 100.0), // first name
                input(1, 200.0, 150.0), // last name
                input(2, 200.0, 200.0), // email
                input(3, 200.0, 250.0), // phone
                input(4, 100.0, 300.0), // address (offset)
                Obstacle {
                    element: ElementId(5), // submit
                    bounds:  Rect::new(240.0, 350.0, 80.0, 30.0),
                },
            ],
        }
    }
}

impl ObstacleSource for SignupForm {
    fn obstacles(&self) -> Vec<Obstacle> {
        self.obstacles.clone()
    }

    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.obstacles.iter().find(|o| o.element == element).map(|o| o.bounds)
    }
}

/// Monospace caret: every character advances the caret by `CHAR_WIDTH_PX`.
struct MonospaceCaret;

impl CaretProbe for MonospaceCaret {
    fn caret_offset(&self, _element: ElementId, char_offset: usize) -> Point {
        Point::new(char_offset as f32 * CHAR_WIDTH_PX, 0.0)
    }
}

/// Prints each motion as it plays and keeps a hop count.
#[derive(Default)]
struct ConsoleAnimator {
    hops: usize,
}

impl Animator for ConsoleAnimator {
    fn play(&mut self, instruction: &Instruction) {
        self.hops += 1;
        println!("      {instruction}");
    }
}

/// Narrates the pipeline's decisions.
struct Narrator;

impl MarkerObserver for Narrator {
    fn on_target(&mut self, element: ElementId, target: Point) {
        println!("    target {target} from {element}");
    }
    fn on_graph_built(&mut self, nodes: usize, links: usize) {
        println!("    graph: {nodes} nodes, {links} links");
    }
    fn on_route(&mut self, route: &Route) {
        println!("    route: {} nodes, {:.1} px", route.nodes.len(), route.total_len);
    }
    fn on_fallback(&mut self, reason: FallbackReason) {
        println!("    fallback: {reason:?}");
    }
    fn on_skip(&mut self, reason: SkipReason) {
        println!("    skip: {reason:?}");
    }
}

// ── Drive helpers ─────────────────────────────────────────────────────────────

type DemoEngine = MarkerEngine<SignupForm, MonospaceCaret, ConsoleAnimator>;

/// Synchronously complete motions until the queue runs dry, returning the
/// idle timer the final drain arms.
fn drain(engine: &mut DemoEngine) -> IdleTimer {
    loop {
        if let Some(timer) = engine.on_animation_finished() {
            return timer;
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== form-demo — wisp marker engine ===");
    println!("Seed: {SEED}  |  Hop duration: {HOP_DURATION_MS} ms");
    println!();

    // 1. Build the form and the engine.
    let config = EngineConfig {
        sched: wisp_sched::SchedulerConfig { seed: SEED, ..Default::default() },
        ..Default::default()
    };
    let mut engine = MarkerEngine::new(
        SignupForm::new(),
        MonospaceCaret,
        ConsoleAnimator::default(),
        config,
    )?;

    // 2. Replay a typing session.  Caret offsets are character positions.
    let session: &[(&str, ElementId, Option<usize>)] = &[
        ("type 'A' in first name",  ElementId(0), Some(1)),
        ("type 'd' in first name",  ElementId(0), Some(2)),
        ("type 'a' in first name",  ElementId(0), Some(3)),
        ("click email",             ElementId(2), None),
        ("type a long email",       ElementId(2), Some(18)),
        ("click address",           ElementId(4), None),
        ("click submit",            ElementId(5), None),
    ];

    let mut last_timer = None;
    for &(label, element, caret) in session {
        println!("  {label}");
        let result = match caret {
            Some(offset) => engine.on_key_release(element, offset, &mut Narrator),
            None         => engine.on_pointer_click(element, &mut Narrator),
        };
        match result.outcome {
            RouteOutcome::Skipped(_) => {}
            _ => last_timer = Some(drain(&mut engine)),
        }
    }

    // 3. The session goes quiet: let the idle cycle breathe.
    let mut timer = last_timer.expect("session played at least one motion");
    for cycle in 1..=IDLE_CYCLES {
        println!("  idle for {} ms (cycle {cycle})", timer.delay_ms);
        engine.on_idle_timeout(timer.token);
        timer = drain(&mut engine);
    }

    // 4. Summary.
    println!();
    let hops = engine.scheduler.animator.hops;
    println!("{:<24} {}", "Hops played:", hops);
    println!("{:<24} {} ms", "Animation time:", hops as u32 * HOP_DURATION_MS);
    match engine.scheduler.last_position() {
        Some(p) => println!("{:<24} {}", "Marker rests at:", p),
        None    => println!("{:<24} (never placed)", "Marker rests at:"),
    }

    Ok(())
}
