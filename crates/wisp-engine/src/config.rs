//! Engine configuration.

use wisp_core::WispResult;
use wisp_sched::SchedulerConfig;
use wisp_spatial::GraphConfig;

/// All engine knobs.  Constructed by the
/// application and handed to [`MarkerEngine::new`][crate::MarkerEngine::new],
/// which validates it once up front.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Vertical clearance between an element's top edge and the target
    /// point, so the marker sits above the text line.  Default: 16 px.
    pub caret_rise: f32,

    /// End-node window: a graph node qualifies as the route's end when it is
    /// strictly within this distance of the target on both axes.
    /// Default: 20 px.
    pub end_node_tolerance: f32,

    /// Horizontal follow slack: targets closer than this to the marker's
    /// position (and within `follow_slack_y` vertically) don't trigger a
    /// route, so the marker lingers while a caret advances within a word.
    /// Default: 50 px.
    pub follow_slack_x: f32,

    /// Vertical follow slack.  Default: 10 px.
    pub follow_slack_y: f32,

    /// Graph-construction parameters.
    pub graph: GraphConfig,

    /// Scheduler parameters (idle delay, bounce shape, RNG seed).
    pub sched: SchedulerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            caret_rise:         16.0,
            end_node_tolerance: 20.0,
            follow_slack_x:     50.0,
            follow_slack_y:     10.0,
            graph:              GraphConfig::default(),
            sched:              SchedulerConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> WispResult<()> {
        self.graph.validate()?;
        self.sched.validate()?;
        if !(self.end_node_tolerance > 0.0) {
            return Err(wisp_core::WispError::Config(format!(
                "end_node_tolerance must be > 0, got {}",
                self.end_node_tolerance
            )));
        }
        Ok(())
    }
}
