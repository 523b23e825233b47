mod idle;

pub use idle::IdlePolicy;

use crate::action::Action;
use pommer_core::{AgentId, BoardSnapshot, SimState, StateEstimator};

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    /// The acting agent, when the observation names it.
    pub me: Option<AgentId>,
    pub snapshot: &'a BoardSnapshot,
    /// Tracker state after this tick's observation has been ingested.
    pub estimator: &'a StateEstimator,
    pub sim_state: Option<&'a SimState>,
}

/// Downstream decision function fed by the tracked state.
pub trait Policy: Send {
    fn choose_action(&mut self, ctx: &PolicyContext) -> Action;

    /// Optional: called when the agent is reset between episodes
    fn episode_end(&mut self) {}
}
