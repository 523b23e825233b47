//! An agent that keeps a belief state current and defers the decision to a
//! [`Policy`].

use crate::action::Action;
use crate::policy::{Policy, PolicyContext};
use pommer_core::{
    BoardSnapshot, EstimatorConfig, Observation, OwnerFallback, SimState, SmallestLiveId,
    StateEstimator, TrackError,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("failed to decode observation: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Track(#[from] TrackError),
}

pub struct TrackingAgent<P> {
    estimator: StateEstimator,
    policy: P,
    export: Option<Box<dyn OwnerFallback + Send>>,
    sim_state: Option<SimState>,
}

impl<P: Policy> TrackingAgent<P> {
    pub fn new(config: EstimatorConfig, policy: P) -> Self {
        Self {
            estimator: StateEstimator::new(config),
            policy,
            export: None,
            sim_state: None,
        }
    }

    /// Refreshes a simulator export every tick, resolving untracked bomb owners
    /// with `fallback`.
    pub fn with_sim_export(mut self, fallback: impl OwnerFallback + Send + 'static) -> Self {
        self.export = Some(Box::new(fallback));
        self
    }

    pub fn with_default_sim_export(self) -> Self {
        self.with_sim_export(SmallestLiveId)
    }

    pub fn estimator(&self) -> &StateEstimator {
        &self.estimator
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn sim_state(&self) -> Option<&SimState> {
        self.sim_state.as_ref()
    }

    pub fn act(&mut self, snapshot: &BoardSnapshot) -> Result<Action, AgentError> {
        let report = self.estimator.observe(snapshot)?;
        if let Some(fallback) = self.export.as_mut() {
            let belief = self.estimator.belief();
            self.sim_state = Some(SimState::capture(&belief, snapshot, fallback.as_mut()));
        }

        let me = snapshot.self_view().map(|view| view.id);
        let ctx = PolicyContext {
            me,
            snapshot,
            estimator: &self.estimator,
            sim_state: self.sim_state.as_ref(),
        };
        let action = self.policy.choose_action(&ctx);
        tracing::debug!(
            target: "pommer_bot::agent",
            step = report.step_count,
            agent = ?me,
            laid = report.bombs.laid.len(),
            kicked = report.bombs.kicked.len(),
            exploded = report.bombs.exploded.len(),
            %action,
            "action chosen"
        );
        Ok(action)
    }

    pub fn act_on_observation(&mut self, observation: Observation) -> Result<Action, AgentError> {
        let snapshot = BoardSnapshot::try_from(observation)?;
        self.act(&snapshot)
    }

    pub fn act_on_json(&mut self, json: &str) -> Result<Action, AgentError> {
        self.act_on_observation(Observation::from_json(json)?)
    }

    /// Clears all tracked state before a new episode.
    pub fn reset(&mut self) {
        self.estimator.reset();
        self.sim_state = None;
        self.policy.episode_end();
        tracing::debug!(target: "pommer_bot::agent", "agent reset");
    }
}

impl<P: Policy + Default> Default for TrackingAgent<P> {
    fn default() -> Self {
        Self::new(EstimatorConfig::default(), P::default())
    }
}
