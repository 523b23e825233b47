//! Per-tick driver that reconstructs hidden agent state from board snapshots.

use crate::config::EstimatorConfig;
use crate::error::{Result, TrackError};
use crate::model::agent::TrackedAgent;
use crate::model::bomb::Bomb;
use crate::model::item::Item;
use crate::model::snapshot::BoardSnapshot;
use crate::telemetry::TrackerMetrics;
use crate::tracker::{AgentTracker, BombEvents, BombTracker, ItemTracker};
use serde::Serialize;

/// Everything resolved while ingesting one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub step_count: u32,
    /// True for the first snapshot, which only seeds the agent set.
    pub initialized: bool,
    pub missing_items: Vec<Item>,
    pub bombs: BombEvents,
}

/// Owned copy of the reconstructed state, for consumers outside the estimator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeliefState {
    pub step_count: u32,
    pub agents: Vec<TrackedAgent>,
    pub dead_agents: Vec<TrackedAgent>,
    pub bombs: Vec<Bomb>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone)]
pub struct StateEstimator {
    config: EstimatorConfig,
    items: ItemTracker,
    bombs: BombTracker,
    agents: AgentTracker,
    step_count: Option<u32>,
    /// Board shape fixed by the first snapshot of the episode.
    shape: Option<(usize, usize)>,
}

impl StateEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            items: ItemTracker::new(),
            bombs: BombTracker::new(config.initial_bomb_life),
            agents: AgentTracker::new(config.initial_ammo, config.initial_blast_radius),
            step_count: None,
            shape: None,
        }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Ingests one snapshot. Items, then bombs, then agents are updated, in
    /// that order; bomb detection relies on agent positions from the previous
    /// tick.
    ///
    /// A snapshot that fails validation leaves the tracked state untouched.
    pub fn observe(&mut self, snapshot: &BoardSnapshot) -> Result<TickReport> {
        let step_count = snapshot.step_count();
        let found = snapshot.board().shape();
        if let Some(expected) = self.shape.filter(|expected| *expected != found) {
            return Err(TrackError::ShapeMismatch {
                grid: "board",
                expected,
                found,
            });
        }
        if self.is_initialized() {
            self.agents.check_visible(snapshot)?;
        }

        if !self.config.track_self {
            if let Some(view) = snapshot.self_view() {
                self.agents.exclude(view.id);
            }
        }

        let report = if self.step_count.is_none() {
            self.agents.init(snapshot);
            self.shape = Some(found);
            tracing::debug!(
                target: "pommer_core::estimator",
                step = step_count,
                agents = self.agents.len(),
                "estimator initialized"
            );
            TickReport {
                step_count,
                initialized: true,
                ..TickReport::default()
            }
        } else {
            let missing_items = self.items.update(snapshot);
            let bombs = self.bombs.update(snapshot, &self.agents);
            self.agents.update(snapshot, &missing_items, &bombs)?;
            TickReport {
                step_count,
                initialized: false,
                missing_items,
                bombs,
            }
        };

        if self.config.track_self && self.config.self_authoritative {
            if let Some(view) = snapshot.self_view() {
                self.agents.apply_self_view(view);
            }
        }
        self.step_count = Some(step_count);

        if self.config.log_metrics && tracing::enabled!(tracing::Level::DEBUG) {
            self.metrics().log();
        }
        Ok(report)
    }

    /// Forgets all tracked state; the next snapshot initializes again.
    pub fn reset(&mut self) {
        self.items.clear();
        self.bombs.clear();
        self.agents.clear();
        self.step_count = None;
        self.shape = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.step_count.is_some()
    }

    pub fn step_count(&self) -> Option<u32> {
        self.step_count
    }

    pub fn agents(&self) -> impl Iterator<Item = &TrackedAgent> {
        self.agents.live()
    }

    pub fn dead_agents(&self) -> impl Iterator<Item = &TrackedAgent> {
        self.agents.dead()
    }

    pub fn bombs(&self) -> impl Iterator<Item = &Bomb> {
        self.bombs.bombs()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.items()
    }

    pub fn belief(&self) -> BeliefState {
        BeliefState {
            step_count: self.step_count.unwrap_or(0),
            agents: self.agents().cloned().collect(),
            dead_agents: self.dead_agents().cloned().collect(),
            bombs: self.bombs().cloned().collect(),
            items: self.items().copied().collect(),
        }
    }

    pub fn metrics(&self) -> TrackerMetrics {
        TrackerMetrics::from_estimator(self)
    }
}

impl Default for StateEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}
