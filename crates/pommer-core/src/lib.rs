#![deny(warnings)]
//! Belief-state tracking for a partially observed bomb-placement grid game.
//!
//! Each tick the [`StateEstimator`] ingests a [`BoardSnapshot`] and infers what
//! the board alone does not show: every agent's ammo, blast radius and kick
//! ability, and who owns each bomb.

pub mod config;
pub mod error;
pub mod estimator;
pub mod export;
pub mod model;
pub mod telemetry;
pub mod tracker;

pub use config::{ConfigError, EstimatorConfig, ValidationError};
pub use error::{Result, TrackError};
pub use estimator::{BeliefState, StateEstimator, TickReport};
pub use export::{OwnerFallback, RandomLiveAgent, SimState, SmallestLiveId};
pub use model::agent::{AgentId, SelfView, TrackedAgent};
pub use model::bomb::{Bomb, BombId, BombKey};
pub use model::direction::Direction;
pub use model::grid::Grid;
pub use model::item::{Item, ItemKind};
pub use model::position::Position;
pub use model::snapshot::{BoardSnapshot, Observation};
pub use telemetry::TrackerMetrics;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "pommer-belief"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
