//! Per-entity trackers driven once per tick by the estimator.
//!
//! - `items`: power-ups appearing and disappearing on the board.
//! - `bombs`: lay, kick and explosion detection over tracked bombs.
//! - `agents`: positions, deaths and inferred abilities of agents.

mod agents;
mod bombs;
mod items;

pub use agents::AgentTracker;
pub use bombs::{BombEvents, BombTracker};
pub use items::ItemTracker;
