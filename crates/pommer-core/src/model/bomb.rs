use super::agent::AgentId;
use super::direction::Direction;
use super::position::Position;
use serde::{Deserialize, Serialize};

/// Tracker-assigned handle, unique for the lifetime of one estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BombId(pub u64);

/// Logical identity of a bomb: who laid it and where it was last known to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BombKey {
    pub owner: AgentId,
    pub position: Position,
}

/// A bomb inferred to be on the board.
///
/// `position` is where the bomb was laid, or where it was last seen at rest
/// before being kicked; a moving bomb's true cell is not tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bomb {
    pub id: BombId,
    pub owner: AgentId,
    pub position: Position,
    pub blast_radius: u32,
    pub life: u32,
    pub moving: bool,
    pub direction: Option<Direction>,
    pub kicked_by: Option<AgentId>,
}

impl Bomb {
    pub fn laid(id: BombId, owner: AgentId, position: Position, blast_radius: u32, life: u32) -> Self {
        Self {
            id,
            owner,
            position,
            blast_radius,
            life,
            moving: false,
            direction: None,
            kicked_by: None,
        }
    }

    pub fn key(&self) -> BombKey {
        BombKey {
            owner: self.owner,
            position: self.position,
        }
    }

    pub fn tick(&mut self) {
        self.life = self.life.saturating_sub(1);
    }

    pub fn kick(&mut self, kicker: AgentId, direction: Direction) {
        self.moving = true;
        self.direction = Some(direction);
        self.kicked_by = Some(kicker);
    }
}
