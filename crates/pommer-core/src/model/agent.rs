use super::cell::{self, CellCode};
use super::item::ItemKind;
use super::position::Position;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifier of an agent; the board renders it as `id + AGENT_BASE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u8);

impl AgentId {
    pub const fn from_code(code: CellCode) -> Option<Self> {
        if cell::is_agent(code) {
            Some(AgentId(code - cell::AGENT_BASE))
        } else {
            None
        }
    }

    pub const fn code(self) -> CellCode {
        self.0 + cell::AGENT_BASE
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent{}", self.0)
    }
}

/// Inferred public and private attributes of one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedAgent {
    pub id: AgentId,
    pub position: Position,
    pub ammo: u32,
    pub blast_radius: u32,
    pub can_kick: bool,
    /// Set for the controlling agent when its abilities come from its own observation.
    pub is_self: bool,
}

impl TrackedAgent {
    pub fn new(id: AgentId, position: Position, ammo: u32, blast_radius: u32) -> Self {
        Self {
            id,
            position,
            ammo,
            blast_radius,
            can_kick: false,
            is_self: false,
        }
    }

    pub fn add_ability(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::ExtraAmmo => self.ammo += 1,
            ItemKind::EnableKick => self.can_kick = true,
            ItemKind::IncreaseBlastRadius => self.blast_radius += 1,
        }
    }

    /// Raises the blast radius to at least `observed`; never lowers it.
    pub fn observe_blast_radius(&mut self, observed: u32) {
        if self.blast_radius < observed {
            self.blast_radius = observed;
        }
    }
}

/// Private attributes the controlling agent reads from its own observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfView {
    pub id: AgentId,
    pub ammo: u32,
    pub blast_radius: u32,
    pub can_kick: bool,
}
