//! Board cell codes as rendered by the environment.

pub type CellCode = u8;

pub const PASSAGE: CellCode = 0;
pub const RIGID: CellCode = 1;
pub const WOOD: CellCode = 2;
pub const BOMB: CellCode = 3;
pub const FLAMES: CellCode = 4;
pub const FOG: CellCode = 5;
pub const EXTRA_BOMB: CellCode = 6;
pub const INCR_RANGE: CellCode = 7;
pub const KICK: CellCode = 8;
pub const AGENT_DUMMY: CellCode = 9;

/// Code of agent 0; agent `n` is rendered as `AGENT_BASE + n`.
pub const AGENT_BASE: CellCode = 10;
pub const MAX_AGENTS: u8 = 4;

pub const fn is_agent(code: CellCode) -> bool {
    code >= AGENT_BASE && code < AGENT_BASE + MAX_AGENTS
}

pub const fn is_item(code: CellCode) -> bool {
    matches!(code, EXTRA_BOMB | INCR_RANGE | KICK)
}
