use super::cell::{self, CellCode};
use super::position::Position;
use crate::error::{Result, TrackError};
use serde::{Deserialize, Serialize};

/// Ability granted by picking up a power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    ExtraAmmo,
    IncreaseBlastRadius,
    EnableKick,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [
        ItemKind::ExtraAmmo,
        ItemKind::IncreaseBlastRadius,
        ItemKind::EnableKick,
    ];

    pub const fn from_code(code: CellCode) -> Option<Self> {
        match code {
            cell::EXTRA_BOMB => Some(ItemKind::ExtraAmmo),
            cell::INCR_RANGE => Some(ItemKind::IncreaseBlastRadius),
            cell::KICK => Some(ItemKind::EnableKick),
            _ => None,
        }
    }

    pub const fn code(self) -> CellCode {
        match self {
            ItemKind::ExtraAmmo => cell::EXTRA_BOMB,
            ItemKind::IncreaseBlastRadius => cell::INCR_RANGE,
            ItemKind::EnableKick => cell::KICK,
        }
    }
}

impl TryFrom<CellCode> for ItemKind {
    type Error = TrackError;

    fn try_from(code: CellCode) -> Result<Self> {
        ItemKind::from_code(code).ok_or(TrackError::NotAnItem(code))
    }
}

/// A power-up lying on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub position: Position,
}

impl Item {
    pub const fn new(kind: ItemKind, position: Position) -> Self {
        Self { kind, position }
    }
}
