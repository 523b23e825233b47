use crate::model::agent::AgentId;
use crate::model::cell::CellCode;
use thiserror::Error;

/// Errors raised while ingesting observations or tracking entities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// An agent reported alive is not rendered anywhere on the board.
    #[error("agent {id} is alive but not on the board at step {step}")]
    AgentNotOnBoard { id: AgentId, step: u32 },

    #[error("{grid} grid has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        grid: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("cell code {0} is not an item")]
    NotAnItem(CellCode),
}

/// Convenience Result type for tracking operations
pub type Result<T> = std::result::Result<T, TrackError>;
