use super::agent::{AgentId, SelfView};
use super::cell::CellCode;
use super::grid::Grid;
use super::position::Position;
use crate::error::{Result, TrackError};
use serde::Deserialize;
use std::collections::BTreeSet;

/// One tick's public view of the board, plus the controlling agent's own
/// private attributes when available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    board: Grid<CellCode>,
    bomb_life: Grid<u8>,
    blast_radius: Grid<u8>,
    alive: BTreeSet<AgentId>,
    step_count: u32,
    self_view: Option<SelfView>,
}

impl BoardSnapshot {
    pub fn new(
        board: Grid<CellCode>,
        bomb_life: Grid<u8>,
        blast_radius: Grid<u8>,
        alive: impl IntoIterator<Item = AgentId>,
        step_count: u32,
    ) -> Result<Self> {
        let expected = board.shape();
        for (name, shape) in [
            ("bomb_life", bomb_life.shape()),
            ("bomb_blast_strength", blast_radius.shape()),
        ] {
            if shape != expected {
                return Err(TrackError::ShapeMismatch {
                    grid: name,
                    expected,
                    found: shape,
                });
            }
        }
        Ok(Self {
            board,
            bomb_life,
            blast_radius,
            alive: alive.into_iter().collect(),
            step_count,
            self_view: None,
        })
    }

    pub fn with_self_view(mut self, view: SelfView) -> Self {
        self.self_view = Some(view);
        self
    }

    pub fn board(&self) -> &Grid<CellCode> {
        &self.board
    }

    pub fn bomb_life(&self) -> &Grid<u8> {
        &self.bomb_life
    }

    pub fn blast_radius(&self) -> &Grid<u8> {
        &self.blast_radius
    }

    pub fn alive(&self) -> &BTreeSet<AgentId> {
        &self.alive
    }

    pub fn is_alive(&self, id: AgentId) -> bool {
        self.alive.contains(&id)
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn self_view(&self) -> Option<&SelfView> {
        self.self_view.as_ref()
    }

    pub fn cell(&self, pos: Position) -> CellCode {
        self.board[pos]
    }

    pub fn life_at(&self, pos: Position) -> u8 {
        self.bomb_life[pos]
    }

    pub fn blast_at(&self, pos: Position) -> u8 {
        self.blast_radius[pos]
    }

    /// Where `id` is rendered on the board, if anywhere.
    pub fn locate(&self, id: AgentId) -> Option<Position> {
        self.board.find(id.code())
    }
}

/// Raw per-agent observation as the environment emits it.
///
/// Countdown and blast grids arrive as floats; they are rounded when converted
/// into a [`BoardSnapshot`].
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    pub board: Vec<Vec<CellCode>>,
    pub bomb_life: Vec<Vec<f32>>,
    pub bomb_blast_strength: Vec<Vec<f32>>,
    /// Board codes of agents still alive.
    pub alive: Vec<CellCode>,
    pub step_count: u32,
    #[serde(default)]
    pub ammo: Option<u32>,
    #[serde(default)]
    pub blast_strength: Option<f32>,
    #[serde(default)]
    pub can_kick: Option<bool>,
    /// Board code of the observing agent.
    #[serde(default)]
    pub agent_code: Option<CellCode>,
}

impl Observation {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn self_view(&self) -> Option<SelfView> {
        let id = self.agent_code.and_then(AgentId::from_code)?;
        Some(SelfView {
            id,
            ammo: self.ammo?,
            blast_radius: round_cell(self.blast_strength?) as u32,
            can_kick: self.can_kick?,
        })
    }
}

impl TryFrom<Observation> for BoardSnapshot {
    type Error = TrackError;

    fn try_from(obs: Observation) -> Result<Self> {
        let self_view = obs.self_view();
        let board = Grid::from_rows("board", obs.board)?;
        let bomb_life = Grid::from_rows("bomb_life", round_rows(obs.bomb_life))?;
        let blast_radius = Grid::from_rows("bomb_blast_strength", round_rows(obs.bomb_blast_strength))?;
        let alive = obs.alive.into_iter().filter_map(AgentId::from_code);
        let snapshot = BoardSnapshot::new(board, bomb_life, blast_radius, alive, obs.step_count)?;
        Ok(match self_view {
            Some(view) => snapshot.with_self_view(view),
            None => snapshot,
        })
    }
}

fn round_rows(rows: Vec<Vec<f32>>) -> Vec<Vec<u8>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(round_cell).collect())
        .collect()
}

fn round_cell(value: f32) -> u8 {
    value.round().clamp(0.0, u8::MAX as f32) as u8
}
