//! Full-state description for seeding an external environment clone.
//!
//! Built from the reconstructed state plus the raw board; nothing here feeds
//! back into tracking.

use crate::config::EXPORTED_FLAME_LIFE;
use crate::estimator::BeliefState;
use crate::model::agent::{AgentId, TrackedAgent};
use crate::model::cell::{self, CellCode};
use crate::model::position::Position;
use crate::model::snapshot::BoardSnapshot;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::BTreeMap;

/// Picks an owner for an on-board bomb that no tracked bomb accounts for.
pub trait OwnerFallback {
    fn choose(&mut self, candidates: &[AgentId]) -> Option<AgentId>;
}

/// Deterministic fallback: the lowest candidate id.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmallestLiveId;

impl OwnerFallback for SmallestLiveId {
    fn choose(&mut self, candidates: &[AgentId]) -> Option<AgentId> {
        candidates.iter().min().copied()
    }
}

/// Uniformly random fallback over the candidates.
#[derive(Debug, Clone)]
pub struct RandomLiveAgent<R> {
    rng: R,
}

impl<R: rand::Rng> RandomLiveAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomLiveAgent<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> OwnerFallback for RandomLiveAgent<R> {
    fn choose(&mut self, candidates: &[AgentId]) -> Option<AgentId> {
        candidates.choose(&mut self.rng).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimAgent {
    pub agent_id: AgentId,
    pub is_alive: bool,
    pub position: Position,
    pub ammo: u32,
    pub blast_strength: u32,
    pub can_kick: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimBomb {
    pub position: Position,
    pub bomber_id: AgentId,
    pub life: u32,
    pub blast_strength: u32,
    pub moving_direction: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimFlame {
    pub position: Position,
    pub life: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimState {
    pub board_size: usize,
    pub step_count: u32,
    pub board: Vec<Vec<CellCode>>,
    pub agents: Vec<SimAgent>,
    pub bombs: Vec<SimBomb>,
    pub flames: Vec<SimFlame>,
    /// `[[row, col], code]` pairs.
    pub items: Vec<(Position, CellCode)>,
    pub intended_actions: Vec<u8>,
}

impl SimState {
    pub fn capture(
        state: &BeliefState,
        snapshot: &BoardSnapshot,
        fallback: &mut dyn OwnerFallback,
    ) -> Self {
        let self_view = snapshot.self_view();
        let export_agent = |agent: &TrackedAgent, is_alive: bool| {
            let mut exported = SimAgent {
                agent_id: agent.id,
                is_alive,
                position: agent.position,
                ammo: agent.ammo,
                blast_strength: agent.blast_radius,
                can_kick: agent.can_kick,
            };
            if let Some(view) = self_view.filter(|view| view.id == agent.id) {
                exported.ammo = view.ammo;
                exported.blast_strength = view.blast_radius;
                exported.can_kick = view.can_kick;
            }
            exported
        };

        let mut agents: Vec<SimAgent> = state
            .agents
            .iter()
            .map(|agent| export_agent(agent, true))
            .chain(state.dead_agents.iter().map(|agent| export_agent(agent, false)))
            .collect();
        if let Some(view) = self_view {
            let listed = agents.iter().any(|agent| agent.agent_id == view.id);
            if let (false, Some(position)) = (listed, snapshot.locate(view.id)) {
                agents.push(SimAgent {
                    agent_id: view.id,
                    is_alive: snapshot.is_alive(view.id),
                    position,
                    ammo: view.ammo,
                    blast_strength: view.blast_radius,
                    can_kick: view.can_kick,
                });
            }
        }

        let live_ids: Vec<AgentId> = agents
            .iter()
            .filter(|agent| agent.is_alive)
            .map(|agent| agent.agent_id)
            .collect();
        let any_ids: Vec<AgentId> = agents.iter().map(|agent| agent.agent_id).collect();
        let candidates = if live_ids.is_empty() { &any_ids } else { &live_ids };

        let mut bombs = Vec::new();
        for (position, life) in snapshot.bomb_life().iter() {
            if life == 0 {
                continue;
            }
            let recorded = state
                .bombs
                .iter()
                .find(|bomb| bomb.position == position && !bomb.moving);
            let bomber_id = match recorded {
                Some(bomb) => Some(bomb.owner),
                None => {
                    let chosen = fallback.choose(candidates);
                    tracing::warn!(
                        target: "pommer_core::export",
                        step = snapshot.step_count(),
                        %position,
                        owner = ?chosen,
                        "no tracked bomb at cell; owner chosen by fallback"
                    );
                    chosen
                }
            };
            let Some(bomber_id) = bomber_id else {
                continue;
            };
            bombs.push(SimBomb {
                position,
                bomber_id,
                life: u32::from(life),
                blast_strength: u32::from(snapshot.blast_at(position)),
                moving_direction: None,
            });
        }

        let flames = snapshot
            .board()
            .iter()
            .filter(|(_, code)| *code == cell::FLAMES)
            .map(|(position, _)| SimFlame {
                position,
                life: EXPORTED_FLAME_LIFE,
            })
            .collect();

        let items = state
            .items
            .iter()
            .map(|item| (item.position, item.kind.code()))
            .collect();

        Self {
            board_size: snapshot.board().rows(),
            step_count: snapshot.step_count(),
            board: snapshot.board().to_rows(),
            agents,
            bombs,
            flames,
            items,
            intended_actions: Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Each top-level field rendered as its own JSON document, the form the
    /// environment's clone loader reads.
    pub fn to_json_fields(&self) -> serde_json::Result<BTreeMap<String, String>> {
        let mut fields = BTreeMap::new();
        if let serde_json::Value::Object(map) = serde_json::to_value(self)? {
            for (key, value) in map {
                fields.insert(key, serde_json::to_string(&value)?);
            }
        }
        Ok(fields)
    }
}
