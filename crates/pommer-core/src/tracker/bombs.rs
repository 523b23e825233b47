use super::agents::AgentTracker;
use crate::config::TERMINAL_BOMB_LIFE;
use crate::model::bomb::{Bomb, BombId, BombKey};
use crate::model::direction::Direction;
use crate::model::snapshot::BoardSnapshot;
use std::collections::BTreeMap;

/// Bomb lifecycle transitions detected during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BombEvents {
    pub exploded: Vec<Bomb>,
    pub laid: Vec<Bomb>,
    pub kicked: Vec<Bomb>,
}

impl BombEvents {
    pub fn is_empty(&self) -> bool {
        self.exploded.is_empty() && self.laid.is_empty() && self.kicked.is_empty()
    }
}

/// Bombs inferred to be on the board, in lay order.
#[derive(Debug, Clone)]
pub struct BombTracker {
    bombs: BTreeMap<BombId, Bomb>,
    next_id: u64,
    initial_life: u32,
}

impl BombTracker {
    pub fn new(initial_life: u32) -> Self {
        Self {
            bombs: BTreeMap::new(),
            next_id: 0,
            initial_life,
        }
    }

    pub fn bombs(&self) -> impl Iterator<Item = &Bomb> {
        self.bombs.values()
    }

    pub fn len(&self) -> usize {
        self.bombs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bombs.is_empty()
    }

    pub fn clear(&mut self) {
        self.bombs.clear();
        self.next_id = 0;
    }

    /// Advances every bomb by one tick.
    ///
    /// `agents` must still hold last tick's positions: kicks and lays are
    /// recognised by comparing them against the new board.
    pub fn update(&mut self, snapshot: &BoardSnapshot, agents: &AgentTracker) -> BombEvents {
        let step = snapshot.step_count();
        for bomb in self.bombs.values_mut() {
            bomb.tick();
        }

        let mut kicked = Vec::new();
        for bomb in self.bombs.values_mut().filter(|bomb| !bomb.moving) {
            let occupant = snapshot.cell(bomb.position);
            let Some((kicker, from)) = agents
                .observed()
                .find(|(id, position)| id.code() == occupant && *position != bomb.position)
            else {
                continue;
            };
            let direction = Direction::between(from, bomb.position).unwrap_or_else(|| {
                tracing::warn!(
                    target: "pommer_core::bombs",
                    step,
                    %kicker,
                    %from,
                    to = %bomb.position,
                    "kicker did not arrive from a neighbouring cell; assuming up"
                );
                Direction::Up
            });
            bomb.kick(kicker, direction);
            tracing::debug!(
                target: "pommer_core::bombs",
                step,
                owner = %bomb.owner,
                %kicker,
                position = %bomb.position,
                %direction,
                "bomb kicked"
            );
            kicked.push(bomb.clone());
        }

        let exploded_ids: Vec<BombId> = self
            .bombs
            .values()
            .filter(|bomb| {
                if bomb.moving {
                    // A moving bomb's cell is unknown; trust the tracked countdown.
                    bomb.life == TERMINAL_BOMB_LIFE
                } else {
                    u32::from(snapshot.life_at(bomb.position)) == TERMINAL_BOMB_LIFE
                }
            })
            .map(|bomb| bomb.id)
            .collect();
        let exploded: Vec<Bomb> = exploded_ids
            .iter()
            .filter_map(|id| self.bombs.remove(id))
            .collect();
        for bomb in &exploded {
            tracing::debug!(
                target: "pommer_core::bombs",
                step,
                owner = %bomb.owner,
                position = %bomb.position,
                moving = bomb.moving,
                "bomb exploded"
            );
        }

        let mut laid = Vec::new();
        for (owner, position) in agents.observed() {
            if u32::from(snapshot.life_at(position)) != self.initial_life {
                continue;
            }
            let key = BombKey { owner, position };
            if let Some(resting) = self
                .bombs
                .values()
                .find(|bomb| !bomb.moving && bomb.position == key.position)
            {
                tracing::warn!(
                    target: "pommer_core::bombs",
                    step,
                    %owner,
                    %position,
                    resting_owner = %resting.owner,
                    same_key = resting.key() == key,
                    "fresh countdown under an already tracked bomb; not laying again"
                );
                continue;
            }
            let id = BombId(self.next_id);
            self.next_id += 1;
            let bomb = Bomb::laid(
                id,
                owner,
                position,
                u32::from(snapshot.blast_at(position)),
                self.initial_life,
            );
            tracing::debug!(
                target: "pommer_core::bombs",
                step,
                owner = %bomb.owner,
                position = %bomb.position,
                blast_radius = bomb.blast_radius,
                "bomb laid"
            );
            self.bombs.insert(id, bomb.clone());
            laid.push(bomb);
        }

        BombEvents {
            exploded,
            laid,
            kicked,
        }
    }
}
