use super::bombs::BombEvents;
use crate::error::{Result, TrackError};
use crate::model::agent::{AgentId, SelfView, TrackedAgent};
use crate::model::item::Item;
use crate::model::position::Position;
use crate::model::snapshot::BoardSnapshot;
use std::collections::BTreeMap;

/// Live and dead agents with their inferred abilities.
#[derive(Debug, Clone)]
pub struct AgentTracker {
    live: BTreeMap<AgentId, TrackedAgent>,
    dead: BTreeMap<AgentId, TrackedAgent>,
    initial_ammo: u32,
    initial_blast_radius: u32,
    excluded: Option<AgentId>,
    /// Last board cell of the excluded agent; never exposed as tracked state.
    excluded_position: Option<Position>,
}

impl AgentTracker {
    pub fn new(initial_ammo: u32, initial_blast_radius: u32) -> Self {
        Self {
            live: BTreeMap::new(),
            dead: BTreeMap::new(),
            initial_ammo,
            initial_blast_radius,
            excluded: None,
            excluded_position: None,
        }
    }

    /// Never track `id`; used to leave the controlling agent out.
    pub fn exclude(&mut self, id: AgentId) {
        self.excluded = Some(id);
        self.live.remove(&id);
    }

    /// Last known cell of every agent on the board, the excluded one included.
    pub fn observed(&self) -> impl Iterator<Item = (AgentId, Position)> + '_ {
        let excluded = self.excluded.zip(self.excluded_position);
        self.live
            .values()
            .map(|agent| (agent.id, agent.position))
            .chain(excluded)
    }

    pub fn live(&self) -> impl Iterator<Item = &TrackedAgent> {
        self.live.values()
    }

    pub fn dead(&self) -> impl Iterator<Item = &TrackedAgent> {
        self.dead.values()
    }

    pub fn get(&self, id: AgentId) -> Option<&TrackedAgent> {
        self.live.get(&id)
    }

    pub fn is_dead(&self, id: AgentId) -> bool {
        self.dead.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn clear(&mut self) {
        self.live.clear();
        self.dead.clear();
        self.excluded = None;
        self.excluded_position = None;
    }

    /// Starts tracking every alive agent that is visible on the first board.
    pub fn init(&mut self, snapshot: &BoardSnapshot) {
        self.live.clear();
        self.dead.clear();
        self.discover(snapshot);
        self.refresh_excluded(snapshot);
    }

    /// Fails when an agent reported alive cannot be found on the board. Run
    /// before any tracker mutates so that a faulty snapshot changes nothing.
    pub fn check_visible(&self, snapshot: &BoardSnapshot) -> Result<()> {
        let step = snapshot.step_count();
        for id in self.live.keys().filter(|id| snapshot.is_alive(**id)) {
            if snapshot.locate(*id).is_none() {
                return Err(TrackError::AgentNotOnBoard { id: *id, step });
            }
        }
        Ok(())
    }

    pub fn update(
        &mut self,
        snapshot: &BoardSnapshot,
        missing_items: &[Item],
        bombs: &BombEvents,
    ) -> Result<()> {
        let step = snapshot.step_count();

        let departed: Vec<AgentId> = self
            .live
            .keys()
            .filter(|id| !snapshot.is_alive(**id))
            .copied()
            .collect();
        for id in departed {
            if let Some(agent) = self.live.remove(&id) {
                tracing::debug!(
                    target: "pommer_core::agents",
                    step,
                    agent = %id,
                    last_position = %agent.position,
                    "agent died"
                );
                self.dead.insert(id, agent);
            }
        }

        for agent in self.live.values_mut() {
            agent.position = snapshot
                .locate(agent.id)
                .ok_or(TrackError::AgentNotOnBoard { id: agent.id, step })?;
        }
        self.discover(snapshot);
        self.refresh_excluded(snapshot);

        for item in missing_items {
            if let Some(agent) = self
                .live
                .values_mut()
                .find(|agent| agent.position == item.position)
            {
                agent.add_ability(item.kind);
                tracing::debug!(
                    target: "pommer_core::agents",
                    step,
                    agent = %agent.id,
                    kind = ?item.kind,
                    "picked up item"
                );
            }
        }
        for bomb in &bombs.laid {
            if let Some(owner) = self.live.get_mut(&bomb.owner) {
                owner.observe_blast_radius(bomb.blast_radius);
            }
        }
        for kicker in bombs.kicked.iter().filter_map(|bomb| bomb.kicked_by) {
            if let Some(agent) = self.live.get_mut(&kicker) {
                agent.can_kick = true;
            }
        }
        for bomb in &bombs.exploded {
            if let Some(owner) = self.live.get_mut(&bomb.owner) {
                owner.ammo += 1;
            }
        }
        for bomb in &bombs.laid {
            if let Some(owner) = self.live.get_mut(&bomb.owner) {
                if owner.ammo == 0 {
                    tracing::warn!(
                        target: "pommer_core::agents",
                        step,
                        agent = %owner.id,
                        "bomb laid with no tracked ammo"
                    );
                }
                owner.ammo = owner.ammo.saturating_sub(1);
            }
        }

        Ok(())
    }

    /// Replaces the inferred abilities of `view.id` with its own observation.
    pub fn apply_self_view(&mut self, view: &SelfView) {
        if let Some(agent) = self.live.get_mut(&view.id) {
            agent.is_self = true;
            agent.ammo = view.ammo;
            agent.blast_radius = view.blast_radius;
            agent.can_kick = view.can_kick;
        }
    }

    fn refresh_excluded(&mut self, snapshot: &BoardSnapshot) {
        self.excluded_position = self
            .excluded
            .filter(|id| snapshot.is_alive(*id))
            .and_then(|id| snapshot.locate(id));
    }

    fn discover(&mut self, snapshot: &BoardSnapshot) {
        for &id in snapshot.alive() {
            if self.live.contains_key(&id) || self.dead.contains_key(&id) || self.excluded == Some(id) {
                continue;
            }
            let Some(position) = snapshot.locate(id) else {
                continue;
            };
            tracing::debug!(
                target: "pommer_core::agents",
                step = snapshot.step_count(),
                agent = %id,
                %position,
                "tracking agent"
            );
            self.live.insert(
                id,
                TrackedAgent::new(id, position, self.initial_ammo, self.initial_blast_radius),
            );
        }
    }
}
