#![allow(dead_code)]

use pommer_core::model::cell;
use pommer_core::{AgentId, BoardSnapshot, Direction, Grid, ItemKind, Position};
use rand::Rng;

pub const BOMB_LIFE: u32 = 9;
pub const START_AMMO: u32 = 1;
pub const START_BLAST: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Act {
    Stay,
    Lay,
    Move(Direction),
}

#[derive(Debug, Clone)]
pub struct TrueAgent {
    pub id: AgentId,
    pub position: Position,
    pub ammo: u32,
    pub blast_radius: u32,
    pub can_kick: bool,
    pub alive: bool,
}

#[derive(Debug, Clone)]
pub struct TrueBomb {
    /// Index in lay order.
    pub serial: u64,
    pub owner: AgentId,
    pub position: Position,
    pub life: u32,
    pub blast_radius: u32,
    pub rolling: Option<Direction>,
    pub ever_kicked: bool,
}

/// Ground-truth game world with just enough rules to exercise the tracker:
/// agents walk, lay bombs, pick up items and kick; bombs count down and vanish
/// at zero without flames.
#[derive(Debug, Clone)]
pub struct World {
    pub terrain: Grid<u8>,
    pub agents: Vec<TrueAgent>,
    pub bombs: Vec<TrueBomb>,
    pub step: u32,
    next_serial: u64,
}

impl World {
    pub fn open(rows: usize, cols: usize) -> Self {
        Self {
            terrain: Grid::new(rows, cols),
            agents: Vec::new(),
            bombs: Vec::new(),
            step: 0,
            next_serial: 0,
        }
    }

    /// Board with rigid pillars on every odd (row, col) cell.
    pub fn pillars(size: usize) -> Self {
        let mut world = Self::open(size, size);
        for row in (1..size).step_by(2) {
            for col in (1..size).step_by(2) {
                world.terrain.set(Position::new(row, col), cell::RIGID);
            }
        }
        world
    }

    pub fn add_agent(&mut self, id: u8, position: Position) {
        self.agents.push(TrueAgent {
            id: AgentId(id),
            position,
            ammo: START_AMMO,
            blast_radius: START_BLAST,
            can_kick: false,
            alive: true,
        });
    }

    pub fn agent(&self, id: u8) -> &TrueAgent {
        self.agents
            .iter()
            .find(|agent| agent.id == AgentId(id))
            .expect("agent exists")
    }

    pub fn agent_mut(&mut self, id: u8) -> &mut TrueAgent {
        self.agents
            .iter_mut()
            .find(|agent| agent.id == AgentId(id))
            .expect("agent exists")
    }

    pub fn place_item(&mut self, position: Position, kind: ItemKind) {
        self.terrain.set(position, kind.code());
    }

    pub fn kill(&mut self, id: u8) {
        self.agent_mut(id).alive = false;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let (rows, cols) = self.terrain.shape();
        let mut board = self.terrain.clone();
        let mut life = Grid::<u8>::new(rows, cols);
        let mut blast = Grid::<u8>::new(rows, cols);
        for bomb in &self.bombs {
            board.set(bomb.position, cell::BOMB);
            life.set(bomb.position, bomb.life as u8);
            blast.set(bomb.position, bomb.blast_radius as u8);
        }
        for agent in self.agents.iter().filter(|agent| agent.alive) {
            board.set(agent.position, agent.id.code());
        }
        let alive = self
            .agents
            .iter()
            .filter(|agent| agent.alive)
            .map(|agent| agent.id);
        BoardSnapshot::new(board, life, blast, alive, self.step).expect("consistent grids")
    }

    /// One tick: agents act in id order, then bombs roll and count down.
    /// Bombs laid this tick neither roll nor count down.
    pub fn advance(&mut self, acts: &[(u8, Act)]) {
        self.step += 1;
        let fresh_from = self.next_serial;
        let mut kicked_now = Vec::new();
        let order: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|agent| agent.alive)
            .map(|agent| agent.id)
            .collect();
        for id in order {
            let act = acts
                .iter()
                .find(|(raw, _)| AgentId(*raw) == id)
                .map(|(_, act)| *act)
                .unwrap_or(Act::Stay);
            match act {
                Act::Stay => {}
                Act::Lay => self.lay(id),
                Act::Move(direction) => {
                    if let Some(serial) = self.walk(id, direction) {
                        kicked_now.push(serial);
                    }
                }
            }
        }

        for index in 0..self.bombs.len() {
            let (serial, position, rolling) = {
                let bomb = &self.bombs[index];
                (bomb.serial, bomb.position, bomb.rolling)
            };
            if serial >= fresh_from {
                continue;
            }
            if let Some(direction) = rolling.filter(|_| !kicked_now.contains(&serial)) {
                match position.step(direction).filter(|next| self.free_for_bomb(*next)) {
                    Some(next) => self.bombs[index].position = next,
                    None => self.bombs[index].rolling = None,
                }
            }
            self.bombs[index].life -= 1;
        }

        let (gone, kept): (Vec<TrueBomb>, Vec<TrueBomb>) =
            self.bombs.drain(..).partition(|bomb| bomb.life == 0);
        self.bombs = kept;
        for bomb in gone {
            if let Some(owner) = self.agents.iter_mut().find(|agent| agent.id == bomb.owner) {
                owner.ammo += 1;
            }
        }
    }

    /// Drops a random item on a free passage cell.
    pub fn spawn_item(&mut self, rng: &mut impl Rng) {
        let (rows, cols) = self.terrain.shape();
        for _ in 0..8 {
            let pos = Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
            if self.terrain[pos] == cell::PASSAGE && self.occupant(pos).is_none() && !self.has_bomb(pos) {
                let kind = ItemKind::ALL[rng.gen_range(0..ItemKind::ALL.len())];
                self.place_item(pos, kind);
                return;
            }
        }
    }

    pub fn random_act(rng: &mut impl Rng) -> Act {
        match rng.gen_range(0..7usize) {
            0 | 1 => Act::Stay,
            2 => Act::Lay,
            n => Act::Move(Direction::RESOLUTION_ORDER[n - 3]),
        }
    }

    fn lay(&mut self, id: AgentId) {
        let Some(agent) = self.agents.iter().find(|agent| agent.id == id) else {
            return;
        };
        if agent.ammo == 0 || self.has_bomb(agent.position) {
            return;
        }
        let (position, blast_radius) = (agent.position, agent.blast_radius);
        self.bombs.push(TrueBomb {
            serial: self.next_serial,
            owner: id,
            position,
            life: BOMB_LIFE,
            blast_radius,
            rolling: None,
            ever_kicked: false,
        });
        self.next_serial += 1;
        if let Some(agent) = self.agents.iter_mut().find(|agent| agent.id == id) {
            agent.ammo -= 1;
        }
    }

    /// Moves `id` one cell, kicking a bomb in the way when able. Returns the
    /// serial of a kicked bomb.
    fn walk(&mut self, id: AgentId, direction: Direction) -> Option<u64> {
        let agent = self.agents.iter().find(|agent| agent.id == id)?;
        let can_kick = agent.can_kick;
        let target = agent.position.step(direction)?;
        if !self.terrain.contains(target) || self.terrain[target] == cell::RIGID {
            return None;
        }
        if self.occupant(target).is_some() {
            return None;
        }

        let mut kicked = None;
        if let Some(index) = self.bombs.iter().position(|bomb| bomb.position == target) {
            let beyond = target.step(direction).filter(|next| self.free_for_bomb(*next))?;
            if !can_kick {
                return None;
            }
            let bomb = &mut self.bombs[index];
            bomb.position = beyond;
            bomb.rolling = Some(direction);
            bomb.ever_kicked = true;
            kicked = Some(bomb.serial);
        }

        let picked = ItemKind::from_code(self.terrain[target]);
        if picked.is_some() {
            self.terrain.set(target, cell::PASSAGE);
        }
        let agent = self.agents.iter_mut().find(|agent| agent.id == id)?;
        agent.position = target;
        match picked {
            Some(ItemKind::ExtraAmmo) => agent.ammo += 1,
            Some(ItemKind::IncreaseBlastRadius) => agent.blast_radius += 1,
            Some(ItemKind::EnableKick) => agent.can_kick = true,
            None => {}
        }
        kicked
    }

    fn occupant(&self, pos: Position) -> Option<AgentId> {
        self.agents
            .iter()
            .find(|agent| agent.alive && agent.position == pos)
            .map(|agent| agent.id)
    }

    fn has_bomb(&self, pos: Position) -> bool {
        self.bombs.iter().any(|bomb| bomb.position == pos)
    }

    fn free_for_bomb(&self, pos: Position) -> bool {
        self.terrain.get(pos) == Some(cell::PASSAGE) && self.occupant(pos).is_none() && !self.has_bomb(pos)
    }
}
