use crate::model::item::{Item, ItemKind};
use crate::model::position::Position;
use crate::model::snapshot::BoardSnapshot;
use std::collections::BTreeMap;

/// Power-ups currently visible on the board, keyed by cell.
#[derive(Debug, Clone, Default)]
pub struct ItemTracker {
    items: BTreeMap<Position, Item>,
}

impl ItemTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drops items whose cell no longer shows them and starts tracking newly
    /// visible ones. Returns the items that went missing this tick.
    pub fn update(&mut self, snapshot: &BoardSnapshot) -> Vec<Item> {
        let missing: Vec<Item> = self
            .items
            .values()
            .filter(|item| snapshot.cell(item.position) != item.kind.code())
            .copied()
            .collect();
        for item in &missing {
            self.items.remove(&item.position);
            tracing::debug!(
                target: "pommer_core::items",
                step = snapshot.step_count(),
                kind = ?item.kind,
                position = %item.position,
                "item left the board"
            );
        }

        for (position, code) in snapshot.board().iter() {
            if let Some(kind) = ItemKind::from_code(code) {
                self.items
                    .entry(position)
                    .or_insert_with(|| Item::new(kind, position));
            }
        }

        missing
    }
}
