//! Long-lived character state that aggregates are reconciled into.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::item::Item;
use crate::stat::Stat;

/// A stat tracked as its unmodified and its effective value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatValue {
    pub base: i64,
    pub buffed: i64,
}

impl StatValue {
    #[must_use]
    pub const fn new(base: i64, buffed: i64) -> Self {
        Self { base, buffed }
    }
}

/// Mutable character state owned by the calling session.
///
/// Counters may go negative: clamping is left to whoever owns the state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CharacterState {
    #[serde(default, with = "inventory_entries")]
    pub inventory: HashMap<Arc<Item>, i64>,
    #[serde(default)]
    pub stats: BTreeMap<Stat, StatValue>,
    /// Active effects and their remaining turns.
    #[serde(default)]
    pub effects: BTreeMap<String, i64>,
    #[serde(default)]
    pub meat: i64,
    #[serde(default)]
    pub current_hp: i64,
    #[serde(default)]
    pub current_mp: i64,
    #[serde(default)]
    pub adventures: i64,
    #[serde(default)]
    pub inebriety: i64,
    #[serde(default)]
    pub level: i64,
}

impl CharacterState {
    /// Units of `item` held, zero if none.
    #[must_use]
    pub fn inventory_count(&self, item: &Item) -> i64 {
        self.inventory.get(item).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn stat(&self, stat: Stat) -> StatValue {
        self.stats.get(&stat).copied().unwrap_or_default()
    }

    /// Remaining turns of an effect, `None` if it is not active.
    #[must_use]
    pub fn effect_turns(&self, name: &str) -> Option<i64> {
        self.effects.get(name).copied()
    }
}

/// Inventory keys are items, which JSON maps cannot hold, so the inventory
/// is stored as a list of `{item, count}` entries ordered by item id.
mod inventory_entries {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::item::Item;

    #[derive(Serialize)]
    struct EntryRef<'a> {
        item: &'a Item,
        count: i64,
    }

    #[derive(Deserialize)]
    struct Entry {
        item: Item,
        count: i64,
    }

    pub fn serialize<S: Serializer>(
        inventory: &HashMap<Arc<Item>, i64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<EntryRef<'_>> = inventory
            .iter()
            .map(|(item, count)| EntryRef {
                item: item.as_ref(),
                count: *count,
            })
            .collect();
        entries.sort_by_key(|e| (e.item.id, e.item.description_key));
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<Arc<Item>, i64>, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        let mut inventory = HashMap::with_capacity(entries.len());
        for entry in entries {
            let count = inventory.entry(Arc::new(entry.item)).or_insert(0_i64);
            *count = count.saturating_add(entry.count);
        }
        Ok(inventory)
    }
}
