//! The per-response aggregate of extracted deltas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::item::ItemQuantity;
use crate::stat::Stat;

/// An effect granted by a response, with the turns it adds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EffectGrant {
    pub name: String,
    pub turns: i64,
}

impl EffectGrant {
    #[must_use]
    pub fn new(name: impl Into<String>, turns: i64) -> Self {
        Self {
            name: name.into(),
            turns,
        }
    }
}

/// Every delta extracted from one game response.
///
/// A zero (or empty) field means nothing of that kind happened. Point and
/// level deltas use the sentinel `2` for "two or more": the game does not say
/// how many were gained beyond one.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ResourceGain {
    items: Vec<ItemQuantity>,
    adventures: i64,
    inebriety: i64,
    substats: BTreeMap<Stat, i64>,
    stats: BTreeMap<Stat, i64>,
    levels: i64,
    effects: Vec<EffectGrant>,
    hp: i64,
    mp: i64,
    meat: i64,
}

impl ResourceGain {
    #[must_use]
    pub fn builder() -> ResourceGainBuilder {
        ResourceGainBuilder::new()
    }

    /// Items gained, in the order they appear in the response.
    #[must_use]
    pub fn items(&self) -> &[ItemQuantity] {
        &self.items
    }

    #[must_use]
    pub const fn adventures(&self) -> i64 {
        self.adventures
    }

    #[must_use]
    pub const fn inebriety(&self) -> i64 {
        self.inebriety
    }

    /// Substat deltas, the exact sub-point figures the game prints.
    #[must_use]
    pub const fn substats(&self) -> &BTreeMap<Stat, i64> {
        &self.substats
    }

    /// Whole stat point deltas (`±1`, or the `±2` sentinel).
    #[must_use]
    pub const fn stats(&self) -> &BTreeMap<Stat, i64> {
        &self.stats
    }

    #[must_use]
    pub const fn levels(&self) -> i64 {
        self.levels
    }

    #[must_use]
    pub fn effects(&self) -> &[EffectGrant] {
        &self.effects
    }

    #[must_use]
    pub const fn hp(&self) -> i64 {
        self.hp
    }

    #[must_use]
    pub const fn mp(&self) -> i64 {
        self.mp
    }

    #[must_use]
    pub const fn meat(&self) -> i64 {
        self.meat
    }

    /// True when the response carried no recognizable delta at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Builder for constructing a [`ResourceGain`].
///
/// Every field defaults to zero, so only the deltas that occurred need to be set.
#[derive(Debug, Default)]
pub struct ResourceGainBuilder {
    gain: ResourceGain,
}

impl ResourceGainBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(mut self, items: Vec<ItemQuantity>) -> Self {
        self.gain.items = items;
        self
    }

    #[must_use]
    pub fn item(mut self, item: ItemQuantity) -> Self {
        self.gain.items.push(item);
        self
    }

    #[must_use]
    pub const fn adventures(mut self, adventures: i64) -> Self {
        self.gain.adventures = adventures;
        self
    }

    #[must_use]
    pub const fn inebriety(mut self, inebriety: i64) -> Self {
        self.gain.inebriety = inebriety;
        self
    }

    #[must_use]
    pub fn substats(mut self, substats: BTreeMap<Stat, i64>) -> Self {
        self.gain.substats = substats;
        self
    }

    #[must_use]
    pub fn stats(mut self, stats: BTreeMap<Stat, i64>) -> Self {
        self.gain.stats = stats;
        self
    }

    #[must_use]
    pub fn stat(mut self, stat: Stat, points: i64) -> Self {
        self.gain.stats.insert(stat, points);
        self
    }

    #[must_use]
    pub const fn levels(mut self, levels: i64) -> Self {
        self.gain.levels = levels;
        self
    }

    #[must_use]
    pub fn effects(mut self, effects: Vec<EffectGrant>) -> Self {
        self.gain.effects = effects;
        self
    }

    #[must_use]
    pub fn effect(mut self, name: impl Into<String>, turns: i64) -> Self {
        self.gain.effects.push(EffectGrant::new(name, turns));
        self
    }

    #[must_use]
    pub const fn hp(mut self, hp: i64) -> Self {
        self.gain.hp = hp;
        self
    }

    #[must_use]
    pub const fn mp(mut self, mp: i64) -> Self {
        self.gain.mp = mp;
        self
    }

    #[must_use]
    pub const fn meat(mut self, meat: i64) -> Self {
        self.gain.meat = meat;
        self
    }

    #[must_use]
    pub fn build(self) -> ResourceGain {
        self.gain
    }
}
