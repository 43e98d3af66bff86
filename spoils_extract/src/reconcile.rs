//! Folding an aggregate into character state.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use spoils_core::{CharacterState, ResourceGain};

/// Applies every delta of `gain` to `state`.
///
/// Stat points move base and buffed together. Substat deltas are left to the
/// authoritative character sheet. Nothing is clamped to game limits; counters
/// only stop at the ends of the `i64` range.
pub fn apply(gain: &ResourceGain, state: &mut CharacterState) {
    for iq in gain.items() {
        let count = state.inventory.entry(Arc::clone(&iq.item)).or_insert(0);
        *count = count.saturating_add(iq.quantity);
    }

    state.adventures = state.adventures.saturating_add(gain.adventures());
    state.inebriety = state.inebriety.saturating_add(gain.inebriety());

    for (stat, change) in gain.stats() {
        let value = state.stats.entry(*stat).or_default();
        value.base = value.base.saturating_add(*change);
        value.buffed = value.buffed.saturating_add(*change);
    }

    state.level = state.level.saturating_add(gain.levels());

    for effect in gain.effects() {
        let turns = state.effects.entry(effect.name.clone()).or_insert(0);
        *turns = turns.saturating_add(effect.turns);
    }

    state.meat = state.meat.saturating_add(gain.meat());
    state.current_hp = state.current_hp.saturating_add(gain.hp());
    state.current_mp = state.current_mp.saturating_add(gain.mp());
}

/// Character state shared between concurrent reconcilers.
///
/// Each [`reconcile`](Self::reconcile) holds the lock for the whole apply, so
/// no reader sees half of an aggregate.
#[derive(Clone, Default)]
pub struct SharedCharacterState {
    inner: Arc<Mutex<CharacterState>>,
}

impl SharedCharacterState {
    #[must_use]
    pub fn new(state: CharacterState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn reconcile(&self, gain: &ResourceGain) {
        let mut state = self.inner.lock().await;
        apply(gain, &mut state);
        info!(
            "Reconciled response: meat {}, hp {}, mp {}, adventures {}",
            state.meat, state.current_hp, state.current_mp, state.adventures
        );
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> CharacterState {
        self.inner.lock().await.clone()
    }
}
