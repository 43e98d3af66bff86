//! Integration tests for folding extracted gains into character state.
//!
//! These tests verify that:
//! - Items from successive responses accumulate under one inventory entry
//! - Effect durations add to turns already remaining
//! - Stat point losses move base and buffed values together
//! - Reconciled state survives a JSON round trip through a state file

use async_trait::async_trait;
use spoils_core::{CharacterState, Item, ItemResolver, ResolveError, Stat, StatValue};
use spoils_extract::{CachingResolver, SharedCharacterState, build};
use std::sync::Arc;

struct Pantry;

#[async_trait]
impl ItemResolver for Pantry {
    async fn resolve(&self, description_key: u64) -> Result<Arc<Item>, ResolveError> {
        match description_key {
            228_337_790 => Ok(Arc::new(Item::new(412, 228_337_790, "chewing gum on a string"))),
            _ => Err(ResolveError::lookup_failed(description_key, "not stocked")),
        }
    }
}

fn gum_drop(count: i64) -> String {
    let tail = if count == 1 {
        "an item: <b>chewing gum on a string</b>".to_string()
    } else {
        format!("<b>{count} chewing gums on a string</b>")
    };
    format!(
        "<table class=\"item\"><tr><td><img src=\"/itemimages/gum.gif\" alt=\"chewing gum on a string\" \
         title=\"chewing gum on a string\" class=hand onClick='descitem(228337790)'></td>\
         <td valign=center class=effect>You acquire {tail}</td></tr></table>"
    )
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn test_items_accumulate_across_responses() {
    let resolver = CachingResolver::new(Pantry);
    let shared = SharedCharacterState::default();

    let first = build(&gum_drop(3), &resolver).await.expect("first response");
    shared.reconcile(&first).await;
    let second = build(&gum_drop(2), &resolver).await.expect("second response");
    shared.reconcile(&second).await;

    let state = shared.snapshot().await;
    let gum = resolver.cached(228_337_790).expect("gum should be cached");
    assert_eq!(state.inventory.len(), 1);
    assert_eq!(state.inventory_count(&gum), 5);
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn test_effect_turns_extend_remaining_duration() {
    let text = concat!(
        "<td class=effect>You acquire an effect: <b>Heavy Petting</b><br>(duration: 5 Adventures)</td>",
        "<td class=effect>You acquire an effect: <b>Heavy Petting</b><br>(duration: 10 Adventures)</td>",
    );
    let mut state = CharacterState::default();
    state.effects.insert("Heavy Petting".to_string(), 4);
    let shared = SharedCharacterState::new(state);

    let gain = build(text, &Pantry).await.expect("build should succeed");
    assert_eq!(gain.effects().len(), 2);
    shared.reconcile(&gain).await;

    let state = shared.snapshot().await;
    assert_eq!(state.effect_turns("Heavy Petting"), Some(4 + 15));
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn test_stat_point_loss_moves_base_and_buffed() {
    let mut state = CharacterState::default();
    state.stats.insert(Stat::Muscle, StatValue::new(20, 25));
    state.stats.insert(Stat::Moxie, StatValue::new(8, 8));
    let shared = SharedCharacterState::new(state);

    let gain = build("You lose a Muscle point.", &Pantry)
        .await
        .expect("build should succeed");
    shared.reconcile(&gain).await;

    let state = shared.snapshot().await;
    assert_eq!(state.stat(Stat::Muscle), StatValue::new(19, 24));
    assert_eq!(state.stat(Stat::Moxie), StatValue::new(8, 8));
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn test_reconciled_state_round_trips_through_json() {
    let resolver = CachingResolver::new(Pantry);
    let text = format!("{}You gain 250 Meat. You gain 1 Drunkenness.", gum_drop(3));
    let gain = build(&text, &resolver).await.expect("build should succeed");

    let shared = SharedCharacterState::default();
    shared.reconcile(&gain).await;
    let state = shared.snapshot().await;

    let json = serde_json::to_string(&state).expect("state should serialize");
    let restored: CharacterState = serde_json::from_str(&json).expect("state should deserialize");

    assert_eq!(restored, state);
    assert_eq!(restored.meat, 250);
    assert_eq!(restored.inebriety, 1);
}
