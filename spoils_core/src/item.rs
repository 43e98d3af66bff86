use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ResolveError;

/// Canonical item entity.
///
/// The description key is the opaque number embedded in item markup
/// (`descitem(…)`); it is what response text refers to, while `id` is the
/// item's own number. Two items are the same item when their description
/// keys match, whatever name each source spelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub description_key: u64,
    pub name: String,
}

impl Item {
    #[must_use]
    pub fn new(id: u32, description_key: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            description_key,
            name: name.into(),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.description_key == other.description_key
    }
}

impl Eq for Item {}

impl std::hash::Hash for Item {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.description_key.hash(state);
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// A number of units of one item gained in one response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemQuantity {
    pub item: Arc<Item>,
    pub quantity: i64,
}

impl ItemQuantity {
    #[must_use]
    pub const fn new(item: Arc<Item>, quantity: i64) -> Self {
        Self { item, quantity }
    }
}

/// Resolves a description key to its canonical item.
///
/// Implementations must be safe to call concurrently and must hand back the
/// same `Arc` for the same key on repeated calls.
#[async_trait]
pub trait ItemResolver: Send + Sync {
    async fn resolve(&self, description_key: u64) -> Result<Arc<Item>, ResolveError>;
}

#[async_trait]
impl<T: ItemResolver + ?Sized> ItemResolver for Arc<T> {
    async fn resolve(&self, description_key: u64) -> Result<Arc<Item>, ResolveError> {
        (**self).resolve(description_key).await
    }
}
