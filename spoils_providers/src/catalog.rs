//! Resolution from a fixed, preloaded catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use spoils_core::{Item, ItemResolver, ResolveError};

/// Resolves description keys against a catalog known up front.
///
/// Every lookup of a key hands out the same `Arc`.
#[derive(Debug, Clone, Default)]
pub struct StaticItemResolver {
    items: HashMap<u64, Arc<Item>>,
}

impl StaticItemResolver {
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        items.into_iter().collect()
    }

    #[must_use]
    pub fn get(&self, description_key: u64) -> Option<&Arc<Item>> {
        self.items.get(&description_key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for StaticItemResolver {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let items = iter
            .into_iter()
            .map(|item| (item.description_key, Arc::new(item)))
            .collect();
        Self { items }
    }
}

#[async_trait]
impl ItemResolver for StaticItemResolver {
    async fn resolve(&self, description_key: u64) -> Result<Arc<Item>, ResolveError> {
        let item = self
            .get(description_key)
            .cloned()
            .ok_or_else(|| ResolveError::lookup_failed(description_key, "not in the static catalog"))?;
        debug!("Resolved {} from the static catalog", item);
        Ok(item)
    }
}
