//! Memoization of item lookups.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use spoils_core::{Item, ItemResolver, ResolveError};

/// Wraps a resolver so each description key is looked up at most once.
///
/// Concurrent first lookups of one key share a single call to the inner
/// resolver and all receive the same `Arc`. A failed lookup is not cached;
/// the next call for that key tries again.
pub struct CachingResolver<R> {
    inner: R,
    cells: Mutex<HashMap<u64, Arc<OnceCell<Arc<Item>>>>>,
}

impl<R: ItemResolver> CachingResolver<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cells: Mutex::new(HashMap::new()),
        }
    }

    fn cell(&self, description_key: u64) -> Arc<OnceCell<Arc<Item>>> {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cells.entry(description_key).or_default())
    }

    /// Forgets the cell of a key whose lookup failed, unless another caller
    /// has since filled or replaced it.
    fn discard_failed(&self, description_key: u64, cell: &Arc<OnceCell<Arc<Item>>>) {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        if cells
            .get(&description_key)
            .is_some_and(|current| Arc::ptr_eq(current, cell) && !current.initialized())
        {
            cells.remove(&description_key);
        }
    }

    /// The cached item for a key, if it has been resolved.
    #[must_use]
    pub fn cached(&self, description_key: u64) -> Option<Arc<Item>> {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&description_key)
            .and_then(|cell| cell.get().cloned())
    }

    /// Number of keys resolved so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<R: ItemResolver> ItemResolver for CachingResolver<R> {
    async fn resolve(&self, description_key: u64) -> Result<Arc<Item>, ResolveError> {
        let cell = self.cell(description_key);
        let item = cell
            .get_or_try_init(|| async {
                debug!("Resolving unseen description key: {}", description_key);
                self.inner.resolve(description_key).await
            })
            .await;

        match item {
            Ok(item) => Ok(Arc::clone(item)),
            Err(e) => {
                warn!("Item lookup failed: {e}");
                self.discard_failed(description_key, &cell);
                Err(e)
            }
        }
    }
}
