//! In-memory [`OrderedStore`] backend.
//!
//! A transaction holds the store's lock from `begin` until it is committed
//! or dropped, which serializes all ordering work on the store. Writes are
//! staged on a copy of the items and only replace the committed state on
//! [`OrderedTransaction::commit`].

use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::OrderingError;
use crate::store::{ItemId, OrderedItem, OrderedStore, OrderedTransaction, ScopeId};

struct MemoryState<T: OrderedItem> {
    scopes: HashSet<ScopeId<T>>,
    items: HashMap<ItemId<T>, T>,
    fail_after_writes: Option<usize>,
}

/// Shared, cloneable in-memory store.
pub struct MemoryStore<T: OrderedItem> {
    state: Arc<Mutex<MemoryState<T>>>,
}

impl<T: OrderedItem> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: OrderedItem> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OrderedItem> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                scopes: HashSet::new(),
                items: HashMap::new(),
                fail_after_writes: None,
            })),
        }
    }

    pub async fn add_scope(&self, scope: ScopeId<T>) {
        self.state.lock().await.scopes.insert(scope);
    }

    /// Inserts an item as-is, registering its scope.
    pub async fn insert(&self, item: T) {
        let mut state = self.state.lock().await;
        state.scopes.insert(item.scope_id());
        state.items.insert(item.id(), item);
    }

    pub async fn get(&self, id: ItemId<T>) -> Option<T> {
        self.state.lock().await.items.get(&id).cloned()
    }

    /// `(id, order)` pairs of `scope`, sorted by order then id.
    pub async fn orders(&self, scope: ScopeId<T>) -> Vec<(ItemId<T>, i32)> {
        let state = self.state.lock().await;
        sorted_scope(&state.items, scope)
            .into_iter()
            .map(|item| (item.id(), item.order()))
            .collect()
    }

    /// Ids of `scope` concatenated in order.
    pub async fn sequence(&self, scope: ScopeId<T>) -> String {
        self.orders(scope)
            .await
            .into_iter()
            .map(|(id, _)| id.to_string())
            .collect()
    }

    /// Makes every transaction fail once it has performed `writes` writes.
    pub async fn fail_writes_after(&self, writes: usize) {
        self.state.lock().await.fail_after_writes = Some(writes);
    }

    pub async fn clear_failures(&self) {
        self.state.lock().await.fail_after_writes = None;
    }
}

fn sorted_scope<T: OrderedItem>(items: &HashMap<ItemId<T>, T>, scope: ScopeId<T>) -> Vec<T> {
    let mut siblings: Vec<T> = items
        .values()
        .filter(|item| item.scope_id() == scope)
        .cloned()
        .collect();
    siblings.sort_by_key(|item| (item.order(), item.id()));
    siblings
}

/// Transaction over a [`MemoryStore`]; dropping it discards staged writes.
pub struct MemoryTransaction<T: OrderedItem> {
    state: OwnedMutexGuard<MemoryState<T>>,
    staged: HashMap<ItemId<T>, T>,
    writes: usize,
}

impl<T: OrderedItem> MemoryTransaction<T> {
    fn record_write(&mut self) -> Result<(), OrderingError> {
        if let Some(limit) = self.state.fail_after_writes {
            if self.writes >= limit {
                return Err(OrderingError::storage("injected write failure"));
            }
        }
        self.writes += 1;
        Ok(())
    }

    /// Stages a new item.
    pub fn insert(&mut self, item: T) {
        self.staged.insert(item.id(), item);
    }

    /// Stages the removal of an item.
    pub fn remove(&mut self, id: ItemId<T>) -> Option<T> {
        self.staged.remove(&id)
    }
}

impl<T: OrderedItem> OrderedStore for MemoryStore<T> {
    type Item = T;
    type Tx = MemoryTransaction<T>;

    async fn begin(&self) -> Result<Self::Tx, OrderingError> {
        let state = Arc::clone(&self.state).lock_owned().await;
        let staged = state.items.clone();

        Ok(MemoryTransaction {
            state,
            staged,
            writes: 0,
        })
    }
}

impl<T: OrderedItem> OrderedTransaction for MemoryTransaction<T> {
    type Item = T;

    async fn lock_scope(&mut self, scope: ScopeId<T>) -> Result<bool, OrderingError> {
        Ok(self.state.scopes.contains(&scope))
    }

    async fn find_by_id(&mut self, id: ItemId<T>) -> Result<Option<T>, OrderingError> {
        Ok(self.staged.get(&id).cloned())
    }

    async fn list_by_scope(&mut self, scope: ScopeId<T>) -> Result<Vec<T>, OrderingError> {
        Ok(sorted_scope(&self.staged, scope))
    }

    async fn shift_range(
        &mut self,
        scope: ScopeId<T>,
        range: RangeInclusive<i32>,
        delta: i32,
    ) -> Result<u64, OrderingError> {
        self.record_write()?;

        let mut shifted = 0;
        for item in self.staged.values_mut() {
            if item.scope_id() == scope && range.contains(&item.order()) {
                item.set_order(item.order() + delta);
                shifted += 1;
            }
        }
        Ok(shifted)
    }

    async fn set_order(&mut self, id: ItemId<T>, order: i32) -> Result<bool, OrderingError> {
        self.record_write()?;

        match self.staged.get_mut(&id) {
            Some(item) => {
                item.set_order(order);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn commit(self) -> Result<(), OrderingError> {
        let MemoryTransaction {
            mut state, staged, ..
        } = self;
        state.items = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestItem, five_item_store};

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let store = five_item_store().await;
        let before = store.orders(1).await;

        {
            let mut tx = store.begin().await.unwrap();
            tx.shift_range(1, 0..=4, 10).await.unwrap();
            tx.set_order('A', 3).await.unwrap();
        }

        assert_eq!(store.orders(1).await, before);
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let store = five_item_store().await;

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.shift_range(1, 3..=4, 1).await.unwrap(), 2);
        tx.commit().await.unwrap();

        assert_eq!(store.get('D').await.unwrap().order, 4);
        assert_eq!(store.get('E').await.unwrap().order, 5);
    }

    #[tokio::test]
    async fn test_set_order_on_missing_item() {
        let store = five_item_store().await;
        let mut tx = store.begin().await.unwrap();

        assert!(!tx.set_order('Z', 0).await.unwrap());
    }

    #[tokio::test]
    async fn test_injected_failure_can_be_cleared() {
        let store = MemoryStore::new();
        store.insert(TestItem::new('A', 1, 0)).await;
        store.fail_writes_after(0).await;

        let mut tx = store.begin().await.unwrap();
        assert!(tx.set_order('A', 1).await.unwrap_err().is_storage());
        drop(tx);

        store.clear_failures().await;
        let mut tx = store.begin().await.unwrap();
        assert!(tx.set_order('A', 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_lock_scope_reports_known_scopes() {
        let store = five_item_store().await;
        let mut tx = store.begin().await.unwrap();

        assert!(tx.lock_scope(1).await.unwrap());
        assert!(!tx.lock_scope(3).await.unwrap());
    }
}
