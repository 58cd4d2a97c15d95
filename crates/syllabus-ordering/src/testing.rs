use crate::memory::MemoryStore;
use crate::store::OrderedItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestItem {
    pub id: char,
    pub scope: u32,
    pub order: i32,
}

impl TestItem {
    pub fn new(id: char, scope: u32, order: i32) -> Self {
        Self { id, scope, order }
    }
}

impl OrderedItem for TestItem {
    type Id = char;
    type ScopeId = u32;

    const KIND: &'static str = "Item";
    const SCOPE_KIND: &'static str = "List";

    fn id(&self) -> char {
        self.id
    }

    fn scope_id(&self) -> u32 {
        self.scope
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

/// Scope 1 holds A..E at orders 0..4, scope 2 holds X and Y.
pub async fn five_item_store() -> MemoryStore<TestItem> {
    let store = MemoryStore::new();
    for (order, id) in (0..).zip(['A', 'B', 'C', 'D', 'E']) {
        store.insert(TestItem::new(id, 1, order)).await;
    }
    store.insert(TestItem::new('X', 2, 0)).await;
    store.insert(TestItem::new('Y', 2, 1)).await;
    store
}

pub fn sequence(items: &[TestItem]) -> String {
    items.iter().map(|item| item.id).collect()
}
