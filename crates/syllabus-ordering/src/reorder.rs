//! Ordering operations over an [`OrderedStore`].
//!
//! Every operation runs inside one transaction and takes the scope lock
//! before reading sibling positions, so the shifted ranges are computed
//! from a state no concurrent writer can change underneath it.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::ops::RangeInclusive;

use tracing::{debug, info, instrument};

use crate::error::OrderingError;
use crate::store::{ItemId, Key, OrderedItem, OrderedStore, OrderedTransaction, ScopeId};

/// Largest order a caller may assign. Keeps `order + 1` shifts inside `i32`.
pub const MAX_ORDER: i32 = 1_000_000;

/// Target position for one item in a bulk reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<Id> {
    pub item_id: Id,
    pub order: i32,
}

impl<Id> Placement<Id> {
    pub fn new(item_id: Id, order: i32) -> Self {
        Self { item_id, order }
    }
}

/// Range of sibling orders to shift, and by how much, when an item moves
/// from `old_order` to `new_order`. `None` when the item stays put.
pub fn shift_for(old_order: i32, new_order: i32) -> Option<(RangeInclusive<i32>, i32)> {
    match new_order.cmp(&old_order) {
        Ordering::Equal => None,
        Ordering::Greater => Some((old_order + 1..=new_order, -1)),
        Ordering::Less => Some((new_order..=old_order - 1, 1)),
    }
}

/// Whether `orders` is exactly `0..N` in some arrangement.
pub fn is_dense(orders: impl IntoIterator<Item = i32>) -> bool {
    let mut orders: Vec<i32> = orders.into_iter().collect();
    orders.sort_unstable();
    orders
        .iter()
        .enumerate()
        .all(|(index, &order)| i64::from(order) == index as i64)
}

/// Order assigned to an item appended to `siblings`.
pub fn next_position<T: OrderedItem>(siblings: &[T]) -> i32 {
    siblings
        .iter()
        .map(OrderedItem::order)
        .max()
        .map_or(0, |max| max + 1)
}

fn item_not_found<T: OrderedItem>() -> OrderingError {
    OrderingError::not_found(format!("{} not found", T::KIND))
}

fn scope_not_found<T: OrderedItem>() -> OrderingError {
    OrderingError::not_found(format!("{} not found", T::SCOPE_KIND))
}

/// Fetches an item and locks its scope, re-reading it under the lock.
async fn locked_item<Tx>(tx: &mut Tx, id: ItemId<Tx::Item>) -> Result<Tx::Item, OrderingError>
where
    Tx: OrderedTransaction,
{
    let item = tx
        .find_by_id(id)
        .await?
        .ok_or_else(item_not_found::<Tx::Item>)?;

    if !tx.lock_scope(item.scope_id()).await? {
        return Err(scope_not_found::<Tx::Item>());
    }

    // A move in the same scope may have committed before the lock was granted.
    tx.find_by_id(id)
        .await?
        .ok_or_else(item_not_found::<Tx::Item>)
}

/// Moves one item to `new_order` within its scope.
///
/// Siblings between the old and the new position shift by one slot toward
/// the vacated position; nothing outside that range is written. Moving an
/// item to the position it already holds performs no writes.
///
/// # Errors
///
/// - [`OrderingError::NotFound`] if the item does not exist
/// - [`OrderingError::InvalidInput`] if `new_order` is outside `0..count`
/// - [`OrderingError::Storage`] if the transaction fails; nothing is persisted
#[instrument(skip(store))]
pub async fn reorder<S>(
    store: &S,
    item_id: ItemId<S::Item>,
    new_order: i32,
) -> Result<S::Item, OrderingError>
where
    S: OrderedStore,
{
    if new_order < 0 {
        return Err(OrderingError::invalid_input(format!(
            "order must be non-negative, got {new_order}"
        )));
    }

    let mut tx = store.begin().await?;
    let mut item = locked_item(&mut tx, item_id).await?;
    let scope = item.scope_id();
    let old_order = item.order();

    let count = tx.list_by_scope(scope).await?.len();
    if new_order as usize >= count {
        return Err(OrderingError::invalid_input(format!(
            "order {new_order} is out of range for a list of {count} items"
        )));
    }

    let Some((range, delta)) = shift_for(old_order, new_order) else {
        debug!(%item_id, order = old_order, "Item already at requested position");
        return Ok(item);
    };

    let shifted = tx.shift_range(scope, range, delta).await?;
    if !tx.set_order(item_id, new_order).await? {
        return Err(item_not_found::<S::Item>());
    }
    tx.commit().await?;

    info!(
        %item_id,
        %scope,
        from = old_order,
        to = new_order,
        shifted,
        "Item reordered"
    );

    item.set_order(new_order);
    Ok(item)
}

/// Rejects placements that name foreign or repeated items, or orders outside
/// `0..=MAX_ORDER`.
pub fn validate_placements<Id: Key>(
    members: &HashSet<Id>,
    placements: &[Placement<Id>],
) -> Result<(), OrderingError> {
    let mut seen = HashSet::with_capacity(placements.len());

    for placement in placements {
        if !(0..=MAX_ORDER).contains(&placement.order) {
            return Err(OrderingError::invalid_input(format!(
                "order must be between 0 and {MAX_ORDER}, got {} for item {}",
                placement.order, placement.item_id
            )));
        }
        if !members.contains(&placement.item_id) {
            return Err(OrderingError::invalid_input(format!(
                "item {} does not belong to this list",
                placement.item_id
            )));
        }
        if !seen.insert(placement.item_id) {
            return Err(OrderingError::invalid_input(format!(
                "item {} appears more than once",
                placement.item_id
            )));
        }
    }

    Ok(())
}

/// Applies caller-supplied orders to items of `scope` as one batch.
///
/// Every placement is validated before the first write. The orders are
/// applied as given; keeping them dense is the caller's responsibility.
/// Returns the scope's items in their new order.
///
/// # Errors
///
/// - [`OrderingError::NotFound`] if the scope does not exist
/// - [`OrderingError::InvalidInput`] if any item is foreign to the scope,
///   repeated, or given a negative order
/// - [`OrderingError::Storage`] if any write fails; nothing is persisted
#[instrument(skip(store, placements), fields(placements = placements.len()))]
pub async fn bulk_reorder<S>(
    store: &S,
    scope: ScopeId<S::Item>,
    placements: &[Placement<ItemId<S::Item>>],
) -> Result<Vec<S::Item>, OrderingError>
where
    S: OrderedStore,
{
    let mut tx = store.begin().await?;
    if !tx.lock_scope(scope).await? {
        return Err(scope_not_found::<S::Item>());
    }

    let members: HashSet<_> = tx
        .list_by_scope(scope)
        .await?
        .iter()
        .map(OrderedItem::id)
        .collect();
    validate_placements(&members, placements)?;

    for placement in placements {
        if !tx.set_order(placement.item_id, placement.order).await? {
            return Err(item_not_found::<S::Item>());
        }
    }

    let items = tx.list_by_scope(scope).await?;
    tx.commit().await?;

    info!(%scope, updated = placements.len(), "Bulk reorder applied");
    Ok(items)
}

/// Reserves a position for a new item in `scope` inside the caller's transaction.
///
/// With no requested position the item is appended (`max(order) + 1`).
/// A requested position `p` in `0..=count` opens a gap by shifting every
/// sibling at `p` or later up by one. The caller inserts the row and commits.
pub async fn prepare_insert<Tx>(
    tx: &mut Tx,
    scope: ScopeId<Tx::Item>,
    requested: Option<i32>,
) -> Result<i32, OrderingError>
where
    Tx: OrderedTransaction,
{
    if !tx.lock_scope(scope).await? {
        return Err(scope_not_found::<Tx::Item>());
    }

    let siblings = tx.list_by_scope(scope).await?;
    let Some(position) = requested else {
        return Ok(next_position(&siblings));
    };

    if position < 0 || position as usize > siblings.len() {
        return Err(OrderingError::invalid_input(format!(
            "order {position} is out of range for a list of {} items",
            siblings.len()
        )));
    }

    tx.shift_range(scope, position..=i32::MAX, 1).await?;
    Ok(position)
}

/// Closes the gap an item leaves behind, inside the caller's transaction.
///
/// Siblings after the item shift down by one. Returns the item so the
/// caller can delete it before committing.
pub async fn detach<Tx>(tx: &mut Tx, id: ItemId<Tx::Item>) -> Result<Tx::Item, OrderingError>
where
    Tx: OrderedTransaction,
{
    let item = locked_item(tx, id).await?;
    let order = item.order();

    if order < i32::MAX {
        tx.shift_range(item.scope_id(), order + 1..=i32::MAX, -1)
            .await?;
    }

    Ok(item)
}

/// Renumbers `scope` to `0..N` keeping the current relative order.
///
/// Items sharing an order keep id order. Returns how many items changed.
#[instrument(skip(store))]
pub async fn normalize<S>(store: &S, scope: ScopeId<S::Item>) -> Result<usize, OrderingError>
where
    S: OrderedStore,
{
    let mut tx = store.begin().await?;
    if !tx.lock_scope(scope).await? {
        return Err(scope_not_found::<S::Item>());
    }

    let items = tx.list_by_scope(scope).await?;
    let mut changed = 0;

    for (position, item) in (0..).zip(items.iter()) {
        if item.order() != position {
            tx.set_order(item.id(), position).await?;
            changed += 1;
        }
    }

    if changed > 0 {
        tx.commit().await?;
        info!(%scope, changed, "Scope renumbered");
    }

    Ok(changed)
}
