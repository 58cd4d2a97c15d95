//! Storage abstraction consumed by the ordering operations.
//!
//! Backends implement [`OrderedStore`] to hand out transactions and
//! [`OrderedTransaction`] for the reads and writes performed inside one.
//! A transaction that is dropped without [`OrderedTransaction::commit`]
//! must discard every write made through it.

use std::fmt::{Debug, Display};
use std::future::Future;
use std::hash::Hash;
use std::ops::RangeInclusive;

use crate::error::OrderingError;

/// Identifier bounds shared by item ids and scope ids.
pub trait Key: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {}

impl<T> Key for T where T: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {}

/// An entity positioned among the siblings that share its scope.
///
/// Lessons are ordered within a module, modules within a course.
pub trait OrderedItem: Clone + Send + Sync + 'static {
    type Id: Key;
    type ScopeId: Key;

    /// Entity name used in error messages ("Lesson", "Module").
    const KIND: &'static str;
    /// Name of the enclosing entity ("Module", "Course").
    const SCOPE_KIND: &'static str;

    fn id(&self) -> Self::Id;
    fn scope_id(&self) -> Self::ScopeId;
    fn order(&self) -> i32;
    fn set_order(&mut self, order: i32);
}

pub type ItemId<T> = <T as OrderedItem>::Id;
pub type ScopeId<T> = <T as OrderedItem>::ScopeId;

/// Source of transactions over one kind of ordered item.
pub trait OrderedStore: Send + Sync {
    type Item: OrderedItem;
    type Tx: OrderedTransaction<Item = Self::Item>;

    fn begin(&self) -> impl Future<Output = Result<Self::Tx, OrderingError>> + Send;
}

/// Reads and writes performed inside a single storage transaction.
pub trait OrderedTransaction: Send {
    type Item: OrderedItem;

    /// Serializes ordering writes to `scope` for the rest of the transaction.
    ///
    /// Returns `false` when the scope does not exist.
    fn lock_scope(
        &mut self,
        scope: ScopeId<Self::Item>,
    ) -> impl Future<Output = Result<bool, OrderingError>> + Send;

    fn find_by_id(
        &mut self,
        id: ItemId<Self::Item>,
    ) -> impl Future<Output = Result<Option<Self::Item>, OrderingError>> + Send;

    /// Items of `scope` sorted by order, ties broken by id.
    fn list_by_scope(
        &mut self,
        scope: ScopeId<Self::Item>,
    ) -> impl Future<Output = Result<Vec<Self::Item>, OrderingError>> + Send;

    /// Adds `delta` to the order of every item in `scope` whose order lies in `range`.
    ///
    /// Returns the number of items shifted.
    fn shift_range(
        &mut self,
        scope: ScopeId<Self::Item>,
        range: RangeInclusive<i32>,
        delta: i32,
    ) -> impl Future<Output = Result<u64, OrderingError>> + Send;

    /// Returns `false` when no item with `id` exists.
    fn set_order(
        &mut self,
        id: ItemId<Self::Item>,
        order: i32,
    ) -> impl Future<Output = Result<bool, OrderingError>> + Send;

    fn commit(self) -> impl Future<Output = Result<(), OrderingError>> + Send;
}
