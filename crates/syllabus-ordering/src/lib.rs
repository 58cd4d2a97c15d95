//! # Syllabus Ordering
//!
//! Maintenance of scope-ordered lists: lessons ordered within a module,
//! modules ordered within a course.
//!
//! For every scope the `order` values of its items form the dense sequence
//! `0, 1, …, N-1`. The operations in [`mod@reorder`] keep it that way:
//!
//! - [`reorder()`]: move one item, shifting the siblings in between by one
//! - [`bulk_reorder`]: apply a caller-supplied ordering as one batch
//! - [`prepare_insert`] / [`detach`]: open or close a gap around an
//!   insertion or deletion performed in the caller's transaction
//! - [`normalize`]: renumber a scope whose sequence has drifted
//!
//! Storage is abstracted behind [`OrderedStore`] and [`OrderedTransaction`].
//! The PostgreSQL backend lives in `syllabus-db`; the unit tests here run
//! against an in-memory backend.
//!
//! # Example
//!
//! ```ignore
//! use syllabus_ordering::{Placement, bulk_reorder, reorder};
//!
//! let lesson = reorder(&store, lesson_id, 0).await?;
//!
//! let lessons = bulk_reorder(
//!     &store,
//!     module_id,
//!     &[Placement::new(first, 1), Placement::new(second, 0)],
//! )
//! .await?;
//! ```

pub mod error;
#[cfg(test)]
mod memory;
pub mod reorder;
pub mod store;

#[cfg(test)]
mod testing;

pub use error::{BoxError, OrderingError};
pub use reorder::{
    MAX_ORDER, Placement, bulk_reorder, detach, is_dense, next_position, normalize,
    prepare_insert, reorder, shift_for, validate_placements,
};
pub use store::{ItemId, Key, OrderedItem, OrderedStore, OrderedTransaction, ScopeId};
