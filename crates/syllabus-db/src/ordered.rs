//! PostgreSQL backend for the ordering operations.
//!
//! [`PgOrderedStore`] works on any table described by [`OrderedTable`].
//! The scope lock is a `SELECT ... FOR UPDATE` on the parent row (the
//! course for modules, the module for lessons), so concurrent moves,
//! inserts and deletes in one scope run one after another while other
//! scopes proceed in parallel.

use std::marker::PhantomData;
use std::ops::RangeInclusive;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool, Postgres, Transaction};
use syllabus_models::{CourseModule, Lesson};
use syllabus_ordering::{OrderedItem, OrderedStore, OrderedTransaction, OrderingError};
use tracing::instrument;
use uuid::Uuid;

/// Table layout of an ordered entity. The order lives in `position`.
pub trait OrderedTable:
    OrderedItem<Id = Uuid, ScopeId = Uuid> + for<'r> FromRow<'r, PgRow> + Unpin
{
    const TABLE: &'static str;
    const SCOPE_COLUMN: &'static str;
    const PARENT_TABLE: &'static str;
    /// Columns selected into the row type.
    const COLUMNS: &'static str;
}

impl OrderedTable for CourseModule {
    const TABLE: &'static str = "course_modules";
    const SCOPE_COLUMN: &'static str = "course_id";
    const PARENT_TABLE: &'static str = "courses";
    const COLUMNS: &'static str =
        "id, course_id, title, description, position, created_at, updated_at";
}

impl OrderedTable for Lesson {
    const TABLE: &'static str = "lessons";
    const SCOPE_COLUMN: &'static str = "module_id";
    const PARENT_TABLE: &'static str = "course_modules";
    const COLUMNS: &'static str =
        "id, module_id, title, content, duration_minutes, position, created_at, updated_at";
}

pub struct PgOrderedStore<T> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for PgOrderedStore<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: OrderedTable> PgOrderedStore<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

impl<T: OrderedTable> OrderedStore for PgOrderedStore<T> {
    type Item = T;
    type Tx = PgOrderedTransaction<T>;

    async fn begin(&self) -> Result<Self::Tx, OrderingError> {
        let tx = self.pool.begin().await.map_err(OrderingError::storage)?;

        Ok(PgOrderedTransaction {
            tx,
            _marker: PhantomData,
        })
    }
}

/// Open transaction; dropping it without `commit` rolls back.
pub struct PgOrderedTransaction<T> {
    tx: Transaction<'static, Postgres>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PgOrderedTransaction<T> {
    /// Connection for statements that belong in the same transaction,
    /// such as inserting or deleting the row whose gap is being managed.
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.tx
    }
}

impl<T: OrderedTable> OrderedTransaction for PgOrderedTransaction<T> {
    type Item = T;

    async fn lock_scope(&mut self, scope: Uuid) -> Result<bool, OrderingError> {
        let sql = format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", T::PARENT_TABLE);

        let locked = sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(scope)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(OrderingError::storage)?;

        Ok(locked.is_some())
    }

    async fn find_by_id(&mut self, id: Uuid) -> Result<Option<T>, OrderingError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", T::COLUMNS, T::TABLE);

        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(OrderingError::storage)
    }

    async fn list_by_scope(&mut self, scope: Uuid) -> Result<Vec<T>, OrderingError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1 ORDER BY position, id",
            T::COLUMNS,
            T::TABLE,
            T::SCOPE_COLUMN
        );

        sqlx::query_as::<_, T>(&sql)
            .bind(scope)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(OrderingError::storage)
    }

    async fn shift_range(
        &mut self,
        scope: Uuid,
        range: RangeInclusive<i32>,
        delta: i32,
    ) -> Result<u64, OrderingError> {
        let sql = format!(
            r#"UPDATE {}
               SET position = position + $1, updated_at = NOW()
               WHERE {} = $2 AND position BETWEEN $3 AND $4"#,
            T::TABLE,
            T::SCOPE_COLUMN
        );

        let result = sqlx::query(&sql)
            .bind(delta)
            .bind(scope)
            .bind(*range.start())
            .bind(*range.end())
            .execute(&mut *self.tx)
            .await
            .map_err(OrderingError::storage)?;

        Ok(result.rows_affected())
    }

    async fn set_order(&mut self, id: Uuid, order: i32) -> Result<bool, OrderingError> {
        let sql = format!(
            "UPDATE {} SET position = $1, updated_at = NOW() WHERE id = $2",
            T::TABLE
        );

        let result = sqlx::query(&sql)
            .bind(order)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(OrderingError::storage)?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit(self) -> Result<(), OrderingError> {
        self.tx.commit().await.map_err(OrderingError::storage)
    }
}

/// Scopes of `T` whose positions are not exactly `0..N`.
#[instrument(skip(pool))]
pub async fn find_non_dense_scopes<T: OrderedTable>(pool: &PgPool) -> Result<Vec<Uuid>, sqlx::Error> {
    let sql = format!(
        r#"SELECT {scope}
           FROM {table}
           GROUP BY {scope}
           HAVING MIN(position) <> 0
               OR MAX(position) <> COUNT(*) - 1
               OR COUNT(DISTINCT position) <> COUNT(*)
           ORDER BY {scope}"#,
        scope = T::SCOPE_COLUMN,
        table = T::TABLE
    );

    sqlx::query_scalar::<_, Uuid>(&sql).fetch_all(pool).await
}
