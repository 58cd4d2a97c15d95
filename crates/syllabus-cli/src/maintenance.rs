//! Ordering checks and repair.
//!
//! A scope is out of order when its positions are not exactly `0..N`,
//! which only happens after writes that bypassed the API.

use sqlx::PgPool;
use syllabus_db::{OrderedTable, PgOrderedStore, find_non_dense_scopes};
use syllabus_models::{CourseModule, Lesson};
use syllabus_ordering::{OrderingError, normalize};
use uuid::Uuid;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct OrderingReport {
    /// Courses whose module positions are not dense
    pub courses: Vec<Uuid>,
    /// Modules whose lesson positions are not dense
    pub modules: Vec<Uuid>,
}

impl OrderingReport {
    pub fn is_clean(&self) -> bool {
        self.courses.is_empty() && self.modules.is_empty()
    }
}

pub async fn check_ordering(db: &PgPool) -> Result<OrderingReport, sqlx::Error> {
    Ok(OrderingReport {
        courses: find_non_dense_scopes::<CourseModule>(db).await?,
        modules: find_non_dense_scopes::<Lesson>(db).await?,
    })
}

async fn normalize_scopes<T: OrderedTable>(
    db: &PgPool,
    scopes: &[Uuid],
) -> Result<usize, OrderingError> {
    let store = PgOrderedStore::<T>::new(db.clone());
    let mut changed = 0;

    for &scope in scopes {
        match normalize(&store, scope).await {
            Ok(n) => changed += n,
            // Deleted since the check ran.
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }
    }

    Ok(changed)
}

/// Renumbers every scope in `report`. Returns how many rows moved.
pub async fn normalize_report(db: &PgPool, report: &OrderingReport) -> Result<usize, OrderingError> {
    let modules_moved = normalize_scopes::<CourseModule>(db, &report.courses).await?;
    let lessons_moved = normalize_scopes::<Lesson>(db, &report.modules).await?;
    Ok(modules_moved + lessons_moved)
}
