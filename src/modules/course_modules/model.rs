//! Module models, re-exported from `syllabus-models` together with the
//! reorder request bodies.

pub use syllabus_models::course_modules::*;
pub use syllabus_models::ordering::{BulkReorderDto, PlacementDto, ReorderDto};
