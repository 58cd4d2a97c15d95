//! Course models, re-exported from `syllabus-models`.

pub use syllabus_models::courses::*;
