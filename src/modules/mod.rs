pub mod course_modules;
pub mod courses;
pub mod health;
pub mod lessons;
