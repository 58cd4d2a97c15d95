//! Seed records and the configuration that sizes a seeding run.

use uuid::Uuid;

pub struct CourseSeed {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

pub struct ModuleSeed {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
}

pub struct LessonSeed {
    pub module_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub duration_minutes: i32,
    pub position: i32,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub courses: usize,
    pub modules_per_course: usize,
    pub lessons_per_module: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            courses: 5,
            modules_per_course: 6,
            lessons_per_module: 8,
        }
    }
}

impl SeedConfig {
    pub fn new(courses: usize) -> Self {
        Self {
            courses,
            ..Default::default()
        }
    }

    pub fn with_modules(mut self, modules_per_course: usize) -> Self {
        self.modules_per_course = modules_per_course;
        self
    }

    pub fn with_lessons(mut self, lessons_per_module: usize) -> Self {
        self.lessons_per_module = lessons_per_module;
        self
    }

    pub fn total_modules(&self) -> usize {
        self.courses * self.modules_per_course
    }

    pub fn total_lessons(&self) -> usize {
        self.total_modules() * self.lessons_per_module
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_config_totals() {
        let config = SeedConfig::new(3).with_modules(4).with_lessons(5);
        assert_eq!(config.total_modules(), 12);
        assert_eq!(config.total_lessons(), 60);
    }
}
