//! Application context shared by every handler.

use std::path::{Path, PathBuf};

use labquiz_core::model::Course;
use labquiz_core::parser;
use labquiz_core::MarkerStore;

use crate::config::QuizConfig;

/// Built once at startup and cloned into each request.
///
/// Holds only paths: courses are loaded from disk on every request.
#[derive(Debug, Clone)]
pub struct AppContext {
    questions_dir: PathBuf,
    markers: MarkerStore,
}

impl AppContext {
    pub fn new(questions_dir: impl Into<PathBuf>, marker_dir: impl Into<PathBuf>) -> Self {
        Self {
            questions_dir: questions_dir.into(),
            markers: MarkerStore::new(marker_dir),
        }
    }

    pub fn from_config(config: &QuizConfig) -> Self {
        Self::new(&config.questions_dir, &config.marker_dir)
    }

    pub fn questions_dir(&self) -> &Path {
        &self.questions_dir
    }

    pub fn markers(&self) -> &MarkerStore {
        &self.markers
    }

    /// Load a course, treating a broken document the same as a missing one.
    ///
    /// Anything other than plain absence is logged.
    pub fn course(&self, course_id: &str) -> Option<Course> {
        match parser::load_course(&self.questions_dir, course_id) {
            Ok(course) => Some(course),
            Err(e) if e.is_not_found() => {
                tracing::debug!("{e}");
                None
            }
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        }
    }

    /// Every course that loads, sorted by id. Broken documents are skipped
    /// and an unreadable directory lists nothing.
    pub fn courses(&self) -> Vec<Course> {
        parser::available_courses(&self.questions_dir)
            .unwrap_or_else(|e| {
                tracing::warn!("{e:#}");
                Vec::new()
            })
            .into_iter()
            .filter_map(|course_id| self.course(&course_id))
            .collect()
    }
}
