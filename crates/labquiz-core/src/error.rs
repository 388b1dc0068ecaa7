//! Error types for loading, grading, and marker storage.
//!
//! Handlers classify these by variant instead of by message text: every
//! `LoadError` is reported to browsers as "not found", while the message
//! carries the detail for the server log.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a course document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No document exists for the course.
    #[error("course not found: {0}")]
    NotFound(String),

    /// The document exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML or does not match the course schema.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but breaks a structural rule.
    #[error("invalid course document {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}

impl LoadError {
    /// Returns `true` if the document is simply absent (as opposed to broken).
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }
}

/// Errors that can occur while grading a submitted answer.
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("Lab not found")]
    LabNotFound,

    #[error("Question not found")]
    QuestionNotFound,

    /// An answer pattern failed to compile.
    #[error("invalid answer pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors from the completion-marker store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The course or lab id cannot be used to name a marker file.
    #[error("invalid marker key: {course}/{lab}")]
    InvalidKey { course: String, lab: String },

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
