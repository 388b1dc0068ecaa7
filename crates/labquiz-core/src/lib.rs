//! labquiz-core — Question sets, grading, and completion markers.
//!
//! This crate defines the course data model, the YAML loader, the answer
//! grading rules, and the on-disk completion-marker store that the server
//! and CLI build on.

pub mod error;
pub mod grading;
pub mod markers;
pub mod model;
pub mod parser;

pub use error::{GradeError, LoadError, StoreError};
pub use grading::{grade, grade_submission, Verdict};
pub use markers::{MarkerStore, ResetOutcome};
pub use model::{AnswerPattern, Course, Lab, PatternFlags, Question};
