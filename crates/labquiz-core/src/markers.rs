//! Completion-marker store.
//!
//! A lab is recorded as complete by a flat file
//! `quiz_complete_{course}_{lab}.txt` in the marker directory. Writing and
//! deleting single files is the only mutation, so concurrent calls resolve
//! last-writer-wins without locking.
//!
//! Course ids used as marker keys may not contain `_`, so the first `_` after
//! the prefix always ends the course id and no two pairs share a file.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::StoreError;
use crate::parser::is_valid_identifier;

const MARKER_PREFIX: &str = "quiz_complete_";
const MARKER_SUFFIX: &str = ".txt";

/// What a reset removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetOutcome {
    /// File names of deleted markers.
    pub deleted: Vec<String>,
    /// One message per marker that could not be deleted.
    pub errors: Vec<String>,
}

impl ResetOutcome {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Flat-file store of completion markers.
#[derive(Debug, Clone)]
pub struct MarkerStore {
    dir: PathBuf,
}

impl MarkerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Marker file name for a (course, lab) pair.
    pub fn marker_name(course: &str, lab: &str) -> String {
        format!("{MARKER_PREFIX}{course}_{lab}{MARKER_SUFFIX}")
    }

    fn is_marker_name(name: &str) -> bool {
        name.len() > MARKER_PREFIX.len() + MARKER_SUFFIX.len()
            && name.starts_with(MARKER_PREFIX)
            && name.ends_with(MARKER_SUFFIX)
    }

    /// Full path of the marker for a (course, lab) pair.
    pub fn marker_path(&self, course: &str, lab: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_identifier(course) || course.contains('_') || !is_valid_identifier(lab) {
            return Err(StoreError::InvalidKey {
                course: course.to_string(),
                lab: lab.to_string(),
            });
        }
        Ok(self.dir.join(Self::marker_name(course, lab)))
    }

    /// Record that every question in the lab was answered. Overwrites any
    /// existing marker.
    pub fn mark_complete(&self, course: &str, lab: &str) -> Result<PathBuf, StoreError> {
        let path = self.marker_path(course, lab)?;

        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            action: "failed to create marker directory",
            path: self.dir.clone(),
            source,
        })?;

        let content = format!(
            "Quiz {course}/{lab} completed successfully\ncompleted_at: {}\n",
            Utc::now().to_rfc3339()
        );
        std::fs::write(&path, content).map_err(|source| StoreError::Io {
            action: "failed to write marker",
            path: path.clone(),
            source,
        })?;

        tracing::info!(course, lab, path = %path.display(), "lab marked complete");
        Ok(path)
    }

    pub fn is_complete(&self, course: &str, lab: &str) -> bool {
        self.marker_path(course, lab)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    /// Delete the marker for one (course, lab) pair, if it exists.
    pub fn reset(&self, course: &str, lab: &str) -> ResetOutcome {
        let mut outcome = ResetOutcome::default();

        let path = match self.marker_path(course, lab) {
            Ok(path) => path,
            Err(e) => {
                outcome.errors.push(e.to_string());
                return outcome;
            }
        };

        self.remove_into(&path, &mut outcome);
        outcome
    }

    /// Delete every marker in the store.
    ///
    /// Fails only if the directory exists but cannot be listed.
    pub fn reset_all(&self) -> Result<ResetOutcome, StoreError> {
        let mut outcome = ResetOutcome::default();
        for name in self.list()? {
            self.remove_into(&self.dir.join(name), &mut outcome);
        }
        Ok(outcome)
    }

    fn remove_into(&self, path: &Path, outcome: &mut ResetOutcome) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::info!(marker = %name, "deleted completion marker");
                outcome.deleted.push(name);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::error!(path = %path.display(), "failed to delete marker: {e}");
                outcome
                    .errors
                    .push(format!("Failed to delete {}: {e}", path.display()));
            }
        }
    }

    /// File names of all markers, sorted. A missing directory has none.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    action: "failed to list markers in",
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| Self::is_marker_name(name))
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, MarkerStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = MarkerStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn mark_complete_writes_marker() {
        let (dir, store) = store();
        let path = store.mark_complete("networking", "lab1").unwrap();

        assert_eq!(path, dir.path().join("quiz_complete_networking_lab1.txt"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Quiz networking/lab1 completed successfully"));
        assert!(store.is_complete("networking", "lab1"));
        assert!(!store.is_complete("networking", "lab2"));
    }

    #[test]
    fn mark_complete_is_idempotent() {
        let (_dir, store) = store();
        store.mark_complete("networking", "lab1").unwrap();
        store.mark_complete("networking", "lab1").unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn mark_complete_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = MarkerStore::new(dir.path().join("nested").join("markers"));
        store.mark_complete("c", "l").unwrap();
        assert!(store.is_complete("c", "l"));
    }

    #[test]
    fn complete_then_reset_leaves_no_marker() {
        let (_dir, store) = store();
        store.mark_complete("networking", "lab1").unwrap();

        let outcome = store.reset("networking", "lab1");
        assert_eq!(outcome.deleted, vec!["quiz_complete_networking_lab1.txt"]);
        assert!(outcome.is_success());
        assert!(!store.is_complete("networking", "lab1"));
    }

    #[test]
    fn reset_without_marker_is_not_an_error() {
        let (_dir, store) = store();
        let outcome = store.reset("networking", "lab1");
        assert!(outcome.deleted.is_empty());
        assert!(outcome.is_success());
    }

    #[test]
    fn reset_only_touches_its_pair() {
        let (_dir, store) = store();
        store.mark_complete("networking", "lab1").unwrap();
        store.mark_complete("networking", "lab2").unwrap();

        store.reset("networking", "lab1");
        assert!(store.is_complete("networking", "lab2"));
    }

    #[test]
    fn reset_all_removes_every_marker() {
        let (dir, store) = store();
        store.mark_complete("networking", "lab1").unwrap();
        store.mark_complete("linux-basics", "lab3").unwrap();
        std::fs::write(dir.path().join("unrelated.txt"), "keep").unwrap();

        let outcome = store.reset_all().unwrap();
        assert_eq!(
            outcome.deleted,
            vec![
                "quiz_complete_linux-basics_lab3.txt",
                "quiz_complete_networking_lab1.txt"
            ]
        );
        assert!(store.list().unwrap().is_empty());
        assert!(dir.path().join("unrelated.txt").exists());
    }

    #[test]
    fn reset_all_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = MarkerStore::new(dir.path().join("missing"));
        let outcome = store.reset_all().unwrap();
        assert!(outcome.deleted.is_empty());
        assert!(outcome.is_success());
    }

    #[test]
    fn invalid_keys_are_rejected() {
        let (_dir, store) = store();
        assert!(matches!(
            store.mark_complete("../etc", "lab1"),
            Err(StoreError::InvalidKey { .. })
        ));
        let outcome = store.reset("networking", "a/b");
        assert!(!outcome.is_success());
        assert!(!store.is_complete("", "lab1"));
    }

    #[test]
    fn underscored_course_ids_cannot_collide() {
        let (_dir, store) = store();
        store.mark_complete("a", "b_c").unwrap();

        assert!(matches!(
            store.mark_complete("a_b", "c"),
            Err(StoreError::InvalidKey { .. })
        ));
        let outcome = store.reset("a_b", "c");
        assert!(!outcome.is_success());
        assert!(outcome.deleted.is_empty());
        assert!(store.is_complete("a", "b_c"));
    }

    #[test]
    fn unusable_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();
        let store = MarkerStore::new(&blocked);

        assert!(matches!(
            store.mark_complete("networking", "lab1"),
            Err(StoreError::Io { .. })
        ));

        let outcome = store.reset("networking", "lab1");
        assert!(outcome.deleted.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("Failed to delete"));
        assert!(!outcome.is_success());

        assert!(matches!(store.reset_all(), Err(StoreError::Io { .. })));
    }
}
