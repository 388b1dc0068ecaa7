//! YAML question-set loader.
//!
//! Each course lives in `<questions_dir>/<course>.yaml`. Documents are read
//! fresh on every call so edits show up without a restart.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::LoadError;
use crate::model::{Course, Lab};

/// File extension of course documents.
pub const COURSE_EXTENSION: &str = "yaml";

/// Returns `true` if `id` can name a course file or a marker file.
///
/// Rejects empty ids, `.`/`..`, and anything with a path separator or NUL.
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\', '\0'])
}

/// Path of the document backing `course_id`.
pub fn course_path(questions_dir: &Path, course_id: &str) -> PathBuf {
    questions_dir.join(format!("{course_id}.{COURSE_EXTENSION}"))
}

/// Load and validate the document for `course_id`.
pub fn load_course(questions_dir: &Path, course_id: &str) -> Result<Course, LoadError> {
    if !is_valid_identifier(course_id) {
        return Err(LoadError::NotFound(course_id.to_string()));
    }

    let path = course_path(questions_dir, course_id);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound(course_id.to_string()))
        }
        Err(source) => return Err(LoadError::Read { path, source }),
    };

    parse_course_str(course_id, &content, &path)
}

/// Load a course document from an explicit file path.
///
/// The course id is the file stem.
pub fn load_course_file(path: &Path) -> Result<Course, LoadError> {
    let course_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(course_id.clone())
        } else {
            LoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_course_str(&course_id, &content, path)
}

/// Parse a YAML string into a `Course` (useful for testing).
pub fn parse_course_str(
    course_id: &str,
    content: &str,
    source_path: &Path,
) -> Result<Course, LoadError> {
    let invalid = |message: String| LoadError::Invalid {
        path: source_path.to_path_buf(),
        message,
    };

    if content.trim().is_empty() {
        return Err(invalid("document is empty".into()));
    }

    let labs: BTreeMap<String, Lab> =
        serde_yaml::from_str(content).map_err(|source| LoadError::Parse {
            path: source_path.to_path_buf(),
            source,
        })?;

    for (lab_id, lab) in &labs {
        if !is_valid_identifier(lab_id) {
            return Err(invalid(format!("lab id {lab_id:?} is not a valid identifier")));
        }
        if lab.questions.is_empty() {
            return Err(invalid(format!("lab {lab_id} has no questions")));
        }

        let mut seen_ids = HashSet::new();
        for question in &lab.questions {
            if !seen_ids.insert(question.id) {
                return Err(invalid(format!(
                    "lab {lab_id}: duplicate question id {}",
                    question.id
                )));
            }
            for answer in &question.answers {
                answer.compile().map_err(|e| {
                    invalid(format!(
                        "lab {lab_id}, question {}: bad pattern {:?}: {e}",
                        question.id, answer.pattern
                    ))
                })?;
            }
        }
    }

    Ok(Course {
        id: course_id.to_string(),
        labs,
    })
}

/// List course ids (file stems of `*.yaml`) in sorted order.
///
/// A missing directory has no courses.
pub fn available_courses(questions_dir: &Path) -> Result<Vec<String>> {
    if !questions_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(questions_dir)
        .with_context(|| format!("failed to read directory: {}", questions_dir.display()))?
        .map(|entry| entry.map(|e| e.path()));
    Ok(course_ids(questions_dir, entries))
}

/// Course ids among directory entries; unreadable entries are skipped.
fn course_ids(
    questions_dir: &Path,
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
) -> Vec<String> {
    let mut courses = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("skipping unreadable entry in {}: {e}", questions_dir.display());
                continue;
            }
        };
        if !path.is_file() || !path.extension().is_some_and(|ext| ext == COURSE_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            courses.push(stem.to_string());
        }
    }

    courses.sort();
    courses
}

/// Load every course in the directory, skipping documents that fail to load.
pub fn load_all_courses(questions_dir: &Path) -> Result<Vec<Course>> {
    let mut courses = Vec::new();
    for course_id in available_courses(questions_dir)? {
        match load_course(questions_dir, &course_id) {
            Ok(course) => courses.push(course),
            Err(e) => {
                tracing::warn!("skipping course {course_id}: {e}");
            }
        }
    }
    Ok(courses)
}

/// A soft authoring issue in a course document.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub lab_id: String,
    pub question_id: Option<u32>,
    pub message: String,
}

/// Check a loaded course for issues that do not stop it from being served.
pub fn check_course(course: &Course) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (lab_id, lab) in &course.labs {
        let mut warn = |question_id: Option<u32>, message: String| {
            warnings.push(ValidationWarning {
                lab_id: lab_id.clone(),
                question_id,
                message,
            })
        };

        if lab.title.trim().is_empty() {
            warn(None, "lab title is empty".into());
        }

        // The page numbers questions by id, so gaps read oddly.
        let mut ids: Vec<u32> = lab.questions.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        if ids.iter().zip(1..).any(|(&id, expected)| id != expected) {
            warn(None, format!("question ids are not 1..{}", ids.len()));
        }

        for q in &lab.questions {
            if q.answers.is_empty() {
                warn(Some(q.id), "no answer patterns; question can never be completed".into());
            }
            if q.hint.trim().is_empty() {
                warn(Some(q.id), "hint is empty".into());
            }
            if q.correct_message.trim().is_empty() {
                warn(Some(q.id), "correct_message is empty".into());
            }
            if q.rows.is_some() && !q.multiline {
                warn(Some(q.id), "rows is set but the question is not multiline".into());
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORKING_YAML: &str = r#"
lab1:
  title: "Lab 1: Addressing"
  questions:
    - id: 1
      title: Loopback
      text: "What is the IPv4 loopback address?"
      placeholder: "x.x.x.x"
      answers:
        - pattern: '^127\.0\.0\.1$'
      correct_message: "Right, localhost."
      hint: "It starts with 127."
    - id: 2
      title: Protocol
      text: "Which protocol does <code>ping</code> use?"
      answers:
        - pattern: 'icmp'
          flags: i
      correct_message: "ICMP echo."
      hint: "Not TCP or UDP."
    - id: 3
      title: Address
      text: "Type any dotted-quad address."
      answers:
        - pattern: '^\d{1,3}(\.\d{1,3}){3}$'
      correct_message: "Looks like an address."
      hint: "Four octets separated by dots."
lab2:
  title: "Lab 2: Scripts"
  questions:
    - id: 1
      title: Shebang
      text: "Write a script header and one command."
      multiline: true
      rows: 8
      answers:
        - pattern: '^#!/bin/(ba)?sh.*echo'
          flags: s
      correct_message: "Nice script."
      hint: "Start with a shebang."
"#;

    fn parse(yaml: &str) -> Result<Course, LoadError> {
        parse_course_str("networking", yaml, Path::new("networking.yaml"))
    }

    #[test]
    fn parse_valid_yaml() {
        let course = parse(NETWORKING_YAML).unwrap();
        assert_eq!(course.id, "networking");
        assert_eq!(course.labs.len(), 2);
        assert_eq!(course.question_count(), 4);

        let lab1 = course.lab("lab1").unwrap();
        assert_eq!(lab1.title, "Lab 1: Addressing");
        assert_eq!(lab1.questions[0].placeholder, "x.x.x.x");
        assert!(lab1.question(2).unwrap().answers[0].flags.case_insensitive);
        assert!(lab1.question(9).is_none());

        let script = course.lab("lab2").unwrap().question(1).unwrap();
        assert!(script.multiline);
        assert_eq!(script.rows, Some(8));
    }

    #[test]
    fn parse_missing_optional_fields() {
        let yaml = r#"
lab1:
  title: Minimal
  questions:
    - id: 1
      title: Q
      text: T
      correct_message: "Correct"
      hint: "Try again"
"#;
        let course = parse(yaml).unwrap();
        let q = &course.labs["lab1"].questions[0];
        assert!(q.placeholder.is_empty());
        assert!(!q.multiline);
        assert!(q.rows.is_none());
        assert!(q.answers.is_empty());
    }

    #[test]
    fn parse_malformed_yaml() {
        let result = parse("lab1: [unclosed");
        assert!(matches!(result, Err(LoadError::Parse { .. })));
    }

    #[test]
    fn parse_rejects_shape_mismatch() {
        let yaml = r#"
lab1:
  title: Wrong
  questions:
    - id: one
      title: Q
      text: T
      correct_message: "Correct"
      hint: "Try again"
"#;
        assert!(matches!(parse(yaml), Err(LoadError::Parse { .. })));

        let typo = NETWORKING_YAML.replace("correct_message: \"ICMP echo.\"", "correct_mesage: x");
        assert!(matches!(parse(&typo), Err(LoadError::Parse { .. })));
    }

    #[test]
    fn parse_rejects_unknown_flag() {
        let yaml = NETWORKING_YAML.replace("flags: i", "flags: ix");
        let err = parse(&yaml).unwrap_err();
        assert!(err.to_string().contains("unknown regex flag"), "{err}");
    }

    #[test]
    fn parse_rejects_duplicate_question_ids() {
        let yaml = NETWORKING_YAML.replace("id: 3", "id: 2");
        let err = parse(&yaml).unwrap_err();
        assert!(matches!(err, LoadError::Invalid { .. }));
        assert!(err.to_string().contains("duplicate question id 2"));
    }

    #[test]
    fn parse_rejects_bad_regex() {
        let yaml = NETWORKING_YAML.replace("pattern: 'icmp'", "pattern: '(icmp'");
        let err = parse(&yaml).unwrap_err();
        assert!(err.to_string().contains("bad pattern"), "{err}");
    }

    #[test]
    fn parse_rejects_empty_document_and_empty_lab() {
        assert!(matches!(parse("  \n"), Err(LoadError::Invalid { .. })));
        assert!(parse("lab1:\n  title: Empty\n  questions: []\n").is_err());
    }

    #[test]
    fn load_course_reads_fresh_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("networking.yaml");
        std::fs::write(&path, NETWORKING_YAML).unwrap();

        let course = load_course(dir.path(), "networking").unwrap();
        assert_eq!(course.labs.len(), 2);

        let edited = NETWORKING_YAML.replace("Lab 1: Addressing", "Lab 1: Edited");
        std::fs::write(&path, edited).unwrap();
        let course = load_course(dir.path(), "networking").unwrap();
        assert_eq!(course.labs["lab1"].title, "Lab 1: Edited");
    }

    #[test]
    fn load_missing_course_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_course(dir.path(), "nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn load_rejects_path_like_course_ids() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("secret.yaml"), NETWORKING_YAML).unwrap();
        let nested = dir.path().join("inner");
        std::fs::create_dir(&nested).unwrap();

        assert!(load_course(&nested, "../secret").unwrap_err().is_not_found());
        assert!(load_course(dir.path(), "").unwrap_err().is_not_found());
        assert!(!is_valid_identifier(".."));
        assert!(!is_valid_identifier("a\\b"));
        assert!(is_valid_identifier("linux-basics"));
    }

    #[test]
    fn available_courses_sorted_yaml_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zeta.yaml"), NETWORKING_YAML).unwrap();
        std::fs::write(dir.path().join("alpha.yaml"), NETWORKING_YAML).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        std::fs::write(dir.path().join("beta.yml"), NETWORKING_YAML).unwrap();

        let courses = available_courses(dir.path()).unwrap();
        assert_eq!(courses, vec!["alpha", "zeta"]);
    }

    #[test]
    fn available_courses_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let courses = available_courses(&dir.path().join("missing")).unwrap();
        assert!(courses.is_empty());
    }

    #[test]
    fn unreadable_entries_do_not_hide_other_courses() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.yaml"), NETWORKING_YAML).unwrap();
        std::fs::write(dir.path().join("a.yaml"), NETWORKING_YAML).unwrap();

        let entries = vec![
            Ok(dir.path().join("b.yaml")),
            Err(std::io::Error::new(std::io::ErrorKind::Other, "stale handle")),
            Ok(dir.path().join("a.yaml")),
        ];
        assert_eq!(course_ids(dir.path(), entries), vec!["a", "b"]);
    }

    #[test]
    fn load_all_skips_broken_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.yaml"), NETWORKING_YAML).unwrap();
        std::fs::write(dir.path().join("broken.yaml"), "lab1: [").unwrap();

        let courses = load_all_courses(dir.path()).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, "good");
    }

    #[test]
    fn check_course_reports_authoring_issues() {
        let yaml = r#"
lab1:
  title: Issues
  questions:
    - id: 1
      title: Q1
      text: T
      rows: 4
      correct_message: ok
      hint: ""
    - id: 3
      title: Q3
      text: T
      answers:
        - pattern: x
      correct_message: ok
      hint: try again
"#;
        let course = parse(yaml).unwrap();
        let warnings = check_course(&course);
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();

        assert!(messages.iter().any(|m| m.contains("not 1..2")));
        assert!(messages.iter().any(|m| m.contains("no answer patterns")));
        assert!(messages.iter().any(|m| m.contains("hint is empty")));
        assert!(messages.iter().any(|m| m.contains("not multiline")));
        assert!(!warnings.iter().any(|w| w.question_id == Some(3)));
    }

    #[test]
    fn check_clean_course_has_no_warnings() {
        let course = parse(NETWORKING_YAML).unwrap();
        assert!(check_course(&course).is_empty());
    }
}
