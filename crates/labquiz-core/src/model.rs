//! Course data model.
//!
//! A course document maps lab ids to labs; each lab holds an ordered list of
//! questions, and each question carries the regex patterns that grade it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rows shown for a multiline answer box when the question does not say.
pub const DEFAULT_ROWS: u32 = 5;

/// A course: every lab from one question-set document.
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    /// File stem of the backing document (e.g. "networking").
    pub id: String,
    /// Labs keyed by lab id.
    pub labs: BTreeMap<String, Lab>,
}

impl Course {
    /// Look up a lab by id.
    pub fn lab(&self, lab_id: &str) -> Option<&Lab> {
        self.labs.get(lab_id)
    }

    /// Total number of questions across all labs.
    pub fn question_count(&self) -> usize {
        self.labs.values().map(|lab| lab.questions.len()).sum()
    }
}

/// One quiz within a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lab {
    /// Page title.
    pub title: String,
    /// Questions in display order.
    pub questions: Vec<Question>,
}

impl Lab {
    /// Look up a question by its id.
    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// A single self-graded question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    /// Identifier, unique within the lab.
    pub id: u32,
    pub title: String,
    /// Display text. May contain raw HTML from the course author.
    pub text: String,
    #[serde(default)]
    pub placeholder: String,
    /// Render a textarea instead of a single-line input.
    #[serde(default)]
    pub multiline: bool,
    /// Textarea height; only meaningful with `multiline`.
    #[serde(default)]
    pub rows: Option<u32>,
    /// Accepted answers, tried in order.
    #[serde(default)]
    pub answers: Vec<AnswerPattern>,
    /// Shown when an answer matches.
    pub correct_message: String,
    /// Shown when no pattern matches.
    pub hint: String,
}

impl Question {
    pub fn rows_or_default(&self) -> u32 {
        self.rows.unwrap_or(DEFAULT_ROWS)
    }
}

/// A regular expression that accepts an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerPattern {
    pub pattern: String,
    #[serde(default)]
    pub flags: PatternFlags,
}

/// Regex modifiers an answer pattern may declare.
///
/// Written in documents as a string of letters: `i` (case-insensitive),
/// `m` (multi-line anchors), `s` (dot matches newline).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatternFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
}

impl PatternFlags {
    pub fn is_empty(&self) -> bool {
        *self == PatternFlags::default()
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.case_insensitive {
            write!(f, "i")?;
        }
        if self.multi_line {
            write!(f, "m")?;
        }
        if self.dot_matches_new_line {
            write!(f, "s")?;
        }
        Ok(())
    }
}

impl FromStr for PatternFlags {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = PatternFlags::default();
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            match c {
                'i' => flags.case_insensitive = true,
                'm' => flags.multi_line = true,
                's' => flags.dot_matches_new_line = true,
                other => {
                    return Err(format!(
                        "unknown regex flag '{other}' (expected any of 'i', 'm', 's')"
                    ))
                }
            }
        }
        Ok(flags)
    }
}

impl TryFrom<String> for PatternFlags {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PatternFlags> for String {
    fn from(flags: PatternFlags) -> Self {
        flags.to_string()
    }
}
