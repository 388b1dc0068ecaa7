//! Answer grading.
//!
//! Answers are trimmed and matched against each pattern with search
//! semantics: a pattern only has to match somewhere in the answer unless it
//! anchors itself with `^`/`$`.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::GradeError;
use crate::model::{AnswerPattern, Course, Question};

/// The outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub correct: bool,
    /// The question's success message, or its hint.
    pub message: String,
}

impl AnswerPattern {
    /// Compile the pattern with its declared flags.
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.pattern)
            .case_insensitive(self.flags.case_insensitive)
            .multi_line(self.flags.multi_line)
            .dot_matches_new_line(self.flags.dot_matches_new_line)
            .build()
    }

    /// Returns `true` if the pattern matches anywhere in `answer`.
    pub fn is_match(&self, answer: &str) -> Result<bool, regex::Error> {
        Ok(self.compile()?.is_match(answer))
    }
}

/// Grade an answer against a question. The first matching pattern wins.
pub fn grade(question: &Question, answer: &str) -> Result<Verdict, regex::Error> {
    let answer = answer.trim();

    for pattern in &question.answers {
        if pattern.is_match(answer)? {
            return Ok(Verdict {
                correct: true,
                message: question.correct_message.clone(),
            });
        }
    }

    Ok(Verdict {
        correct: false,
        message: question.hint.clone(),
    })
}

/// Locate a question in a course and grade the answer.
pub fn grade_submission(
    course: &Course,
    lab_id: &str,
    question_id: u32,
    answer: &str,
) -> Result<Verdict, GradeError> {
    let lab = course.lab(lab_id).ok_or(GradeError::LabNotFound)?;
    let question = lab
        .question(question_id)
        .ok_or(GradeError::QuestionNotFound)?;
    Ok(grade(question, answer)?)
}
