//! The `labquiz check` command.

use anyhow::{Context, Result};

use labquiz_core::{grade_submission, parser};

use crate::StoreArgs;

pub fn execute(
    store: StoreArgs,
    course_id: String,
    lab_id: String,
    question_id: u32,
    answer: String,
) -> Result<()> {
    let config = super::resolve_config(&store)?;
    let course = parser::load_course(&config.questions_dir, &course_id)
        .with_context(|| format!("failed to load course {course_id}"))?;

    let verdict = grade_submission(&course, &lab_id, question_id, &answer)
        .with_context(|| format!("{course_id}/{lab_id} question {question_id}"))?;

    if verdict.correct {
        println!("Correct! {}", verdict.message);
    } else {
        println!("Not quite. {}", verdict.message);
    }
    Ok(())
}
