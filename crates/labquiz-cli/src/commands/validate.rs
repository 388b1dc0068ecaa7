//! The `labquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use labquiz_core::parser;

pub fn execute(questions_path: PathBuf) -> Result<()> {
    let files = if questions_path.is_dir() {
        parser::available_courses(&questions_path)?
            .into_iter()
            .map(|id| parser::course_path(&questions_path, &id))
            .collect()
    } else {
        vec![questions_path.clone()]
    };

    if files.is_empty() {
        anyhow::bail!("no question sets found in {}", questions_path.display());
    }

    let mut total_warnings = 0;
    let mut failed = 0;

    for file in &files {
        let course = match parser::load_course_file(file) {
            Ok(course) => course,
            Err(e) => {
                println!("{}: ERROR: {e}", file.display());
                failed += 1;
                continue;
            }
        };

        println!(
            "Course: {} ({} labs, {} questions)",
            course.id,
            course.labs.len(),
            course.question_count()
        );

        let warnings = parser::check_course(&course);
        for w in &warnings {
            let location = match w.question_id {
                Some(q) => format!("  [{}#{q}]", w.lab_id),
                None => format!("  [{}]", w.lab_id),
            };
            println!("{location} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if failed > 0 {
        anyhow::bail!("{failed} question set(s) failed to load");
    }

    if total_warnings == 0 {
        println!("All question sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
