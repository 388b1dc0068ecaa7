//! The `labquiz list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use labquiz_core::{parser, MarkerStore};

use crate::StoreArgs;

pub fn execute(store: StoreArgs) -> Result<()> {
    let config = super::resolve_config(&store)?;
    let courses = parser::load_all_courses(&config.questions_dir)?;

    if courses.is_empty() {
        println!(
            "No courses found in {}. Run `labquiz init` to create an example.",
            config.questions_dir.display()
        );
        return Ok(());
    }

    let markers = MarkerStore::new(&config.marker_dir);

    let mut table = Table::new();
    table.set_header(vec!["Course", "Lab", "Title", "Questions", "Completed"]);

    for course in &courses {
        for (lab_id, lab) in &course.labs {
            let completed = if markers.is_complete(&course.id, lab_id) {
                "yes"
            } else {
                "no"
            };
            table.add_row(vec![
                Cell::new(&course.id),
                Cell::new(lab_id),
                Cell::new(&lab.title),
                Cell::new(lab.questions.len()),
                Cell::new(completed),
            ]);
        }
    }

    println!("{table}");
    Ok(())
}
