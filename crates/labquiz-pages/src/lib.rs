//! labquiz-pages — HTML generation.
//!
//! Every page is a single self-contained document with its CSS and script
//! inlined, so the server needs no static-file handling.

pub mod html;
pub mod quiz;
pub mod reset;

pub use html::{html_escape, render_index, render_not_found, CourseListing, LabListing};
pub use quiz::render_quiz;
pub use reset::render_reset_page;
