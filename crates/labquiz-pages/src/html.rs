//! Shared HTML helpers plus the index and not-found pages.

use std::path::Path;

use serde::Serialize;

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Serialize a value as a JavaScript literal that is safe inside `<script>`.
pub(crate) fn js_literal<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_default()
        .replace("</", "<\\/")
}

/// Document head shared by every page.
pub(crate) fn push_head(html: &mut String, title: &str, css: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(BASE_CSS);
    html.push_str(css);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
}

/// A course as shown on the index page.
#[derive(Debug, Clone)]
pub struct CourseListing {
    pub id: String,
    pub labs: Vec<LabListing>,
}

#[derive(Debug, Clone)]
pub struct LabListing {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// Render the landing page listing every course and its labs.
pub fn render_index(courses: &[CourseListing], questions_dir: &Path) -> String {
    let mut html = String::new();
    push_head(&mut html, "Quiz Server", INDEX_CSS);

    html.push_str("<h1>Quiz Server</h1>\n");

    if courses.is_empty() {
        html.push_str("<div class=\"error\">\n<h2>No courses available</h2>\n");
        html.push_str(&format!(
            "<p>Please check the questions directory at <code>{}</code></p>\n</div>\n",
            html_escape(&questions_dir.display().to_string())
        ));
        html.push_str("</body>\n</html>");
        return html;
    }

    html.push_str("<p>Available courses and labs:</p>\n");
    for course in courses {
        html.push_str(&format!(
            "<div class=\"course\">{}</div>\n<ul>\n",
            html_escape(&course.id)
        ));
        for lab in &course.labs {
            let check = if lab.completed {
                " <span class=\"checkmark\" title=\"completed\">&#10003;</span>"
            } else {
                ""
            };
            html.push_str(&format!(
                "<li class=\"lab\"><a href=\"/{}/{}\">{}</a> - {}{}</li>\n",
                html_escape(&course.id),
                html_escape(&lab.id),
                html_escape(&lab.id),
                html_escape(&lab.title),
                check
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

/// Render the 404 page for an unknown course or lab.
pub fn render_not_found(course_id: &str, lab_id: &str, available_courses: &[String]) -> String {
    let mut html = String::new();
    push_head(&mut html, "Quiz Not Found", INDEX_CSS);

    html.push_str("<div class=\"error\">\n<h1>Quiz Not Found</h1>\n");
    html.push_str(&format!(
        "<p>The quiz \"{}/{}\" could not be found.</p>\n",
        html_escape(course_id),
        html_escape(lab_id)
    ));

    if available_courses.is_empty() {
        html.push_str(
            "<p><strong>No courses available.</strong> Please check the questions directory.</p>\n",
        );
    } else {
        html.push_str("<h2>Available Courses:</h2>\n<ul>\n");
        for course in available_courses {
            html.push_str(&format!(
                "<li><a href=\"/\">{}</a></li>\n",
                html_escape(course)
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</div>\n</body>\n</html>");
    html
}

const BASE_CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Helvetica Neue', sans-serif; padding: 40px; margin: 0 auto; background: #1a1d24; color: #e5e7eb; line-height: 1.6; }
a { color: #60a5fa; text-decoration: none; }
a:hover { text-decoration: underline; }
code { background: #1a1d24; color: #86efac; padding: 2px 6px; border-radius: 3px; font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', 'Consolas', monospace; font-size: 13px; }
button { padding: 10px 20px; color: white; border: none; cursor: pointer; border-radius: 6px; font-size: 14px; font-weight: 500; margin-top: 10px; transition: all 0.2s ease; }
button:hover { transform: translateY(-1px); box-shadow: 0 4px 6px rgba(0, 0, 0, 0.3); }
.checkmark { color: #86efac; font-size: 20px; font-weight: bold; margin-left: 10px; }
"#;

const INDEX_CSS: &str = r#"
body { max-width: 900px; }
h1 { color: #f9fafb; font-weight: 600; }
.error { padding: 20px; background: #3a1a1a; color: #fca5a5; border: 1px solid #5f2d2d; border-radius: 8px; }
.error h1 { color: #fca5a5; }
h2 { color: #f9fafb; margin-top: 30px; font-weight: 600; }
ul { list-style: none; padding: 0; margin-top: 10px; }
li { margin: 5px 0; }
.course { font-weight: bold; font-size: 18px; margin-top: 20px; color: #f9fafb; }
.lab { margin-left: 20px; }
"#;
