//! Standalone reset-confirmation page.

use crate::html::{html_escape, js_literal, push_head};
use crate::quiz::storage_key;

/// Render the page that resets one lab after an explicit click.
pub fn render_reset_page(course_id: &str, lab_id: &str) -> String {
    let mut html = String::new();
    push_head(
        &mut html,
        &format!("Reset Quiz - {course_id}/{lab_id}"),
        RESET_CSS,
    );

    html.push_str("<div class=\"reset-box\">\n<h1>Reset Quiz Progress</h1>\n");
    html.push_str(&format!(
        "<div class=\"quiz-info\"><strong>{}</strong> / {}</div>\n",
        html_escape(course_id),
        html_escape(lab_id)
    ));
    html.push_str(
        "<div class=\"warning\"><strong>&#9888;&#65039; Warning:</strong> \
         This will permanently delete your progress for this quiz. \
         You will need to answer all questions again.</div>\n",
    );
    html.push_str("<p>This will reset:</p>\n<ul>\n");
    html.push_str("<li>Your saved answers in the browser</li>\n");
    html.push_str("<li>The completion status on the server</li>\n</ul>\n");
    html.push_str("<div>\n");
    html.push_str("<button class=\"btn-reset\" onclick=\"resetQuiz()\">Reset Quiz</button>\n");
    html.push_str("<button class=\"btn-cancel\" onclick=\"goBack()\">Cancel</button>\n");
    html.push_str("</div>\n<div id=\"message\" class=\"message\"></div>\n</div>\n");

    html.push_str("<script>\n");
    html.push_str(&format!("const COURSE_NAME = {};\n", js_literal(course_id)));
    html.push_str(&format!("const LAB_ID = {};\n", js_literal(lab_id)));
    html.push_str(&format!(
        "const STORAGE_KEY = {};\n",
        js_literal(&storage_key(course_id, lab_id))
    ));
    html.push_str(&format!(
        "const QUIZ_URL = {};\n",
        js_literal(&format!("/{course_id}/{lab_id}"))
    ));
    html.push_str(RESET_JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

const RESET_CSS: &str = r#"
body { max-width: 700px; }
.reset-box { padding: 30px; background: #272b33; border-radius: 8px; border: 1px solid #3b4048; text-align: center; }
h1 { color: #f9fafb; margin-bottom: 10px; font-size: 28px; font-weight: 600; }
.quiz-info { color: #9ca3af; margin-bottom: 30px; font-size: 18px; }
.warning { background: #3a2a1a; border: 1px solid #5f4a2d; color: #fbbf24; padding: 15px; border-radius: 6px; margin: 20px 0; }
button { margin: 10px; padding: 12px 24px; }
.btn-reset { background: #dc2626; }
.btn-reset:hover { background: #b91c1c; }
.btn-cancel { background: #4b5563; }
.btn-cancel:hover { background: #374151; }
.message { margin-top: 20px; padding: 15px; border-radius: 6px; display: none; }
.message.success { background: #1a3a2e; color: #86efac; border: 1px solid #2d5f4a; }
.message.error { background: #3a1a1a; color: #fca5a5; border: 1px solid #5f2d2d; }
ul { text-align: left; display: inline-block; color: #d1d5db; }
"#;

const RESET_JS: &str = r#"
function escapeHtml(s) {
  const div = document.createElement('div');
  div.textContent = s;
  return div.innerHTML;
}

function showMessage(kind, html) {
  const messageDiv = document.getElementById('message');
  messageDiv.className = 'message ' + kind;
  messageDiv.style.display = 'block';
  messageDiv.innerHTML = html + '<p><a href="' + QUIZ_URL + '">Return to quiz</a></p>';
}

function resetQuiz() {
  document.getElementById('message').style.display = 'none';

  fetch('/reset', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ course_name: COURSE_NAME, lab_id: LAB_ID, reset_all: false })
  })
    .then(response => response.json())
    .then(data => {
      localStorage.removeItem(STORAGE_KEY);
      const deleted = data.deleted_files || [];
      const errors = data.errors || [];
      let html = data.success
        ? '<strong>&#10003; Quiz Reset Successfully!</strong>'
        : '<strong>Quiz reset finished with errors.</strong>';
      html += '<p>Deleted files: ' + (deleted.length > 0 ? escapeHtml(deleted.join(', ')) : 'None') + '</p>';
      if (errors.length > 0) {
        html += '<p>' + escapeHtml(errors.join('; ')) + '</p>';
      }
      html += '<p>Browser storage cleared.</p>';
      showMessage(data.success ? 'success' : 'error', html);
    })
    .catch(error => {
      console.error('Error:', error);
      localStorage.removeItem(STORAGE_KEY);
      showMessage('success',
        '<strong>&#10003; Browser Storage Cleared!</strong>' +
        '<p>Server file deletion may have failed, but your progress has been reset.</p>');
    });
}

function goBack() {
  window.location.href = QUIZ_URL;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_page_contains_required_elements() {
        let html = render_reset_page("networking", "lab1");

        assert!(html.contains("<title>Reset Quiz - networking/lab1</title>"));
        assert!(html.contains("<strong>networking</strong> / lab1"));
        assert!(html.contains("onclick=\"resetQuiz()\""));
        assert!(html.contains("onclick=\"goBack()\""));
        assert!(html.contains("reset_all: false"));
        assert!(html.contains(r#"const QUIZ_URL = "/networking/lab1";"#));
        assert!(html.contains(r#"const STORAGE_KEY = "quizProgress_networking_lab1";"#));
    }

    #[test]
    fn reset_page_escapes_identifiers() {
        let html = render_reset_page("<b>", "lab1");
        assert!(html.contains("<strong>&lt;b&gt;</strong>"));
        assert!(!html.contains("<strong><b></strong>"));
    }
}
