//! The quiz page.
//!
//! The page grades nothing itself: the script posts each answer to
//! `/validate`, keeps drafts in local storage under
//! `quizProgress_{course}_{lab}`, and calls `/complete` once every question
//! has been answered correctly.

use labquiz_core::model::{Lab, Question};

use crate::html::{html_escape, js_literal, push_head};

/// Local-storage key for a lab's drafts.
pub fn storage_key(course_id: &str, lab_id: &str) -> String {
    format!("quizProgress_{course_id}_{lab_id}")
}

/// Render the quiz page for one lab.
pub fn render_quiz(course_id: &str, lab_id: &str, lab: &Lab) -> String {
    let mut html = String::new();
    push_head(&mut html, &lab.title, QUIZ_CSS);

    html.push_str("<div class=\"header-container\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&lab.title)));
    html.push_str("<button class=\"reset-btn\" onclick=\"resetQuiz()\">Reset Quiz</button>\n");
    html.push_str("</div>\n");

    html.push_str("<div class=\"progress\" id=\"progress\">\n<h2>Progress</h2>\n");
    html.push_str(&format!(
        "<p class=\"progress-text\"><span id=\"completed\">0</span> of {} questions completed</p>\n",
        lab.questions.len()
    ));
    html.push_str("</div>\n");

    for question in &lab.questions {
        push_question(&mut html, question);
    }

    let ids: Vec<u32> = lab.questions.iter().map(|q| q.id).collect();
    html.push_str("<script>\n");
    html.push_str(&format!("const COURSE_NAME = {};\n", js_literal(course_id)));
    html.push_str(&format!("const LAB_ID = {};\n", js_literal(lab_id)));
    html.push_str(&format!("const QUESTION_IDS = {};\n", js_literal(&ids)));
    html.push_str(&format!(
        "const STORAGE_KEY = {};\n",
        js_literal(&storage_key(course_id, lab_id))
    ));
    html.push_str(QUIZ_JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

fn push_question(html: &mut String, q: &Question) {
    let id = q.id;
    html.push_str(&format!("<div class=\"question\" id=\"q{id}\">\n"));
    html.push_str(&format!(
        "<h3>Question {id}: {}</h3>\n",
        html_escape(&q.title)
    ));
    // Author-supplied markup, inserted as-is.
    html.push_str(&format!("<p>{}</p>\n", q.text));

    let placeholder = html_escape(&q.placeholder);
    if q.multiline {
        html.push_str(&format!(
            "<textarea id=\"answer{id}\" placeholder=\"{placeholder}\" rows=\"{}\"></textarea>\n",
            q.rows_or_default()
        ));
    } else {
        html.push_str(&format!(
            "<input type=\"text\" id=\"answer{id}\" placeholder=\"{placeholder}\">\n"
        ));
    }

    html.push_str(&format!(
        "<button onclick=\"checkAnswer({id})\" id=\"button{id}\">Check Answer</button>\n"
    ));
    html.push_str(&format!(
        "<div id=\"feedback{id}\" class=\"feedback\"></div>\n"
    ));
    html.push_str("</div>\n");
}

const QUIZ_CSS: &str = r#"
body { max-width: 1200px; }
h1 { color: #f9fafb; margin-bottom: 30px; font-size: 28px; font-weight: 600; }
.question { margin: 20px 0; padding: 25px; background: #272b33; border-radius: 8px; border: 1px solid #3b4048; transition: all 0.3s ease; }
.question.completed { background: #1a3a2e; border-color: #2d5f4a; }
.question h3 { margin-top: 0; color: #f9fafb; font-size: 18px; font-weight: 600; }
.question.completed h3 { color: #86efac; }
.question p { color: #d1d5db; margin: 10px 0; }
input[type="text"], textarea { width: 100%; padding: 12px; font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', 'Consolas', monospace; font-size: 14px; background: #1a1d24; color: #e5e7eb; border: 1px solid #3b4048; border-radius: 6px; margin-top: 10px; box-sizing: border-box; }
input[type="text"]:focus, textarea:focus { outline: none; border-color: #6366f1; box-shadow: 0 0 0 2px rgba(99, 102, 241, 0.1); }
textarea { min-height: 100px; resize: vertical; }
.question.completed input[type="text"], .question.completed textarea { background: #1a3a2e; border-color: #2d5f4a; }
.question button { background: #7c3aed; }
.question button:hover { background: #6d28d9; }
button.hidden { display: none; }
.feedback { margin-top: 15px; padding: 15px; border-radius: 6px; display: none; }
.correct { background: #1a3a2e; color: #86efac; border: 1px solid #2d5f4a; }
.incorrect { background: #3a1a1a; color: #fca5a5; border: 1px solid #5f2d2d; }
.progress { margin: 30px 0; padding: 20px; background: #272b33; border-radius: 8px; border: 1px solid #3b4048; text-align: center; }
.progress h2 { margin: 0 0 10px 0; color: #f9fafb; font-size: 20px; font-weight: 600; }
.progress-text { font-size: 16px; color: #9ca3af; }
.progress.complete { background: #1a3a2e; border-color: #2d5f4a; }
.progress.complete h2 { color: #86efac; }
.progress.complete .progress-text, .progress.complete .progress-text strong { color: #f0fdf4; }
.header-container { display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px; }
.header-container h1 { margin: 0; }
.reset-btn { background: #dc2626; }
.reset-btn:hover { background: #b91c1c; }
"#;

const QUIZ_JS: &str = r#"
const completedQuestions = new Set();
let completionSent = false;

function postJson(url, body) {
  return fetch(url, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body)
  }).then(response => response.json());
}

function showFeedback(questionId, correct, html) {
  const feedback = document.getElementById('feedback' + questionId);
  feedback.style.display = 'block';
  feedback.className = 'feedback ' + (correct ? 'correct' : 'incorrect');
  feedback.innerHTML = html;
}

function markCorrect(questionId, message) {
  const questionDiv = document.getElementById('q' + questionId);
  const heading = questionDiv.querySelector('h3');
  if (!heading.querySelector('.checkmark')) {
    heading.innerHTML += ' <span class="checkmark">&#10003;</span>';
  }
  questionDiv.classList.add('completed');
  document.getElementById('button' + questionId).classList.add('hidden');
  document.getElementById('answer' + questionId).disabled = true;
  completedQuestions.add(questionId);
  showFeedback(questionId, true, '<strong>Correct!</strong> ' + message);
  updateProgress();
}

function checkAnswer(questionId) {
  if (completedQuestions.has(questionId)) {
    return;
  }
  const answer = document.getElementById('answer' + questionId).value.trim();

  postJson('/validate', {
    course_name: COURSE_NAME,
    lab_id: LAB_ID,
    question_id: questionId,
    answer: answer
  })
    .then(data => {
      if (data.correct) {
        markCorrect(questionId, data.message);
      } else {
        showFeedback(questionId, false, '<strong>Not quite.</strong> ' + data.message);
      }
    })
    .catch(error => {
      console.error('Error:', error);
      showFeedback(questionId, false, '<strong>Error:</strong> Could not validate answer.');
    });
}

function updateProgress() {
  const completed = completedQuestions.size;
  document.getElementById('completed').textContent = completed;

  if (completed === QUESTION_IDS.length) {
    const progressDiv = document.getElementById('progress');
    progressDiv.classList.add('complete');
    progressDiv.querySelector('.progress-text').innerHTML =
      '<strong>&#127881; All questions completed! Great work!</strong>';
    writeCompletion();
  }
}

function writeCompletion() {
  if (completionSent) {
    return;
  }
  completionSent = true;
  postJson('/complete', { course_name: COURSE_NAME, lab_id: LAB_ID })
    .then(data => console.log('Quiz completion recorded:', data))
    .catch(error => console.error('Error recording completion:', error));
}

function clearAndReload() {
  localStorage.removeItem(STORAGE_KEY);
  location.reload();
}

function resetQuiz() {
  if (!confirm('Reset all progress for this quiz?')) {
    return;
  }
  postJson('/reset', { course_name: COURSE_NAME, lab_id: LAB_ID, reset_all: false })
    .then(clearAndReload)
    .catch(error => {
      console.error('Error resetting quiz:', error);
      clearAndReload();
    });
}

function saveProgress() {
  const answers = {};
  for (const id of QUESTION_IDS) {
    const input = document.getElementById('answer' + id);
    if (input && input.value) {
      answers[id] = input.value;
    }
  }
  localStorage.setItem(STORAGE_KEY, JSON.stringify(answers));
}

for (const id of QUESTION_IDS) {
  const input = document.getElementById('answer' + id);
  if (!input) {
    continue;
  }
  input.addEventListener('input', saveProgress);
  input.addEventListener('keypress', function (event) {
    if (event.key === 'Enter' && this.tagName === 'INPUT') {
      checkAnswer(id);
    }
  });
}

window.addEventListener('load', function () {
  const saved = localStorage.getItem(STORAGE_KEY);
  if (!saved) {
    return;
  }
  let drafts;
  try {
    drafts = JSON.parse(saved);
  } catch (e) {
    localStorage.removeItem(STORAGE_KEY);
    return;
  }
  for (const key in drafts) {
    const id = parseInt(key, 10);
    const input = document.getElementById('answer' + id);
    if (input && QUESTION_IDS.includes(id)) {
      input.value = drafts[key];
      checkAnswer(id);
    }
  }
});
"#;
