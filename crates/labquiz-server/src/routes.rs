//! Router and request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use labquiz_core::grading::{grade_submission, Verdict};
use labquiz_core::GradeError;
use labquiz_pages::quiz::storage_key;
use labquiz_pages::{render_index, render_not_found, render_quiz, render_reset_page};
use labquiz_pages::{CourseListing, LabListing};

use crate::api::{CompleteRequest, CompleteResponse, ResetRequest, ResetResponse, ValidateRequest};
use crate::context::AppContext;
use crate::error::ApiError;

/// Build the application router.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/validate", post(validate))
        .route("/complete", post(complete))
        .route("/reset", post(reset))
        .route("/reset-page/:course/:lab", get(reset_page))
        .route("/:course/:lab", get(quiz))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

async fn index(State(ctx): State<AppContext>) -> Html<String> {
    let listings: Vec<CourseListing> = ctx
        .courses()
        .into_iter()
        .map(|course| CourseListing {
            labs: course
                .labs
                .iter()
                .map(|(lab_id, lab)| LabListing {
                    id: lab_id.clone(),
                    title: lab.title.clone(),
                    completed: ctx.markers().is_complete(&course.id, lab_id),
                })
                .collect(),
            id: course.id,
        })
        .collect();

    Html(render_index(&listings, ctx.questions_dir()))
}

async fn quiz(
    State(ctx): State<AppContext>,
    Path((course_id, lab_id)): Path<(String, String)>,
) -> Response {
    let page = ctx
        .course(&course_id)
        .and_then(|course| course.lab(&lab_id).map(|lab| render_quiz(&course_id, &lab_id, lab)));

    match page {
        Some(html) => Html(html).into_response(),
        None => {
            let available: Vec<String> =
                ctx.courses().into_iter().map(|course| course.id).collect();
            (
                StatusCode::NOT_FOUND,
                Html(render_not_found(&course_id, &lab_id, &available)),
            )
                .into_response()
        }
    }
}

async fn validate(
    State(ctx): State<AppContext>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = json_body(payload)?;

    let result = match ctx.course(&req.course_name) {
        Some(course) => grade_submission(&course, &req.lab_id, req.question_id, &req.answer),
        None => Err(GradeError::LabNotFound),
    };

    let response = match result {
        Ok(verdict) => {
            tracing::debug!(
                course = %req.course_name,
                lab = %req.lab_id,
                question = req.question_id,
                correct = verdict.correct,
                "graded answer"
            );
            Json(verdict).into_response()
        }
        Err(e) => {
            let status = match e {
                GradeError::LabNotFound | GradeError::QuestionNotFound => StatusCode::NOT_FOUND,
                GradeError::Pattern(_) => {
                    tracing::error!(course = %req.course_name, lab = %req.lab_id, "{e}");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let verdict = Verdict {
                correct: false,
                message: e.to_string(),
            };
            (status, Json(verdict)).into_response()
        }
    };
    Ok(response)
}

async fn complete(
    State(ctx): State<AppContext>,
    payload: Result<Json<CompleteRequest>, JsonRejection>,
) -> Result<Json<CompleteResponse>, ApiError> {
    let req = json_body(payload)?;
    let path = ctx
        .markers()
        .mark_complete(&req.course_name, &req.lab_id)?;

    Ok(Json(CompleteResponse {
        success: true,
        message: format!("Quiz {}/{} marked as complete", req.course_name, req.lab_id),
        file: path.display().to_string(),
    }))
}

async fn reset(
    State(ctx): State<AppContext>,
    payload: Result<Json<ResetRequest>, JsonRejection>,
) -> Result<Json<ResetResponse>, ApiError> {
    let req = json_body(payload)?;
    let markers = ctx.markers();

    let (outcome, local_storage_key) = if req.reset_all {
        (markers.reset_all()?, "quizProgress_*".to_string())
    } else {
        markers.marker_path(&req.course_name, &req.lab_id)?;
        (
            markers.reset(&req.course_name, &req.lab_id),
            storage_key(&req.course_name, &req.lab_id),
        )
    };

    tracing::info!(
        course = %req.course_name,
        lab = %req.lab_id,
        reset_all = req.reset_all,
        deleted = outcome.deleted.len(),
        "quiz reset"
    );

    let success = outcome.is_success();
    Ok(Json(ResetResponse {
        success,
        message: "Quiz reset completed".to_string(),
        deleted_files: outcome.deleted,
        errors: (!success).then_some(outcome.errors),
        local_storage_key,
    }))
}

async fn reset_page(Path((course_id, lab_id)): Path<(String, String)>) -> Html<String> {
    Html(render_reset_page(&course_id, &lab_id))
}
