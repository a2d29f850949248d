//! Task listing and submission endpoints for members

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskwallet_shared::{
    auth::middleware::AuthContext,
    models::{submission::TaskSubmission, task::Task},
    store::SubmitTask,
};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitTaskRequest {
    #[validate(length(max = 2048, message = "Proof link is too long"))]
    pub proof_link: String,

    #[validate(length(max = 1000, message = "Details are too long"))]
    pub details: Option<String>,
}

/// `GET /v1/tasks`: FREE tasks for free members, everything for premium
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.store.read(|s| s.tasks_for(auth.subject)).await?;
    Ok(Json(tasks))
}

/// `POST /v1/tasks/:id/submit`
///
/// # Errors
///
/// - `403 Forbidden`: Premium task, free member
/// - `404 Not Found`: Unknown task
/// - `409 Conflict`: Daily limit reached
/// - `422 Unprocessable Entity`: Missing proof link
pub async fn submit_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<SubmitTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskSubmission>)> {
    req.validate()?;

    let submission = state
        .store
        .write(|s| {
            s.submit_task(
                auth.subject,
                SubmitTask {
                    task_id,
                    proof_link: req.proof_link,
                    details: req.details,
                },
            )
        })
        .await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// `GET /v1/submissions`: the member's submissions, newest first
pub async fn list_submissions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Json<Vec<TaskSubmission>> {
    Json(state.store.read(|s| s.submissions_for(auth.subject)).await)
}
