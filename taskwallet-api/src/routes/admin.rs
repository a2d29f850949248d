//! Administrator endpoints
//!
//! Everything under `/v1/admin` requires an admin access token. Review
//! actions (`approve`, `reject`, `close`) only succeed on requests that are
//! still open; deciding twice is a `409 Conflict`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskwallet_shared::{
    models::{
        premium::PremiumRequest,
        review::ReviewStatus,
        settings::Settings,
        submission::TaskSubmission,
        task::{NewTask, Task},
        ticket::Ticket,
        user::UserProfile,
        withdrawal::{JobWithdrawal, Withdrawal},
    },
    store::AdminStats,
};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SubmissionFilter {
    /// `PENDING`, `APPROVED` or `REJECTED`; all when absent
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LedgerVerification {
    pub entries: usize,
    pub intact: bool,
}

pub async fn stats(State(state): State<AppState>) -> Json<AdminStats> {
    Json(state.store.read(|s| s.stats()).await)
}

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserProfile>> {
    Json(state.store.read(|s| s.user_profiles()).await)
}

pub async fn block_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.store.write(|s| s.set_blocked(id, true)).await?))
}

pub async fn unblock_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.store.write(|s| s.set_blocked(id, false)).await?))
}

/// Upgrades a member directly, without a payment claim
pub async fn activate_premium(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.store.write(|s| s.activate_premium(id)).await?))
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(req): Json<NewTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state.store.write(|s| s.add_task(req)).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.store.write(|s| s.delete_task(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /v1/admin/submissions?status=PENDING`
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(filter): Query<SubmissionFilter>,
) -> ApiResult<Json<Vec<TaskSubmission>>> {
    let status = match filter.status.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(ReviewStatus::parse(raw).ok_or_else(|| {
            ApiError::BadRequest(format!("Unknown status filter: {}", raw))
        })?),
    };

    Ok(Json(
        state
            .store
            .read(|s| s.submissions_with_status(status))
            .await,
    ))
}

pub async fn approve_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskSubmission>> {
    Ok(Json(state.store.write(|s| s.approve_submission(id)).await?))
}

pub async fn reject_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskSubmission>> {
    Ok(Json(state.store.write(|s| s.reject_submission(id)).await?))
}

pub async fn list_withdrawals(State(state): State<AppState>) -> Json<Vec<Withdrawal>> {
    Json(state.store.read(|s| s.withdrawals.clone()).await)
}

/// Marks a withdrawal as paid
pub async fn approve_withdrawal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Withdrawal>> {
    Ok(Json(state.store.write(|s| s.approve_withdrawal(id)).await?))
}

/// Rejects a withdrawal and refunds the held amount
pub async fn reject_withdrawal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Withdrawal>> {
    Ok(Json(state.store.write(|s| s.reject_withdrawal(id)).await?))
}

pub async fn list_job_withdrawals(State(state): State<AppState>) -> Json<Vec<JobWithdrawal>> {
    Json(state.store.read(|s| s.job_withdrawals.clone()).await)
}

pub async fn approve_job_withdrawal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<JobWithdrawal>> {
    Ok(Json(
        state.store.write(|s| s.approve_job_withdrawal(id)).await?,
    ))
}

pub async fn reject_job_withdrawal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<JobWithdrawal>> {
    Ok(Json(
        state.store.write(|s| s.reject_job_withdrawal(id)).await?,
    ))
}

pub async fn list_premium_requests(State(state): State<AppState>) -> Json<Vec<PremiumRequest>> {
    Json(state.store.read(|s| s.premium_requests.clone()).await)
}

pub async fn approve_premium(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PremiumRequest>> {
    Ok(Json(state.store.write(|s| s.approve_premium(id)).await?))
}

pub async fn reject_premium(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PremiumRequest>> {
    Ok(Json(state.store.write(|s| s.reject_premium(id)).await?))
}

pub async fn list_tickets(State(state): State<AppState>) -> Json<Vec<Ticket>> {
    Json(state.store.read(|s| s.tickets.clone()).await)
}

pub async fn close_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Ticket>> {
    Ok(Json(state.store.write(|s| s.close_ticket(id)).await?))
}

/// Replaces the whole settings record; omitted fields take their defaults
pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> ApiResult<Json<Settings>> {
    Ok(Json(
        state.store.write(|s| s.update_settings(settings)).await?,
    ))
}

/// Recomputes the ledger hash chain
pub async fn verify_ledger(State(state): State<AppState>) -> Json<LedgerVerification> {
    let (entries, intact) = state
        .store
        .read(|s| (s.ledger.len(), s.ledger.verify_chain()))
        .await;
    Json(LedgerVerification { entries, intact })
}
