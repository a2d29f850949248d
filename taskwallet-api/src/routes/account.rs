//! Member account endpoints: profile, password, team, ledger, premium and
//! quiz

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use taskwallet_shared::{
    auth::middleware::AuthContext,
    models::{
        ledger::LedgerEntry,
        premium::PremiumRequest,
        user::{Team, UserProfile},
        withdrawal::PayoutMethod,
    },
    store::{QuizOutcome, QuizView, RequestPremium},
};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be 6 to 128 characters long"
    ))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PremiumRequestBody {
    pub method: PayoutMethod,

    #[validate(length(min = 1, max = 20, message = "Sender number is required"))]
    pub sender_number: String,

    #[validate(length(min = 1, max = 64, message = "Transaction ID is required"))]
    pub trx_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct QuizAnswerRequest {
    /// Sums of two digits never exceed 18
    #[validate(range(max = 99, message = "Wrong answer"))]
    pub answer: u32,
}

#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    pub entries: Vec<LedgerEntry>,
}

/// `GET /v1/me`
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state
        .store
        .read(|s| s.user(auth.subject).map(|u| u.profile()))
        .await?;
    Ok(Json(profile))
}

/// `PUT /v1/me/password`
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    state
        .store
        .change_password(auth.subject, &req.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /v1/me/team`: members who joined with this member's code
pub async fn team(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Team>> {
    let team = state.store.read(|s| s.team(auth.subject)).await?;
    Ok(Json(team))
}

/// `GET /v1/me/ledger`: balance history, newest first
pub async fn ledger(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Json<LedgerResponse> {
    let entries = state
        .store
        .read(|s| s.ledger.for_user(auth.subject))
        .await;
    Json(LedgerResponse { entries })
}

/// `POST /v1/premium`: claim a premium fee payment
pub async fn request_premium(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<PremiumRequestBody>,
) -> ApiResult<(StatusCode, Json<PremiumRequest>)> {
    req.validate()?;

    let request = state
        .store
        .write(|s| {
            s.request_premium(
                auth.subject,
                RequestPremium {
                    method: req.method,
                    sender_number: req.sender_number,
                    trx_id: req.trx_id,
                },
            )
        })
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// `GET /v1/quiz`
pub async fn quiz(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<QuizView>> {
    Ok(Json(state.store.next_quiz(auth.subject).await?))
}

/// `POST /v1/quiz/answer`
pub async fn answer_quiz(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<QuizAnswerRequest>,
) -> ApiResult<Json<QuizOutcome>> {
    req.validate()?;

    let outcome = state
        .store
        .write(|s| s.answer_quiz(auth.subject, req.answer))
        .await?;
    Ok(Json(outcome))
}
