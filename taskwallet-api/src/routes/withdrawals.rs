//! Payout endpoints for members
//!
//! - `POST /v1/withdrawals` / `GET /v1/withdrawals`
//! - `POST /v1/job-withdrawals` / `GET /v1/job-withdrawals`

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use taskwallet_shared::{
    auth::middleware::AuthContext,
    models::{
        wallet::WalletKind,
        withdrawal::{JobWithdrawal, PayoutMethod, Withdrawal},
    },
    store::{RequestJobWithdrawal, RequestWithdrawal},
};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct WithdrawalRequestBody {
    pub amount: u64,
    pub method: PayoutMethod,

    #[validate(length(max = 20, message = "Account number is too long"))]
    pub number: String,

    /// Wallet to withdraw from
    pub wallet: WalletKind,
}

#[derive(Debug, Deserialize, Validate)]
pub struct JobWithdrawalRequestBody {
    #[validate(length(max = 100, message = "Job type is too long"))]
    pub job_type: String,

    pub points: u64,

    #[validate(length(max = 20, message = "Wallet number is too long"))]
    pub wallet_number: String,

    #[serde(default)]
    #[validate(length(max = 2048, message = "Proof image link is too long"))]
    pub proof_image: String,
}

/// Requests a payout; the amount is held from the wallet immediately
pub async fn request_withdrawal(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<WithdrawalRequestBody>,
) -> ApiResult<(StatusCode, Json<Withdrawal>)> {
    req.validate()?;

    let withdrawal = state
        .store
        .write(|s| {
            s.request_withdrawal(
                auth.subject,
                RequestWithdrawal {
                    amount: req.amount,
                    method: req.method,
                    number: req.number,
                    wallet: req.wallet,
                },
            )
        })
        .await?;
    Ok((StatusCode::CREATED, Json(withdrawal)))
}

pub async fn list_withdrawals(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Json<Vec<Withdrawal>> {
    Json(state.store.read(|s| s.withdrawals_for(auth.subject)).await)
}

pub async fn request_job_withdrawal(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<JobWithdrawalRequestBody>,
) -> ApiResult<(StatusCode, Json<JobWithdrawal>)> {
    req.validate()?;

    let job = state
        .store
        .write(|s| {
            s.request_job_withdrawal(
                auth.subject,
                RequestJobWithdrawal {
                    job_type: req.job_type,
                    points: req.points,
                    wallet_number: req.wallet_number,
                    proof_image: req.proof_image,
                },
            )
        })
        .await?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn list_job_withdrawals(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Json<Vec<JobWithdrawal>> {
    Json(state.store.read(|s| s.job_withdrawals_for(auth.subject)).await)
}
