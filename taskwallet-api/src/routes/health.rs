//! Health check endpoint
//!
//! ```text
//! GET /health
//! ```
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "users": 2,
//!   "ledger": "intact"
//! }
//! ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Registered members
    pub users: usize,

    /// `intact` or `broken`
    pub ledger: String,
}

/// Reports liveness plus a ledger chain check
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (users, ledger_ok) = state
        .store
        .read(|s| (s.users.len(), s.ledger.verify_chain()))
        .await;

    Json(HealthResponse {
        status: if ledger_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        users,
        ledger: if ledger_ok { "intact" } else { "broken" }.to_string(),
    })
}
