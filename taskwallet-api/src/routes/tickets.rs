//! Support tickets for members

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use taskwallet_shared::{auth::middleware::AuthContext, models::ticket::Ticket};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct TicketRequest {
    #[validate(length(max = 200, message = "Subject is too long"))]
    pub subject: String,

    #[validate(length(max = 5000, message = "Message is too long"))]
    pub message: String,
}

/// `POST /v1/tickets`
pub async fn submit_ticket(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<TicketRequest>,
) -> ApiResult<(StatusCode, Json<Ticket>)> {
    req.validate()?;

    let ticket = state
        .store
        .write(|s| s.submit_ticket(auth.subject, &req.subject, &req.message))
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// `GET /v1/tickets`
pub async fn list_tickets(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Json<Vec<Ticket>> {
    Json(state.store.read(|s| s.tickets_for(auth.subject)).await)
}
