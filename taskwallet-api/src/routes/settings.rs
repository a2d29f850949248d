//! Public platform settings
//!
//! Landing text, notice, social links and economics are readable without a
//! token; only the admin can change them (`PUT /v1/admin/settings`).

use crate::app::AppState;
use axum::{extract::State, Json};
use taskwallet_shared::models::settings::Settings;

/// `GET /v1/settings`
pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.store.read(|s| s.settings.clone()).await)
}
