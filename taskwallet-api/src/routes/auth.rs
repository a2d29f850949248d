//! Authentication endpoints
//!
//! # Endpoints
//!
//! - `POST /v1/auth/register` - Register a member with a referral code
//! - `POST /v1/auth/login` - Member login by phone and password
//! - `POST /v1/auth/admin/login` - Administrator login
//! - `POST /v1/auth/refresh` - Refresh access token
//!
//! Logout is client-side: tokens are stateless, the client drops them.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskwallet_shared::{
    auth::jwt::{self, Claims, Role, TokenType},
    models::user::UserProfile,
    store::Registration,
};
use tracing::{info, warn};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 6, max = 20, message = "Invalid phone number"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Checked against the password policy by the store
    pub password: String,

    /// Another member's code, or one of the open codes
    pub ref_code: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,

    pub password: String,
}

/// Member session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserProfile,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Administrator session
#[derive(Debug, Serialize)]
pub struct AdminSessionResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

/// Register a new member
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// {
///   "name": "Rahim",
///   "phone": "01911111111",
///   "email": "rahim@example.com",
///   "password": "secret1",
///   "ref_code": "USER01"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Phone already registered
/// - `422 Unprocessable Entity`: Invalid fields or unknown referral code
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    req.validate()?;

    let user = state
        .store
        .register(Registration {
            name: req.name,
            phone: req.phone,
            email: req.email,
            password: req.password,
            ref_code: req.ref_code,
        })
        .await?;

    let (access_token, refresh_token) = jwt::issue_pair(user.id, Role::User, state.jwt_secret())?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            user,
            access_token,
            refresh_token,
        }),
    ))
}

/// Member login
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown phone or wrong password
/// - `403 Forbidden`: Account is blocked
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    req.validate()?;

    let user = state.store.login(&req.phone, &req.password).await?;
    let (access_token, refresh_token) = jwt::issue_pair(user.id, Role::User, state.jwt_secret())?;

    Ok(Json(SessionResponse {
        user,
        access_token,
        refresh_token,
    }))
}

/// Administrator login against the configured credential pair
pub async fn admin_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AdminSessionResponse>> {
    req.validate()?;

    if !state.admin.verify(&req.phone, &req.password)? {
        warn!(phone = %req.phone, "Rejected admin login");
        return Err(ApiError::Unauthorized(
            "Invalid admin credentials".to_string(),
        ));
    }

    let access_token = jwt::create_token(&Claims::admin(TokenType::Access), state.jwt_secret())?;
    let refresh_token = jwt::create_token(&Claims::admin(TokenType::Refresh), state.jwt_secret())?;
    info!("Admin logged in");

    Ok(Json(AdminSessionResponse {
        access_token,
        refresh_token,
    }))
}

/// Exchanges a refresh token for a new access token
///
/// Member tokens are refused once the account is blocked.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let claims = jwt::validate_refresh_token(&req.refresh_token, state.jwt_secret())?;

    if claims.role == Role::User {
        state.store.active_profile(claims.sub).await?;
    }

    let access_token = jwt::create_token(
        &Claims::new(claims.sub, claims.role, TokenType::Access),
        state.jwt_secret(),
    )?;

    Ok(Json(RefreshResponse { access_token }))
}
