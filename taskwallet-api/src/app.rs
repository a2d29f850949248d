//! Application state and router builder
//!
//! This module defines the shared application state and provides
//! a function to build the Axum router with all routes and middleware.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskwallet_api::{app::AppState, config::Config};
//! use taskwallet_shared::store::{FileSnapshotStore, Store};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let snapshots = Arc::new(FileSnapshotStore::new(&config.store.data_path));
//! let store = Store::open(snapshots).await?;
//! let state = AppState::new(store, config)?;
//! let app = taskwallet_api::app::build_router(state);
//! # Ok(())
//! # }
//! ```

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use taskwallet_shared::{
    auth::{
        admin::AdminCredentials,
        jwt::Role,
        middleware::{authenticate, AuthContext},
        password::PasswordError,
    },
    error::StoreError,
    store::Store,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,

    /// Application configuration
    pub config: Arc<Config>,

    /// Hashed administrator credentials
    pub admin: Arc<AdminCredentials>,
}

impl AppState {
    /// Creates new application state, hashing the configured admin password
    pub fn new(store: Store, config: Config) -> Result<Self, PasswordError> {
        let admin = AdminCredentials::new(config.admin.phone.clone(), &config.admin.password)?;
        Ok(Self {
            store: Arc::new(store),
            config: Arc::new(config),
            admin: Arc::new(admin),
        })
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                        # Health check (public)
/// └── /v1/
///     ├── GET /settings              # Public settings
///     ├── /auth/                     # register, login, admin/login, refresh
///     ├── member routes              # bearer token, role user, not blocked
///     │   ├── /me, /me/password, /me/team, /me/ledger
///     │   ├── /tasks, /tasks/:id/submit, /submissions
///     │   ├── /withdrawals, /job-withdrawals
///     │   ├── /premium, /quiz, /quiz/answer
///     │   └── /tickets
///     └── /admin/                    # bearer token, role admin
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (per route group)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/admin/login", post(routes::auth::admin_login))
        .route("/refresh", post(routes::auth::refresh));

    let member_routes = Router::new()
        .route("/me", get(routes::account::me))
        .route("/me/password", put(routes::account::change_password))
        .route("/me/team", get(routes::account::team))
        .route("/me/ledger", get(routes::account::ledger))
        .route("/tasks", get(routes::tasks::list_tasks))
        .route("/tasks/:id/submit", post(routes::tasks::submit_task))
        .route("/submissions", get(routes::tasks::list_submissions))
        .route(
            "/withdrawals",
            post(routes::withdrawals::request_withdrawal).get(routes::withdrawals::list_withdrawals),
        )
        .route(
            "/job-withdrawals",
            post(routes::withdrawals::request_job_withdrawal)
                .get(routes::withdrawals::list_job_withdrawals),
        )
        .route("/premium", post(routes::account::request_premium))
        .route("/quiz", get(routes::account::quiz))
        .route("/quiz/answer", post(routes::account::answer_quiz))
        .route(
            "/tickets",
            post(routes::tickets::submit_ticket).get(routes::tickets::list_tickets),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            user_auth_layer,
        ));

    let admin_routes = Router::new()
        .route("/stats", get(routes::admin::stats))
        .route("/users", get(routes::admin::list_users))
        .route("/users/:id/block", post(routes::admin::block_user))
        .route("/users/:id/unblock", post(routes::admin::unblock_user))
        .route("/users/:id/premium", post(routes::admin::activate_premium))
        .route("/tasks", post(routes::admin::add_task))
        .route("/tasks/:id", delete(routes::admin::delete_task))
        .route("/submissions", get(routes::admin::list_submissions))
        .route("/submissions/:id/approve", post(routes::admin::approve_submission))
        .route("/submissions/:id/reject", post(routes::admin::reject_submission))
        .route("/withdrawals", get(routes::admin::list_withdrawals))
        .route("/withdrawals/:id/approve", post(routes::admin::approve_withdrawal))
        .route("/withdrawals/:id/reject", post(routes::admin::reject_withdrawal))
        .route("/job-withdrawals", get(routes::admin::list_job_withdrawals))
        .route(
            "/job-withdrawals/:id/approve",
            post(routes::admin::approve_job_withdrawal),
        )
        .route(
            "/job-withdrawals/:id/reject",
            post(routes::admin::reject_job_withdrawal),
        )
        .route("/premium", get(routes::admin::list_premium_requests))
        .route("/premium/:id/approve", post(routes::admin::approve_premium))
        .route("/premium/:id/reject", post(routes::admin::reject_premium))
        .route("/tickets", get(routes::admin::list_tickets))
        .route("/tickets/:id/close", post(routes::admin::close_ticket))
        .route("/settings", put(routes::admin::update_settings))
        .route("/ledger/verify", get(routes::admin::verify_ledger))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            admin_auth_layer,
        ));

    let v1_routes = Router::new()
        .route("/settings", get(routes::settings::get_settings))
        .nest("/auth", auth_routes)
        .nest("/admin", admin_routes)
        .merge(member_routes);

    // Configure CORS based on environment
    let cors = if state.config.allows_any_origin() {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Member authentication layer
///
/// Accepts user tokens only and re-checks the account on every request, so
/// blocking a member takes effect before their token expires.
async fn user_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = authenticate(req.headers(), state.jwt_secret())?;
    if auth.role != Role::User {
        return Err(ApiError::Forbidden("Member token required".to_string()));
    }

    state
        .store
        .active_profile(auth.subject)
        .await
        .map_err(|err| match err {
            StoreError::NotFound(_) => ApiError::Unauthorized("Unknown account".to_string()),
            other => other.into(),
        })?;

    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}

/// Administrator authentication layer
async fn admin_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth: AuthContext = authenticate(req.headers(), state.jwt_secret())?;
    if !auth.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}
