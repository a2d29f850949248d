//! Common test utilities for integration tests
//!
//! Each [`TestContext`] owns a fresh seeded store on an in-memory snapshot
//! backend, so tests are independent and need no external services.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use taskwallet_api::app::{build_router, AppState};
use taskwallet_api::config::{AdminConfig, ApiConfig, Config, JwtConfig, LogFormat, StoreConfig};
use taskwallet_shared::store::{MemorySnapshotStore, Store};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const ADMIN_PHONE: &str = "01772209016";
pub const ADMIN_PASSWORD: &str = "123456";

/// Seeded member with a FREE account and 120 in the free wallet
pub const FREE_PHONE: &str = "01700000000";
/// Seeded PREMIUM member, upline USER01
pub const PRO_PHONE: &str = "01800000000";
pub const SEED_PASSWORD: &str = "123456";

pub struct TestContext {
    pub app: Router,
    pub config: Config,
    pub snapshots: Arc<MemorySnapshotStore>,
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
        },
        store: StoreConfig {
            data_path: PathBuf::from("unused.json"),
            ephemeral: true,
        },
        admin: AdminConfig {
            phone: ADMIN_PHONE.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        },
        log_format: LogFormat::Pretty,
    }
}

impl TestContext {
    pub async fn new() -> Self {
        let snapshots = Arc::new(MemorySnapshotStore::new());
        let store = Store::open(snapshots.clone()).await.unwrap();
        let config = test_config();
        let state = AppState::new(store, config.clone()).unwrap();

        TestContext {
            app: build_router(state),
            config,
            snapshots,
        }
    }

    /// Sends a request and returns the status with the parsed JSON body
    /// (`Value::Null` for empty bodies)
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, token, Some(body)).await
    }

    /// Logs in a member and returns the access token
    pub async fn login(&self, phone: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/v1/auth/login",
                None,
                serde_json::json!({ "phone": phone, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .post(
                "/v1/auth/admin/login",
                None,
                serde_json::json!({ "phone": ADMIN_PHONE, "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }
}
