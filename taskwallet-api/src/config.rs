//! Configuration management for the API server
//!
//! Configuration comes from environment variables, with a `.env` file loaded
//! first when present.
//!
//! # Environment Variables
//!
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to bind to (default: 8080)
//! - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
//! - `JWT_SECRET`: Secret key for JWT signing (required, at least 32 chars)
//! - `DATA_PATH`: Snapshot file (default: data/taskwallet.json)
//! - `STORE_EPHEMERAL`: Keep snapshots in memory only (default: false)
//! - `ADMIN_PHONE` / `ADMIN_PASSWORD`: Administrator login
//!   (default: 01772209016 / 123456)
//! - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
//! - `RUST_LOG`: Log filter
//!
//! # Example
//!
//! ```no_run
//! use taskwallet_api::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Server will listen on {}", config.bind_address());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub jwt: JwtConfig,
    pub store: StoreConfig,
    pub admin: AdminConfig,
    pub log_format: LogFormat,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for JWT signing
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub secret: String,
}

/// Snapshot persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_path: PathBuf,

    /// When set, nothing is written to disk
    pub ephemeral: bool,
}

/// Administrator credential pair
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub phone: String,
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("phone", &self.phone)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or too short, or if a
    /// numeric or boolean variable does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let data_path = env::var("DATA_PATH").unwrap_or_else(|_| "data/taskwallet.json".to_string());
        let ephemeral = env::var("STORE_EPHEMERAL")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .map_err(|_| anyhow::anyhow!("STORE_EPHEMERAL must be true or false"))?;

        let admin_phone = env::var("ADMIN_PHONE").unwrap_or_else(|_| "01772209016".to_string());
        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "123456".to_string());

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") | Err(_) => LogFormat::Pretty,
            Ok(other) => anyhow::bail!("LOG_FORMAT must be pretty or json, got {}", other),
        };

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            jwt: JwtConfig { secret: jwt_secret },
            store: StoreConfig {
                data_path: PathBuf::from(data_path),
                ephemeral,
            },
            admin: AdminConfig {
                phone: admin_phone,
                password: admin_password,
            },
            log_format,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            store: StoreConfig {
                data_path: PathBuf::from("data/taskwallet.json"),
                ephemeral: true,
            },
            admin: AdminConfig {
                phone: "01772209016".to_string(),
                password: "123456".to_string(),
            },
            log_format: LogFormat::Pretty,
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example,,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(config().allows_any_origin());
    }

    #[test]
    fn test_admin_debug_masks_password() {
        let printed = format!("{:?}", config().admin);
        assert!(printed.contains("01772209016"));
        assert!(!printed.contains("123456"));
    }
}
