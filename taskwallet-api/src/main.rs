//! # TaskWallet API Server
//!
//! Loads configuration, opens the store (restoring the last snapshot or
//! seeding demo data) and serves the HTTP API until Ctrl-C or SIGTERM.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=$(openssl rand -hex 32) cargo run -p taskwallet-api
//! ```

use std::sync::Arc;

use taskwallet_api::{
    app::{build_router, AppState},
    config::{Config, LogFormat},
};
use taskwallet_shared::store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    tracing::info!(
        "TaskWallet API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let snapshots: Arc<dyn SnapshotStore> = if config.store.ephemeral {
        tracing::warn!("STORE_EPHEMERAL is set, data will not survive a restart");
        Arc::new(MemorySnapshotStore::new())
    } else {
        Arc::new(FileSnapshotStore::new(&config.store.data_path))
    };
    let store = Store::open(snapshots).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(store, config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "taskwallet_api=debug,taskwallet_shared=info,tower_http=debug".into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
