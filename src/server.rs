//! HTTP server startup.
//!
//! [`serve`] opens the database, builds the shared state and router, and runs
//! until Ctrl-C.

use anyhow::{Context, Result};

use crate::api;
use crate::auth::JwtAuth;
use crate::config::MemoriaConfig;
use crate::db;
use crate::state::AppState;

/// Open the configured database and build the state shared by all handlers.
pub fn setup_state(config: &MemoriaConfig) -> Result<AppState> {
    anyhow::ensure!(!config.auth.jwt_secret.is_empty(), "auth.jwt_secret must not be empty");

    let db_path = config.resolved_db_path();
    let conn = db::open_database(&db_path)?;
    tracing::info!(db = %db_path.display(), "database ready");

    Ok(AppState::new(conn, JwtAuth::new(&config.auth.jwt_secret)))
}

/// Start the HTTP API and block until shutdown.
pub async fn serve(mut config: MemoriaConfig) -> Result<()> {
    if config.ensure_jwt_secret() {
        tracing::warn!(
            "no auth.jwt_secret configured; using a random secret, tokens will not survive a restart"
        );
    }

    let bind_addr = config.bind_addr();
    let state = setup_state(&config)?;
    let router = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "memoria listening at http://{bind_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down HTTP server");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_state_requires_a_secret() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = MemoriaConfig::default();
        config.storage.db_path = dir.path().join("memories.db").to_string_lossy().into_owned();

        assert!(setup_state(&config).is_err());

        config.ensure_jwt_secret();
        assert!(setup_state(&config).is_ok());
    }
}
