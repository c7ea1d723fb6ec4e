//! Contacts gateway binary.
//!
//! Loads `CONTACTS_CONFIG` (default `contacts.yaml`), builds the application
//! state, and serves until the process is stopped. Any startup error is
//! logged and turns into a non-zero exit code.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use contacts_core::error::{ContactsError, Result};
use contacts_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "contacts-gateway stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::var(config::CONFIG_PATH_ENV)
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());

    let cfg = config::load_from_file(&path)?;
    let listen = cfg.gateway.listen_addr()?;

    let state = AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "contacts-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ContactsError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ContactsError::Internal(format!("server failed: {e}")))
}
