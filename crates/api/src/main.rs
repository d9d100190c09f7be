use std::io;

use anyhow::Context;

use teller_api::app::{self, AppState};
use teller_ledger::Ledger;
use teller_storage::{JsonStore, StoreError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    teller_observability::init();

    let data_file =
        std::env::var("TELLER_DATA_FILE").unwrap_or_else(|_| "data.json".to_string());
    let addr = std::env::var("TELLER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let ledger = Ledger::new();
    let store = JsonStore::new(&data_file);

    // Resume from the previous snapshot when one exists.
    match store.load() {
        Ok(snapshot) => {
            ledger.restore(snapshot);
            tracing::info!(path = %data_file, "restored ledger from snapshot");
        }
        Err(StoreError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %data_file, "no snapshot found; starting empty");
        }
        Err(err) => {
            tracing::warn!(path = %data_file, error = %err, "snapshot unreadable; starting empty");
        }
    }

    let state = AppState::new(ledger, Some(store));
    let app = app::build_app(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // Final snapshot so state survives the shutdown.
    state.persist();
    tracing::info!("shut down");
    Ok(())
}

/// Resolves on SIGINT (ctrl-c) or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
