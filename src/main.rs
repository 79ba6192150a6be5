use std::sync::Arc;
use tokio::net::TcpListener;
use json_fetcher::{
    config::Config,
    api::routes::create_router,
    fetcher::Fetcher,
    store::PgRecordStore,
    telemetry,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;
    telemetry::init(config.mode);

    // Schema must exist before the listener is bound
    let store = PgRecordStore::connect(&config.database).await.inspect_err(|e| {
        tracing::error!(error = %e, "failed to initialise record store");
    })?;

    let app_state = AppState {
        store: Arc::new(store.clone()),
        fetcher: Fetcher::new()?,
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind(config.server_addr).await?;
    tracing::info!(addr = %config.server_addr, mode = ?config.mode, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down server");
    store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
