use crate::components::event_store;
use crate::config::Config;
use crate::error::Error;
use crate::handlers::{self, AppState};
use crate::service::EventService;
use crate::shutdown;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Config(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Open the event store, serve HTTP until a shutdown signal, then close the store
pub async fn start_server(config: Config) -> miette::Result<()> {
    let store = event_store::open(&config.database_path)?;
    let events = EventService::new(Arc::new(store));

    let app = handlers::app(AppState::new(events.clone()), &config.static_dir);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(Error::from)?;
    info!(
        "Listening on http://{} (static files from {})",
        addr,
        config.static_dir.display()
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .map_err(Error::from);

    // Close the store even if the server failed
    if let Err(e) = events.shutdown().await {
        error!("Error shutting down event store: {:?}", e);
    } else {
        info!("Event store closed");
    }

    served?;
    Ok(())
}
