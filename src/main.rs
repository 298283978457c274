use std::net::SocketAddr;

use coinwire::{AppState, config, routes};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coinwire=info,tower_http=info")),
        )
        .init();

    let settings = match config::load() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let addr = SocketAddr::from((settings.host, settings.port));

    tracing::info!(
        poll_secs = settings.alert_poll_interval.as_secs(),
        cache_capacity = settings.conversion_cache_capacity,
        cache_ttl_secs = settings.conversion_cache_ttl.as_secs(),
        "settings loaded"
    );

    let state = AppState::from_settings(settings).expect("Failed to build HTTP client");
    let app = routes::app(state.clone());

    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .expect("server error");
}

async fn shutdown_signal(state: AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("shutting down, cancelling alert monitors");
    state.alerts.cancel_all().await;
}
