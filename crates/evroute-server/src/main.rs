//! EV route planner server

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use evroute_server::config::Config;
use evroute_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("evroute_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting EV route planner...");

    let config = Config::from_env();
    for (name, value) in [
        ("HERE_API_KEY", &config.here_api_key),
        ("ORS_API_KEY", &config.ors_api_key),
        ("CHARGETRIP_CLIENT_ID", &config.chargetrip_client_id),
        ("CHARGETRIP_APP_ID", &config.chargetrip_app_id),
    ] {
        if value.is_empty() {
            tracing::warn!("{} is not set; requests to that service will fail", name);
        }
    }

    let state = Arc::new(AppState::from_config(&config)?);
    let app = evroute_server::app(&config, state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
