//! tictactoe-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use tictactoe_gateway::api;
use tictactoe_gateway::app_state::AppState;
use tictactoe_gateway::config::GatewayConfig;
use tictactoe_gateway::persistence::{PostgresPersistence, spawn_event_recorder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(addr = %config.listen_addr, "starting tictactoe-gateway");

    let app_state = AppState::from_config(&config);

    // Optional durable record
    let _recorder = if config.persistence_enabled {
        let persistence = PostgresPersistence::connect(&config)
            .await
            .context("connecting to PostgreSQL")?;
        persistence
            .run_migrations()
            .await
            .context("running migrations")?;
        tracing::info!("persistence enabled, recording events");
        Some(spawn_event_recorder(
            app_state.event_bus.subscribe(),
            persistence,
        ))
    } else {
        None
    };

    let app = api::build_app(app_state, &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
