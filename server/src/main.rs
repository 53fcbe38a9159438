use anyhow::Context;
use ride_share_data_management::DataManager;
use server::{config::Config, server_state::ServerState};
use std::{fs::OpenOptions, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", config.log_dir))?;
    let log_file = config.log_dir.join("server.log");

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to open log file {log_file:?}"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("{}=debug,ride_share_data_management=debug", env!("CARGO_CRATE_NAME")).into())
        )
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file))
        .init();

    tracing::info!("Starting server...");

    let data_manager = DataManager::start(&config.store, config.matching)
        .await
        .context("Failed to open the document store")?;

    let server_state = Arc::new(ServerState {
        data_manager: data_manager.clone(),
        landing: config.landing.clone(),
    });

    let app = server::app(server_state, &config.static_dir);

    let listener = TcpListener::bind(SocketAddr::from((config.host, config.port)))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("Server is running on {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    data_manager.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutting down..."),
        Err(err) => {
            // Without a signal handler the server just runs until killed
            tracing::error!("Failed to listen for shutdown signal: {err}");
            std::future::pending::<()>().await;
        }
    }
}
