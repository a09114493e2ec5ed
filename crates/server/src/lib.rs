pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

use crate::{
    config::{get_config, AppConfig},
    router::create_router,
    state::{build_app_state, AppState},
};
use chrono::Duration;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

/// Configures and runs the web server.
///
/// This function initializes the application state, starts the periodic
/// session sweeper, creates the router, and serves until shutdown.
pub async fn run(listener: TcpListener, config: AppConfig) -> anyhow::Result<()> {
    debug!(?config, "Server configuration loaded");

    let app_state = build_app_state(config).await?;
    spawn_session_sweeper(&app_state);
    let app = create_router(app_state);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically evicts conversations idle past the configured TTL. The
/// sweep itself lives in the store; only its scheduling belongs here.
fn spawn_session_sweeper(app_state: &AppState) {
    let store = app_state.store.clone();
    let max_age = Duration::hours(app_state.config.session_ttl_hours);
    let interval = std::time::Duration::from_secs(app_state.config.sweep_interval_secs);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so a fresh boot does
        // not sweep an empty map.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = store.sweep(max_age);
            if removed > 0 {
                info!(removed, "Swept idle conversations");
            }
        }
    });
}

/// The library's main entry point.
///
/// Sets up logging, configuration, and the TCP listener, then calls `run`.
pub async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = get_config(None)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    run(listener, config).await
}
