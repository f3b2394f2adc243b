use crate::{
    auth::{CachedTeacherStore, FileTeacherStore, TeacherStore},
    config::{self, TeachersConfig},
    roster::{Roster, RosterMap},
};
use anyhow::{Context, Result};
use futures_util::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use std::net::SocketAddr;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{error, info};

pub mod api;
pub mod error;
pub mod metrics;
pub mod router;
pub mod state;
pub mod util;

use state::AppState;

pub(crate) async fn run() -> Result<()> {
    let config = config::load().context("Failed to load config")?;
    info!("App config: {:?}", config);

    let teacher_store = teacher_store(&config.teachers);
    let roster = RosterMap::new(Roster::seeded());
    let state = AppState::new(config.clone(), roster, teacher_store);

    let (shutdown_tx, shutdown_rx) = watch::channel(());

    let mut signals = Signals::new([SIGTERM, SIGINT]).context("Failed to register signals")?;
    let signals_handle = signals.handle();
    let signals_task = tokio::spawn(async move {
        if let Some(signal) = signals.next().await {
            info!(signal, "Received signal, shutting down");
        }
        let _ = shutdown_tx.send(());
    });

    let metrics_server = config
        .metrics_listener_address
        .map(|addr| run_metrics_server(addr, shutdown_rx.clone()));

    info!("Server is starting...");

    axum::Server::try_bind(&config.listener_address)
        .with_context(|| format!("Failed to bind to {}", config.listener_address))?
        .serve(router::router(state).into_make_service())
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx))
        .await
        .context("Server failed")?;

    if let Some(metrics_server) = metrics_server {
        if let Err(e) = metrics_server.await {
            error!(error = %e, "Metrics server task failed");
        }
    }

    signals_handle.close();
    signals_task.await.context("Signals task failed")?;

    info!("Server stopped");

    Ok(())
}

fn teacher_store(config: &TeachersConfig) -> Box<dyn TeacherStore> {
    let store = FileTeacherStore::new(&config.path);

    match config.cache_ttl {
        Some(ttl) => Box::new(CachedTeacherStore::new(store, ttl)),
        None => Box::new(store),
    }
}

fn run_metrics_server(addr: SocketAddr, shutdown_rx: watch::Receiver<()>) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Metrics server is starting on {}", addr);

        let server = match axum::Server::try_bind(&addr) {
            Ok(builder) => builder.serve(router::metrics_router().into_make_service()),
            Err(e) => {
                error!(error = %e, "Failed to bind metrics server to {}", addr);
                return;
            }
        };

        if let Err(e) = server
            .with_graceful_shutdown(wait_for_shutdown(shutdown_rx))
            .await
        {
            error!(error = %e, "Metrics server failed");
        }
    })
}

async fn wait_for_shutdown(mut shutdown_rx: watch::Receiver<()>) {
    // Sender dropped also means shutdown.
    let _ = shutdown_rx.changed().await;
}
