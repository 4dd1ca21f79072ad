use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use voxel_relay::config::RelayArgs;
use voxel_relay::relay::router::build_router;
use voxel_relay::relay::store::{MemoryTaskStore, TaskStore};
use voxel_relay::relay::submit::{SubmitMode, Submitter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayArgs::parse().into_config()?;

    tracing::info!("Submission mode: {}", config.mode.name());
    match &config.mode {
        SubmitMode::Blocking {
            poll_interval,
            deadline,
        } => tracing::info!(
            "Blocking submissions check every {:?}, give up after {:?}",
            poll_interval,
            deadline
        ),
        SubmitMode::Forward { url, timeout } => {
            tracing::info!("Forwarding questions to {} (timeout {:?})", url, timeout)
        }
        SubmitMode::FireAndForget => {}
    }

    // 1. Task store (process memory only):
    let store: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());

    // 2. Submission:
    let submitter = Arc::new(Submitter::new(store.clone(), config.mode.clone()));

    // 3. HTTP Router:
    let app = build_router(store.clone(), submitter);

    // 4. Spawn stats reporter:
    if let Some(stats_interval) = config.stats_interval {
        let stats_store = store.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(stats_interval);

            loop {
                interval.tick().await;
                let stats = stats_store.stats();
                tracing::info!(
                    "Queue stats: {} pending, {} unclaimed results, oldest pending {:?} ms",
                    stats.pending,
                    stats.unclaimed_results,
                    stats.oldest_pending_age_ms
                );
            }
        });
    }

    // 5. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let stats = store.stats();
    if stats.pending > 0 || stats.unclaimed_results > 0 {
        tracing::warn!(
            "Discarding {} pending tasks and {} unclaimed results",
            stats.pending,
            stats.unclaimed_results
        );
    }
    tracing::info!("Relay stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
