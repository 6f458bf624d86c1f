//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, background workers and the Axum
//! server lifecycle including graceful shutdown.

use crate::application::workers::{run_cache_sweeper, run_expiry_sweeper, run_idle_reclaimer};
use crate::config::Config;
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::cache::HotCache;
use crate::infrastructure::persistence::PgShortLinkRepository;
use crate::infrastructure::rate_limit::ClientRateLimiter;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::oneshot;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Hot cache and per-client rate limiter
/// - Expiry sweeper, cache sweeper and idle-client reclaimer
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the listener stops accepting and in-flight requests get
/// [`Config::shutdown_grace`] to finish. Background workers are not drained.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let repository: Arc<dyn ShortLinkRepository> = Arc::new(PgShortLinkRepository::new(
        Arc::new(pool),
        config.store_timeout(),
    ));
    let cache = Arc::new(HotCache::new());
    let rate_limiter = Arc::new(ClientRateLimiter::new(config.rate_limit_policy()?));

    tokio::spawn(run_expiry_sweeper(
        repository.clone(),
        config.expiry_sweep_interval(),
    ));
    tokio::spawn(run_cache_sweeper(cache.clone(), config.cache_clear_interval()));
    tokio::spawn(run_idle_reclaimer(
        rate_limiter.clone(),
        config.rate_limit_sweep_interval(),
    ));
    tracing::info!("Background workers started");

    let state = AppState::new(
        repository,
        cache,
        rate_limiter,
        config.link_policy(),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    let (stop_tx, stop_rx) = oneshot::channel();
    let server = axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = stop_tx.send(());
    })
    .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        _ = stop_rx => drain(server, config.shutdown_grace()).await?,
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout)))
        .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime)))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Waits for in-flight requests, giving up after `grace`.
async fn drain<F>(server: F, grace: Duration) -> Result<()>
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    tracing::info!("Shutdown signal received, draining for up to {:?}", grace);

    match tokio::time::timeout(grace, server).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            tracing::warn!(
                "Grace period of {:?} elapsed with requests in flight, exiting",
                grace
            );
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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
