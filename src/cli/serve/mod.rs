//! Serve command - runs the HTTP server until Ctrl+C or SIGTERM

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::time::{timeout_at, Instant};
use tracing::{error, info, warn};

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::logging;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let crate::App { state, pool } = crate::create_app(&config).await?;
    let app = create_router(state, Duration::from_secs(config.server.request_timeout_secs));

    let addr = build_socket_addr(&config)?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        name = %config.app.name,
        version = %config.app.version,
        "Server is running"
    );

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
    });

    let exited = tokio::select! {
        _ = shutdown_signal() => None,
        joined = &mut server => Some(joined),
    };

    // One budget covers draining requests and closing the pool
    let grace = Duration::from_secs(config.server.shutdown_grace_secs);
    let deadline = Instant::now() + grace;

    let result = match exited {
        None => {
            let _ = shutdown_tx.send(());

            match timeout_at(deadline, &mut server).await {
                Ok(joined) => joined?.map_err(anyhow::Error::from),
                Err(_) => {
                    warn!(grace_secs = grace.as_secs(), "In-flight requests did not finish in time");
                    server.abort();
                    Ok(())
                }
            }
        }
        Some(joined) => match joined? {
            Ok(()) => Err(anyhow::anyhow!("HTTP server stopped unexpectedly")),
            Err(e) => {
                error!(error = %e, "HTTP server failed");
                Err(e.into())
            }
        },
    };

    if let Some(pool) = pool {
        if finish_by(deadline, pool.close()).await {
            info!("Database pool closed");
        } else {
            warn!("Database pool did not close in time, dropping open connections");
        }
    }

    info!("Server shutdown complete");
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Drives `work` until `deadline`. Returns false if it was cut short.
/// Tasks still holding connections are cancelled when the runtime shuts down.
async fn finish_by<F>(deadline: Instant, work: F) -> bool
where
    F: Future<Output = ()>,
{
    timeout_at(deadline, work).await.is_ok()
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
