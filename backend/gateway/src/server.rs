//! Main HTTP Gateway Server.

use std::{future::Future, net::SocketAddr, time::Duration};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use thiserror::Error;
use tokio::{net::TcpListener, sync::watch};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, instrument, warn};

use crate::documents::upload_document;
use crate::eligibility_api::check_eligibility;
use crate::health_api::{get_health, service_status};
use crate::rate_limit::{RateLimiter, rate_limit_middleware};
use crate::settings::GatewaySettings;
use crate::state::GatewayState;

/// How long open connections may drain after a shutdown signal.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("listen host may not be empty")]
    EmptyHost,
    #[error("failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to determine local address: {source}")]
    LocalAddr {
        #[source]
        source: std::io::Error,
    },
    #[error("axum server error: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

/// Full application router with every layer applied.
pub fn build_router(state: GatewayState, settings: &GatewaySettings) -> Router {
    let limiter = RateLimiter::new(settings.rate_limit_max_requests, settings.rate_limit_window);

    let verification = Router::new()
        .route("/api/v1/upload-document", post(upload_document))
        .route("/api/v1/check-eligibility", post(check_eligibility))
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));

    Router::new()
        .route("/", get(service_status))
        .route("/api/health", get(get_health))
        .merge(verification)
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(GlobalConcurrencyLimitLayer::new(
            settings.max_concurrent_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind, serve until Ctrl+C or SIGTERM, then drain for up to ten seconds.
#[instrument(skip_all, fields(host = %settings.host, port = settings.port))]
pub async fn serve(settings: GatewaySettings, state: GatewayState) -> Result<(), ServerError> {
    let listener = bind_listener(&settings.host, settings.port).await?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| ServerError::LocalAddr { source })?;
    info!(%local_addr, "UnivAegis gateway listening");

    let app = build_router(state, &settings);
    serve_until(listener, app, async {
        let signal = shutdown_signal().await;
        info!(signal, "Shutdown signal received; draining connections");
    })
    .await
}

/// Serve `app` until `shutdown` resolves. Connections still open
/// [`DRAIN_TIMEOUT`] later are dropped.
pub async fn serve_until<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stopping_tx, mut stopping_rx) = watch::channel(false);
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown.await;
        let _ = stopping_tx.send(true);
    });

    let drain_deadline = async move {
        let stopping = stopping_rx.wait_for(|stopping| *stopping).await.is_ok();
        if !stopping {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(DRAIN_TIMEOUT).await;
    };

    tokio::select! {
        result = server => result.map_err(|source| ServerError::Serve { source })?,
        _ = drain_deadline => {
            warn!(seconds = DRAIN_TIMEOUT.as_secs(), "Drain timed out; dropping open connections");
        }
    }
    info!("Gateway stopped");
    Ok(())
}

async fn bind_listener(host: &str, port: u16) -> Result<TcpListener, ServerError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ServerError::EmptyHost);
    }
    TcpListener::bind((host, port))
        .await
        .map_err(|source| ServerError::Bind {
            address: format!("{host}:{port}"),
            source,
        })
}

/// Resolves on Ctrl+C or SIGTERM with the signal's name.
async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(error) => {
                warn!(%error, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "ctrl_c",
        _ = terminate => "sigterm",
    }
}
