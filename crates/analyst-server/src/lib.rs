//! # Analyst Server
//!
//! HTTP front end of the data analyst agent.
//!
//! Exposes `POST /api/` for question documents uploaded as multipart, plus
//! `GET /health` and `GET /` metadata, and runs the axum server with
//! graceful shutdown.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod error;

pub use api::*;
pub use error::*;

use analyst_config::Config;
use analyst_engine::Analyst;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Builds the router for `config`.
pub fn build_app(config: Config) -> ServerResult<axum::Router> {
    let max_body_bytes = config.server.max_body_bytes;
    let analyst = Analyst::from_config(config)?;
    Ok(create_api_router(ApiState::new(analyst), max_body_bytes))
}

/// Serves until `shutdown` resolves.
pub async fn serve<F>(config: Config, shutdown: F) -> ServerResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = config.bind_address();
    let app = build_app(config)?;
    let listener = TcpListener::bind(&address).await?;
    info!(address = %listener.local_addr()?, "Data analyst agent listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {:?}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {:?}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Received shutdown signal, starting graceful shutdown");
}
