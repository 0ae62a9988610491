#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::sync::Arc;

use anyhow::Result;
use axum::Extension;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::config::Config;
use crate::identity::HeaderIdentity;
use crate::identity::SharedIdentityProvider;
use crate::storage::Memory;
use crate::storage::Storage;

mod api;
mod config;
mod graceful_shutdown;
mod identity;
mod notes;
mod storage;
#[cfg(test)]
mod tests;

const DEFAULT_RUST_LOG: &str = "pocket_notes=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let config = Config::from_env()?;

    serve(&config, CancellationToken::new()).await
}

/// Serve the notes API until a shutdown is requested
///
/// The storage only lives for the duration of this call
///
/// # Errors
///
/// Will return `Err` if the address can not be bound or the server fails
pub async fn serve(config: &Config, shutdown: CancellationToken) -> Result<()> {
    let storage = storage::setup();
    let app = create_router(config, storage.clone());

    let listener = TcpListener::bind(config.address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler(shutdown))
        .await?;

    tracing::info!("Discarding {} notes", storage.count_notes().await);

    Ok(())
}

/// Create the router for the notes API
fn create_router(config: &Config, storage: Memory) -> Router {
    let identity_provider: SharedIdentityProvider =
        Arc::new(HeaderIdentity::new(config.identity_header.clone()));

    router::<Memory>().layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(config.allowed_origins.cors_layer())
            .layer(Extension(storage))
            .layer(Extension(identity_provider)),
    )
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}
