//! Fake implementations of the external services used by the website, for
//! local development and integration tests.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

pub mod api;
pub mod emailjs;
pub mod recaptcha;

/// Serve `router` on `host:port` until the process is stopped.
pub async fn start_server(host: IpAddr, port: u16, router: Router<()>) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

/// Serve `router` on a random local port in a background task and return the
/// bound address.
pub async fn spawn(router: Router<()>) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind to a local port")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(addr)
}
