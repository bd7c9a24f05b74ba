//! Chart Spec Server
//!
//! Builds Vega-Lite chart specifications from request parameters and serves
//! them, together with a sample dataset and a small viewer page.

mod api;
mod config;
mod error;
mod models;

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "chartspec_server=debug,chartspec=debug,tower_http=debug".into()
            }),
        )
        .init();

    // Parse CLI args
    let config = Config::parse();
    info!("Starting chartspec-server on {}:{}", config.host, config.port);

    // Chart tables are read-only from here on
    chartspec::catalog::install(config.catalog())
        .map_err(|report| anyhow::anyhow!("{report:?}"))?;
    if config.strict {
        info!("Strict mode: unknown chart parameters are rejected");
    }

    let state = Arc::new(AppState {
        config: config.clone(),
    });
    let app = api::router(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);

    if let (Some(cert_path), Some(key_path)) = (&config.tls_cert, &config.tls_key) {
        // TLS enabled
        info!("TLS enabled with cert: {}", cert_path);
        let tls_config = config::load_tls_config(cert_path, key_path)?;
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        axum_server::from_tcp_rustls(listener.into_std()?, tls_config)
            .serve(app.into_make_service())
            .await?;
    } else {
        // Plain HTTP
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Listening on http://{}", addr);
        axum::serve(listener, app).await?;
    }

    Ok(())
}
