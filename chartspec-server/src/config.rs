//! Server configuration

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use chartspec::catalog::Catalog;
use clap::Parser;
use rustls::pki_types::CertificateDer;

/// Chart spec server
#[derive(Parser, Clone, Debug)]
#[command(name = "chartspec-server")]
#[command(about = "Serves Vega-Lite chart specs built from query or form parameters")]
pub struct Config {
    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Path to static files directory
    #[arg(long, default_value = "chartspec-server/static")]
    pub static_dir: String,

    /// TLS certificate path (PEM format)
    #[arg(long)]
    pub tls_cert: Option<String>,

    /// TLS private key path (PEM format)
    #[arg(long)]
    pub tls_key: Option<String>,

    /// Chart height in pixels
    #[arg(long, default_value = "300")]
    pub chart_height: u32,

    /// Data URL written into every spec; pass an empty string to omit it
    #[arg(long, default_value = "/api/data.json")]
    pub data_url: Option<String>,

    /// Reject unknown chart types, data types and aggregate functions
    /// instead of passing them through
    #[arg(long)]
    pub strict: bool,
}

impl Config {
    /// Catalog to install process-wide at startup
    pub fn catalog(&self) -> Catalog {
        Catalog::new().with_height(self.chart_height)
    }
}

/// Load TLS configuration from cert and key files
pub fn load_tls_config(cert_path: &str, key_path: &str) -> anyhow::Result<RustlsConfig> {
    let cert_file = File::open(cert_path)?;
    let key_file = File::open(key_path)?;

    let mut cert_reader = BufReader::new(cert_file);
    let mut key_reader = BufReader::new(key_file);

    let certs: Vec<CertificateDer<'static>> =
        rustls_pemfile::certs(&mut cert_reader).collect::<Result<Vec<_>, _>>()?;

    let key = rustls_pemfile::private_key(&mut key_reader)?
        .ok_or_else(|| anyhow::anyhow!("No private key found in {}", key_path))?;

    let config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;

    Ok(RustlsConfig::from_config(Arc::new(config)))
}
