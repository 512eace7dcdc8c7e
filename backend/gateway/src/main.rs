//! `folio` — portfolio backend server.
//!
//! Reads a YAML config file (default `folio.yaml`); the session signing
//! secret is normally injected via `${FOLIO_SESSION_SECRET}`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use folio_config::{load_and_validate, redact, FolioConfig};
use folio_core::{AccessGate, CredentialVerifier};
use folio_gateway::{start_server, GatewayState};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio — portfolio backend with a request authorization gate")]
#[command(version)]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, default_value = "folio.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Validate the config file and print it (secrets redacted)
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, report) = load_and_validate(&cli.config).await?;

    // Initialize structured logging; RUST_LOG wins over the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    match cli.command {
        Commands::Serve { port } => {
            for warning in &report.warnings {
                warn!(path = %warning.path, message = %warning.message, "Config warning");
            }
            for err in &report.errors {
                error!(path = %err.path, message = %err.message, "Config error");
            }
            if !report.is_valid() {
                bail!(
                    "Config has {} validation error(s); refusing to serve",
                    report.errors.len()
                );
            }

            let mut config = config;
            if let Some(port) = port {
                config.gateway.port = port;
            }
            run_server(config).await
        }
        Commands::CheckConfig => {
            let value = serde_json::to_value(&config).context("Failed to serialize config")?;
            println!("{}", serde_yaml::to_string(&redact(&value))?);

            for warning in &report.warnings {
                println!("warning: {warning}");
            }
            for err in &report.errors {
                println!("error: {err}");
            }
            if !report.is_valid() {
                bail!("Config has {} validation error(s)", report.errors.len());
            }
            println!("Config OK");
            Ok(())
        }
    }
}

async fn run_server(config: FolioConfig) -> Result<()> {
    // Startup-fatal: an empty secret must never reach the verifier.
    let verifier = CredentialVerifier::from_secret(config.gate.session.signing_secret.as_bytes())
        .context("Failed to build credential verifier")?;

    let gate = AccessGate::new(
        config.gate.route_table(),
        verifier,
        config.gate.admin_policy(),
        config.gate.login_path.clone(),
        config.gate.unauthorized_path.clone(),
    );

    info!(
        routes = config.gate.routes.len(),
        default_tier = ?config.gate.default_tier,
        "Access gate configured"
    );

    let state = GatewayState {
        gate: Arc::new(gate),
        cookie_name: config.gate.session.cookie_name.clone(),
    };

    let addr: SocketAddr = format!("{}:{}", config.gateway.host, config.gateway.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.gateway.host, config.gateway.port
            )
        })?;

    start_server(addr, state).await
}
