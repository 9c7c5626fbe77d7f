use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shift_roster::api::{create_router, AppState};
use shift_roster::config::{ConfigLoader, LoggingConfig, RosterConfig};
use shift_roster::db::Store;
use shift_roster::error::RosterResult;

/// REST backend for employees and their work shifts.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// YAML configuration file; defaults apply when omitted.
    #[arg(short, long, env = "ROSTER_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind, overriding the configuration file.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the configuration file.
    #[arg(short, long)]
    port: Option<u16>,

    /// Database URL, overriding the configuration file.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

impl Cli {
    fn into_config(self) -> RosterResult<RosterConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load(path)?.into_config(),
            None => RosterConfig::default(),
        };

        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        Ok(config)
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> RosterResult<()> {
    dotenvy::dotenv().ok();
    let config = Cli::parse().into_config()?;
    init_tracing(&config.logging);

    let store = Store::connect(&config.database).await?;
    let router = create_router(AppState::new(store));

    let address = config.server.bind_address();
    let listener = TcpListener::bind(address.as_str()).await?;
    info!(address = %address, "Shift roster listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
