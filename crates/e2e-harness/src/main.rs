//! item-board-e2e - run board specs against a live API
//!
//! Usage:
//!   item-board-e2e                               # ./e2e.toml, or defaults
//!   item-board-e2e --config e2e/e2e.toml --api http://localhost:8000/api/v1
//!   RUST_LOG=debug item-board-e2e                # Step-level logging

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use e2e_harness::{HarnessConfig, Runner};
use item_board_core::HttpItemApi;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "item-board-e2e", version, about = "Run item board e2e specs")]
struct Cli {
    /// Harness config; its directory is the project root
    #[arg(long, short, default_value = "e2e.toml")]
    config: PathBuf,

    /// Override the API base (same meaning as the app's `api` parameter)
    #[arg(long)]
    api: Option<String>,

    /// Override the app base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the spec glob
    #[arg(long)]
    spec: Option<String>,

    /// Debug logging unless RUST_LOG is set
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn load_config(path: &Path) -> Result<HarnessConfig> {
    if path.exists() {
        HarnessConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
    } else {
        warn!("{} not found, using defaults", path.display());
        Ok(HarnessConfig::default())
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let mut config = load_config(&cli.config)?;
    if let Some(api) = cli.api {
        config.api = Some(api);
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(spec) = cli.spec {
        config.spec_pattern = spec;
    }

    let api_config = config.api_config()?;
    info!("API base: {}", api_config.base());

    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(!config.web_security)
        .build()
        .context("Failed to build HTTP client")?;

    let root = cli
        .config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let runner = Runner::new(config, root, move || {
        HttpItemApi::with_client(client.clone(), api_config.clone())
    });
    let summary = runner.run().await?;
    Ok(summary.success())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.debug) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}
