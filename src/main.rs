use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ftask_admin::cli::{run_command, Cli};
use ftask_admin::client::{ApiClient, StderrNotifier};
use ftask_admin::config::Config;
use ftask_admin::session::FileSessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(&cli.config)?;
    if let Some(api_url) = &cli.api_url {
        config.api.base_url = api_url.clone();
    }

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("ftask-admin v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(FileSessionStore::new(config.session.data_dir.clone()));
    let client = ApiClient::new(&config, store, Arc::new(StderrNotifier))?;
    client.set_view(cli.command.view_path());

    run_command(&cli, &client).await
}
