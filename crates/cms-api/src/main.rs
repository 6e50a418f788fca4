//! `cms` binary: serves the contact API or manages its configuration.

use anyhow::Context;
use clap::Parser;
use cms_api::cli::{Cli, Command};
use cms_api::config_handlers::handle_config_command;
use cms_api::logging::init_logging;
use cms_api::{ApiConfig, Server};
use cms_service::ContactService;
use cms_storage::open_store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Config { action }) => {
            handle_config_command(cli.config.as_deref(), action)?;
            Ok(())
        }
        Some(Command::Serve) | None => serve(cli).await,
    }
}

async fn serve(cli: Cli) -> anyhow::Result<()> {
    let mut config = ApiConfig::load(cli.config.as_deref()).context("loading configuration")?;
    cli.serve.apply_to(&mut config);
    init_logging(&config.logging.filter);

    tracing::debug!(
        backend = ?config.database.backend,
        url = %config.database.url,
        "Opening contact store"
    );
    let store = open_store(&config.database)
        .await
        .context("opening contact store")?;
    let service = ContactService::new(store);

    Server::new(config, service).run().await?;
    Ok(())
}
