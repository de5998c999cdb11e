use anyhow::Context;
use clap::Parser;
use colored::*;
use lavender_cli::app;
use lavender_cli::cli::{Args, Command};
use lavender_cli::config::CliConfig;
use lavender_cli::gateway_client::GatewayClient;
use lavender_cli::logging;
use lavender_history::FileKeyValueStore;
use std::process::ExitCode;

/// Main function - Builds the workspace and runs one command
#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env before clap reads them
    dotenvy::dotenv().ok();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("{}", format!("Error: {:#}", e).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => CliConfig::load_from_file(path),
        None => CliConfig::load_from_default(),
    }
    .context("Failed to load configuration")?;

    logging::init(config.log_level.as_deref(), args.verbose);

    let gateway_url = args.gateway_url.unwrap_or(config.gateway_url);
    let token = args.token.or(config.token);
    let gateway = GatewayClient::new(gateway_url, token);

    if let Command::Health = args.command {
        return app::run_health(&gateway).await;
    }

    let history_path = match args.history_path.or(config.history_path) {
        Some(path) => path,
        None => FileKeyValueStore::default_path()?,
    };
    let workspace = app::build_workspace(gateway, history_path);

    match args.command {
        Command::Generate(generate) => app::run_generate(&workspace, generate).await,
        Command::History { action } => app::run_history(&workspace, action).await,
        Command::Health => Ok(()),
    }
}
