use clap::Parser;
use lavender_core::GeminiClient;
use lavender_gateway::auth::Authenticator;
use lavender_gateway::config::AppConfig;
use lavender_gateway::http_server::{self, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gateway-daemon", about = "Prompt gateway for Lavender Lab")]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gemini API key
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Gemini model to use
    #[arg(short = 'o', long)]
    model: Option<String>,

    /// HTTP server address
    #[arg(long)]
    http_addr: Option<SocketAddr>,

    /// Require a bearer token on /generate
    #[arg(long)]
    require_auth: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present, RUST_LOG included
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load config from file or use defaults
    let loaded = match &args.config {
        Some(config_path) => AppConfig::load_from_file(config_path)
            .map(|cfg| (cfg, config_path.display().to_string())),
        None => AppConfig::load_from_default().map(|cfg| (cfg, "default location".to_string())),
    };
    let mut config = match loaded {
        Ok((cfg, source)) => {
            info!("Loaded configuration from {}", source);
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(anyhow::anyhow!("Configuration error: {}", e));
        }
    };

    // Environment first, then CLI args
    config.apply_env();
    if let Some(api_key) = args.api_key {
        config.gemini.api_key = Some(api_key);
    }
    if let Some(model) = args.model {
        config.gemini.model_name = Some(model);
    }
    if let Some(addr) = args.http_addr {
        config.http_addr = addr;
    }
    if args.require_auth {
        config.auth.enabled = true;
    }

    let gemini_client = GeminiClient::new(config.gemini.clone());
    if gemini_client.has_api_key() {
        info!(model = %config.gemini.model_name(), "Initialized Gemini client");
    } else {
        warn!("GEMINI_API_KEY is not set; /generate will answer with a configuration error");
    }

    let authenticator = match Authenticator::from_config(&config.auth) {
        Ok(authenticator) => authenticator,
        Err(e) => {
            error!(error = %e, "Failed to initialize authentication");
            return Err(anyhow::anyhow!("Failed to initialize authentication: {}", e));
        }
    };
    info!(enabled = authenticator.is_some(), "Bearer token authentication");

    let state = AppState::new(gemini_client, authenticator);
    if let Err(e) = http_server::run_server(state, config.http_addr).await {
        error!(error = %e, "HTTP server failed");
        return Err(e);
    }

    info!("Gateway shutting down");
    Ok(())
}
