use std::path::PathBuf;

use clap::Parser;
use docgen_core::AppConfig;
use docgen_server::logging::init_logging;
use docgen_server::{run_server, AppState};

#[derive(Parser, Debug, Clone)]
#[command(name = "docgen-server")]
#[command(about = "HTTP server that documents pasted functions behind a policy gate")]
#[command(version)]
struct Cli {
    /// Enable debug mode
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(long, env = "PORT", default_value = "7860")]
    port: u16,

    /// Policy file or directory (overrides DOCGEN_POLICY_PATH)
    #[arg(long)]
    policy_path: Option<PathBuf>,

    /// Model name (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = AppConfig::load();
    if let Some(policy_path) = cli.policy_path {
        config.policy_path = policy_path;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    log::info!("Starting docgen server on {}:{}", cli.host, cli.port);
    log::info!("  Policy: {}", config.policy_path.display());
    log::info!("  Model: {}", config.model);

    let state = AppState::from_config(&config).map_err(|e| {
        log::error!("Failed to load policy configuration: {}", e);
        e
    })?;

    run_server(&cli.host, cli.port, state).await?;
    Ok(())
}
