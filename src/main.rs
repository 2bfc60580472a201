use clap::Parser;
use quickrag::cli::handlers::handle_ask_command;
use quickrag::cli::handlers::handle_config_command;
use quickrag::cli::handlers::handle_seed_command;
use quickrag::cli::Cli;
use quickrag::cli::Commands;
use quickrag::config::AppConfig;
use quickrag::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env is optional
    dotenvy::dotenv().ok();

    // Load configuration
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(backend) = cli.backend {
        config.rag.backend = backend;
    }

    // Initialize logging
    quickrag::logging::init_logging(&config.logging, cli.verbose)?;
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.subcommand() {
        Commands::Ask { question } => handle_ask_command(&config, question).await?,
        Commands::Seed => handle_seed_command(&config).await?,
        Commands::Config => handle_config_command(&config)?,
    }

    Ok(())
}
