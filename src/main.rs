use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use transformbot::connector::tui;
use transformbot::{AppConfig, Commands, Container, GatewayMode, GatewayState, Router, Service};

#[derive(Parser)]
#[command(name = "transformbot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use the offline generator and demo index instead of OpenAI and Algolia
    #[arg(long, global = true)]
    mock: bool,

    /// Read configuration from this env file instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<String>,

    /// JSON array of records for the offline index (with --mock)
    #[arg(long, global = true, requires = "mock")]
    records: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_logging(level, &cli.command)?;

    let mut config = match cli.env_file.as_deref() {
        Some(path) => AppConfig::from_env_file(path, cli.mock)?,
        None => AppConfig::from_env(cli.mock)?,
    };
    config.records_file = cli.records;

    match cli.command {
        Commands::Serve { port } => {
            config.ensure(&[Service::Generation])?;
            let port = port.unwrap_or(config.port);
            let container = Container::new(config)?;
            let state = GatewayState::new(container.complete_use_case()?);
            transformbot::connector::serve(state, port).await?;
        }

        Commands::Chat { embedded, .. } => {
            let mode = if embedded {
                config.ensure(&[Service::Search, Service::Generation])?;
                GatewayMode::Embedded
            } else {
                config.ensure(&[Service::Search])?;
                GatewayMode::Remote
            };
            let container = Container::new(config)?;
            if mode == GatewayMode::Remote {
                info!("Using completion gateway at {}", container.gateway_url());
            }
            let conversation = Arc::new(container.conversation_use_case(mode)?);
            let lookup = Arc::new(container.lookup_use_case()?);
            tui::run(conversation, lookup).await?;
        }

        command => {
            let required = match &command {
                Commands::Suggest { .. } => Service::Search,
                _ => Service::Generation,
            };
            config.ensure(&[required])?;
            let container = Container::new(config)?;
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{output}");
        }
    }

    Ok(())
}

/// The chat owns the terminal, so it only logs to a file when asked to.
fn init_logging(level: Level, command: &Commands) -> Result<()> {
    match command {
        Commands::Chat { log_file, .. } => match log_file {
            Some(path) => {
                let file = open_log_file(path)?;
                let subscriber = FmtSubscriber::builder()
                    .with_max_level(level)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .finish();
                tracing::subscriber::set_global_default(subscriber)?;
            }
            None => {}
        },
        _ => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_target(false)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))
}
