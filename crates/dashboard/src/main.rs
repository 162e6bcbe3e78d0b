//! House price dashboard binary

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use house_price_core::ArtifactStore;
use house_price_dashboard::config::LoggingConfig;
use house_price_dashboard::{load_artifacts, scaffold, start_server, AppState, DashboardConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "house-price-dashboard")]
#[command(about = "California house price prediction dashboard")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the dashboard (default)
    Serve(ServeArgs),
    /// Create the project directory layout and .gitignore
    Scaffold {
        /// Project root
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding the model, scaler and feature_info artifacts
    #[arg(long)]
    artifacts_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(args).await,
        Command::Scaffold { root } => {
            init_logging(&LoggingConfig::default());
            scaffold(&root)?;
            println!("{}", house_price_dashboard::scaffold::NEXT_STEPS);
            Ok(())
        }
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let mut config = DashboardConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.artifacts_dir {
        config.artifacts.dir = dir;
    }

    init_logging(&config.logging);
    info!("Starting house price dashboard v{}", env!("CARGO_PKG_VERSION"));

    let store = ArtifactStore::new(config.artifacts.clone());
    load_artifacts(&store)?;

    start_server(AppState::new(store), &config.server.bind_addr()).await
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
