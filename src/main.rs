use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tinylink::config::{self, Config};
use tinylink::server;
use tracing_subscriber::EnvFilter;

/// Minimal in-memory URL shortener.
#[derive(Parser)]
#[command(name = "tinylink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dotenv file loaded before reading the environment (ignored if absent)
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_file_loaded = dotenvy::from_path(&cli.env_file).is_ok();

    let config = config::load_from_env()?;
    init_tracing(&config);

    if env_file_loaded {
        tracing::info!("Loaded environment from {}", cli.env_file.display());
    }
    config.print_summary();

    server::run(config).await
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
