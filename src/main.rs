use clap::Parser;
use gesture_drive::AppConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gesture-drive")]
#[command(about = "Turn hand gestures in camera frames into RC vehicle commands")]
struct Cli {
    /// Path to config.toml
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Config load failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = gesture_drive::run(config).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
