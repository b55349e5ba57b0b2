use relabs::cli::{parse_args, run_cli_command};
use relabs::startup::ForumConfig;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,relabs=debug"));

    let use_json = std::env::var("RELABS_LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    // stdout carries command output, logs go to stderr
    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| eyre!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| eyre!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let command = parse_args(std::env::args())?;
    let config = ForumConfig::from_env();
    tracing::debug!(?command, "Running command");

    run_cli_command(command, &config).await
}
