use tracing::info;
use tracing_subscriber::EnvFilter;

use concierge::{Config, Server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    let mut server = Server::start(config).await?;
    info!(addr = %server.addr(), "listening");

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    server.shutdown()?;

    Ok(())
}
