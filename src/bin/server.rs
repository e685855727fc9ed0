//! docqa server binary

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docqa::{AppConfig, AppServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docqa=info,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "docqa.toml".to_string());
    let config = AppConfig::load(&config_path)?;

    tracing::info!(
        "Starting docqa v{} on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.server.host,
        config.server.port
    );
    tracing::info!(
        "Chunking: size={} overlap={} context_chunks={}",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap,
        config.chunking.max_context_chunks
    );

    let server = AppServer::new(config)?;
    server.start().await?;

    Ok(())
}
