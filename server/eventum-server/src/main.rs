use std::sync::Arc;

use anyhow::Result;
use document_store::MemoryStore;
use eventum_server::{create_app, EventumServer, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let addr = config.bind_addr();
    let server = EventumServer::new(config, Arc::new(MemoryStore::new()));
    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "eventum server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
