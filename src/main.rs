use crate::app_config::AppConfig;
use crate::domain::content_store::ContentStore;
use crate::index::RedisIndex;
use crate::ipfs::IpfsNode;
use crate::metadata_manager::MetadataManager;
use crate::readiness::wait_until_ready;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod app_config;
mod domain;
mod index;
mod ipfs;
mod metadata_manager;
mod readiness;
#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let index = wait_until_ready("Redis", config.startup(), || RedisIndex::connect(config.redis().url())).await?;
    info!("✅  Connected to the collection index");

    let ipfs_node = IpfsNode::new(ipfs::new_client(&config)?, config.ipfs().url());
    wait_until_ready("IPFS", config.startup(), || ipfs_node.ping()).await?;
    info!("✅  Connected to IPFS");

    let manager = Arc::new(MetadataManager::new(Arc::new(index), Arc::new(ipfs_node), config.redis().database()));
    let app = api::router(manager);

    let listener = TcpListener::bind(config.server().address()).await?;
    info!("🔥 {} is up and running on {}", env!("CARGO_PKG_NAME"), listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down...");
        })
        .await?;

    Ok(())
}
