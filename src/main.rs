use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_blocks::application::lifecycle::BlockLifecycle;
use payment_blocks::config::Config;
use payment_blocks::domain::ports::BlockStoreBox;
use payment_blocks::infrastructure::in_memory::InMemoryBlockStore;
use payment_blocks::interfaces::http;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config);

    let store = open_store(&config)?;
    let lifecycle = Arc::new(BlockLifecycle::new(store));
    let app = http::router(lifecycle, &config.cors());

    let listener = TcpListener::bind(config.listen).await.into_diagnostic()?;
    info!("Payment block API listening on {}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down...");
        })
        .await
        .into_diagnostic()?;

    info!("Payment block API shut down gracefully");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(config: &Config) -> Result<BlockStoreBox> {
    use payment_blocks::infrastructure::rocksdb::RocksDBStore;

    if let Some(db_path) = &config.db_path {
        // Use persistent storage (RocksDB)
        let store = RocksDBStore::open(db_path).into_diagnostic()?;
        info!("Using RocksDB storage at {}", db_path.display());
        return Ok(Box::new(store));
    }

    info!("Using in-memory storage");
    Ok(Box::new(InMemoryBlockStore::new()))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(config: &Config) -> Result<BlockStoreBox> {
    if config.db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    } else {
        info!("Using in-memory storage");
    }
    Ok(Box::new(InMemoryBlockStore::new()))
}
