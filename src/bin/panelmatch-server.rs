//! Interview panel matcher HTTP server binary

use panelmatch::{AppConfig, EmbeddingProvider, HashEmbeddingProvider, HttpEmbeddingProvider, PanelMatcher};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod server {
    pub use panelmatch::server::*;
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    info!("PanelMatch interview panel matcher v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env();

    // Check for --use-real flag
    let use_real = std::env::args().any(|arg| arg == "--use-real");

    let embedder: Arc<dyn EmbeddingProvider> = if use_real {
        info!("Mode: REAL embeddings ({} via {})", config.embedding_model, config.embedding_service_url);
        let provider = HttpEmbeddingProvider::new(&config.embedding_service_url, &config.embedding_model);

        // Test connection to embedding service
        match provider.health_check().await {
            Ok(true) => info!("Embedding service is healthy"),
            Ok(false) => warn!("Embedding service health check did not return success"),
            Err(e) => {
                error!("Failed to connect to embedding service: {}", e);
                return Err(e);
            }
        }
        Arc::new(provider)
    } else {
        info!("Mode: offline hashed embeddings (use --use-real to call the embedding service)");
        Arc::new(HashEmbeddingProvider::default())
    };

    let matcher = PanelMatcher::with_defaults(embedder);
    info!(
        "Panel matcher initialized: {} weighted fields, {} domains",
        matcher.weights().len(),
        matcher.domains().len()
    );

    server::run_server(matcher, config).await?;

    Ok(())
}
