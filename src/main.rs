use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aeroguard::api::AqiClient;
use aeroguard::config::AeroGuardConfig;
use aeroguard::sources::SourceChain;
use aeroguard::web::{self, AppState};
use aeroguard::{cache, uploads};

fn init_tracing(config: &AeroGuardConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Expand a leading `~` in the configured cache path.
fn resolve_cache_path(location: &str) -> PathBuf {
    if let Some(rest) = location.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(location)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AeroGuardConfig::load()?;
    init_tracing(&config);
    info!("Starting AeroGuard v{}", aeroguard::VERSION);

    let cache_path = resolve_cache_path(&config.cache.location);
    cache::init(&cache_path)?;
    info!("Cache initialized at {}", cache_path.display());

    let cache_ttl = Duration::from_secs(u64::from(config.cache.ttl_minutes) * 60);

    match uploads::consume_uploads(&PathBuf::from(&config.server.uploads_dir), cache_ttl).await {
        Ok(summary) if summary.consumed > 0 || summary.skipped > 0 => {
            info!(
                "Uploads: {} consumed, {} skipped",
                summary.consumed, summary.skipped
            );
        }
        Ok(_) => {}
        Err(e) => warn!("Upload consumption failed: {e}"),
    }

    let client = AqiClient::new(&config.upstream)?;
    let chain = SourceChain::standard(client, cache_ttl);

    let state = Arc::new(AppState { chain, config });
    web::run(state).await
}
