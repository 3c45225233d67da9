use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use imsyakiyah_server::cache::{Cache, FileStore, MemoryStore};
use imsyakiyah_server::config::{CacheBackend, ServerConfig};
use imsyakiyah_server::resolve::RegionStore;
use imsyakiyah_server::upstream::{KemenagClient, KemenagConfig, Upstream};
use imsyakiyah_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("imsyakiyah_server=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Create upstream client
    let client_config = KemenagConfig::new()
        .with_base_url(&config.upstream_url)
        .with_timeout(config.upstream_timeout_secs);
    let upstream: Arc<dyn Upstream> = Arc::new(KemenagClient::new(client_config)?);

    // Load states (fail fast if neither the file nor the site is available)
    let regions = RegionStore::load_or_bootstrap(&config.states_file, upstream.as_ref()).await?;
    info!(
        count = regions.len(),
        path = %config.states_file.display(),
        "Loaded states"
    );

    let cache = match config.cache_backend {
        CacheBackend::File => Cache::new(FileStore::new(&config.data_dir)),
        CacheBackend::Memory => Cache::new(MemoryStore::new(config.cache_capacity)),
    };

    let state = AppState::new(regions, cache, upstream);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, backend = ?config.cache_backend, "Imsyakiyah server listening");
    info!("  GET /state?search=");
    info!("  GET /city?stateId=&search=");
    info!("  GET /imsyakiyah?stateId=&cityId=&year=&date=");

    axum::serve(listener, app).await?;
    Ok(())
}
