use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use relief_server::clock::SystemClock;
use relief_server::config::AppConfig;
use relief_server::directory::StationDirectory;
use relief_server::engine::Engine;
use relief_server::guidance::ChatGuidanceClient;
use relief_server::stations::{
    CachedStationSource, LineResolver, ResolverConfig, StationCacheConfig, StationClient,
};
use relief_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // The catalog is compiled in; failing here means a broken build.
    let directory = match StationDirectory::embedded() {
        Ok(directory) => Arc::new(directory),
        Err(e) => {
            error!(error = %e, "failed to load station catalog");
            return ExitCode::FAILURE;
        }
    };
    info!(
        lines = directory.lines().len(),
        stations = directory.len(),
        "loaded station catalog"
    );

    // Live station data is optional; without a key every line comes from the catalog.
    let source = match config.station_client().map(StationClient::new) {
        Some(Ok(client)) => Some(CachedStationSource::new(
            client,
            &StationCacheConfig::default(),
        )),
        Some(Err(e)) => {
            warn!(error = %e, "station client unavailable, using catalog only");
            None
        }
        None => {
            warn!("ODPT_CONSUMER_KEY not set, using catalog only");
            None
        }
    };

    let generator = match config.guidance().map(ChatGuidanceClient::new) {
        Some(Ok(client)) => Some(client),
        Some(Err(e)) => {
            warn!(error = %e, "guidance client unavailable, composing plans locally");
            None
        }
        None => {
            info!("GUIDANCE_API_KEY not set, composing plans locally");
            None
        }
    };

    let resolver = LineResolver::new(directory.clone(), source, ResolverConfig::default());
    let engine = Engine::new(directory, resolver, generator, Arc::new(SystemClock));
    let app = create_router(AppState::new(engine));

    let addr = config.bind_addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!(%addr, "station relief finder listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
