//! EHR Dashboard API Server
//!
//! Run with: cargo run --bin ehr-api
//!
//! # Configuration
//!
//! Read from the first config file found (see `ehr-cli config`), then
//! overridden by environment variables:
//! - `EHR_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `EHR_API_PORT`: Port to listen on (default: 8086)
//! - `EHR_SESSION_TIMEOUT_MINUTES`: Idle timeout (default: 20)
//! - `EHR_SESSION_WARNING_MINUTES`: Warning lead time (default: 5)
//! - `EHR_SUBMIT_DELAY_MS`: Simulated submit latency (default: 2000)
//! - `EHR_LOG_LEVEL`, `EHR_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Overrides the log filter entirely

use ehr_dashboard::api::{serve, AppState};
use ehr_dashboard::config::{Config, LoggingConfig};
use ehr_dashboard::data::MockDataProvider;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_tracing(&config.logging);

    tracing::info!("Starting EHR dashboard API server v{}", env!("CARGO_PKG_VERSION"));

    let session_config = config.session.to_session_config()?;
    tracing::info!(
        timeout_minutes = session_config.timeout_minutes(),
        warning_minutes = session_config.warning_minutes(),
        "Session policy"
    );
    tracing::info!(
        submit_delay_ms = config.registration.submit_delay_ms,
        "Using simulated registration backend"
    );

    let state = AppState::new(
        Arc::new(MockDataProvider::new()),
        Arc::new(config.registration.submitter()),
        session_config,
        config.api.clone(),
    )
    .await?;

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("EHR dashboard API server stopped");
    Ok(())
}

/// Install the global subscriber, pretty or JSON per config
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("ehr_dashboard={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
