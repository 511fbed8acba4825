//! EHR Dashboard REST API
//!
//! HTTP API layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Patients
//! - `GET /api/v1/patients` - List patients (`?search=&status=`)
//! - `GET /api/v1/patients/:id` - Patient detail
//! - `GET /api/v1/appointments` - Today's appointments
//! - `GET /api/v1/dashboard/stats` - Stats cards
//!
//! ## Notifications
//! - `GET /api/v1/notifications` - List (`?filter=all|unread|critical|starred`)
//! - `POST /api/v1/notifications/:id/read` - Mark read
//! - `POST /api/v1/notifications/:id/star` - Toggle star
//! - `DELETE /api/v1/notifications/:id` - Delete
//! - `POST /api/v1/notifications/read-all` - Mark all read
//!
//! ## Registration
//! - `POST /api/v1/registration/validate` - Validate one field
//! - `POST /api/v1/registration` - Submit a registration
//!
//! ## Sessions
//! - `POST /api/v1/sessions` - Open an idle-session monitor
//! - `GET /api/v1/sessions/:id` - Countdown state
//! - `POST /api/v1/sessions/:id/{activity,extend,expire,restart}`
//! - `DELETE /api/v1/sessions/:id` - Close
//! - `GET /api/v1/sessions/:id/ws` - Event stream
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use ehr_dashboard::api::{serve, AppState};
//! use ehr_dashboard::config::Config;
//! use ehr_dashboard::data::MockDataProvider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let state = AppState::new(
//!         Arc::new(MockDataProvider::new()),
//!         Arc::new(config.registration.submitter()),
//!         config.session.to_session_config()?,
//!         config.api.clone(),
//!     )
//!     .await?;
//!
//!     serve(state, &config.api).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use crate::config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Patient routes
        .route("/patients", get(routes::patients::list_patients))
        .route("/patients/:id", get(routes::patients::get_patient))
        .route("/appointments", get(routes::appointments::list_appointments))
        .route("/dashboard/stats", get(routes::dashboard::dashboard_stats))
        // Notification routes
        .route("/notifications", get(routes::notifications::list_notifications))
        .route(
            "/notifications/read-all",
            post(routes::notifications::mark_all_read),
        )
        .route(
            "/notifications/:id",
            delete(routes::notifications::delete_notification),
        )
        .route("/notifications/:id/read", post(routes::notifications::mark_read))
        .route("/notifications/:id/star", post(routes::notifications::toggle_star))
        // Registration routes
        .route("/registration", post(routes::registration::submit))
        .route("/registration/validate", post(routes::registration::validate))
        // Session routes
        .route("/sessions", post(routes::sessions::create_session))
        .route("/sessions/:id", get(routes::sessions::get_session))
        .route("/sessions/:id", delete(routes::sessions::close_session))
        .route("/sessions/:id/activity", post(routes::sessions::record_activity))
        .route("/sessions/:id/extend", post(routes::sessions::extend_session))
        .route("/sessions/:id/expire", post(routes::sessions::expire_session))
        .route("/sessions/:id/restart", post(routes::sessions::restart_session))
        .route("/sessions/:id/ws", get(routes::sessions::session_stream));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("EHR dashboard API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("EHR dashboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
