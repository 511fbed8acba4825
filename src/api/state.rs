//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::ApiConfig;
use crate::data::{DataProvider, DataResult, NotificationCenter};
use crate::registration::Submitter;
use crate::session::{SessionConfig, SessionRegistry};

/// How often expired sessions are swept from the registry
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Source of patients, appointments, notifications and stats
    pub provider: Arc<dyn DataProvider>,
    /// Open idle-session monitors
    pub sessions: Arc<SessionRegistry>,
    /// Notification list, seeded from the provider
    pub notifications: Arc<RwLock<NotificationCenter>>,
    /// Where validated registrations are sent
    pub submitter: Arc<dyn Submitter>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state, loading the initial notification list from `provider`
    ///
    /// Also starts the background sweep of expired sessions.
    pub async fn new(
        provider: Arc<dyn DataProvider>,
        submitter: Arc<dyn Submitter>,
        session_config: SessionConfig,
        config: ApiConfig,
    ) -> DataResult<Self> {
        let notifications = provider.notifications().await?;

        let sessions = Arc::new(SessionRegistry::new(session_config));
        Arc::clone(&sessions).start_reaper(SESSION_SWEEP_INTERVAL);

        Ok(Self {
            provider,
            sessions,
            notifications: Arc::new(RwLock::new(NotificationCenter::new(notifications))),
            submitter,
            config: Arc::new(config),
            start_time: Instant::now(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
