//! Session Registry
//!
//! Keeps the monitors for every open dashboard session, keyed by id.
//! Removing a session tears its monitor down. Sessions that stay expired
//! longer than the grace period are evicted, so a client that never closes
//! its session does not hold an entry forever.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::error::{SessionError, SessionResult};
use super::monitor::SessionMonitor;
use super::state::SessionConfig;

/// How long an expired session stays available for "log in again"
pub const EXPIRED_GRACE: Duration = Duration::from_secs(15 * 60);

/// Open sessions by id
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<SessionMonitor>>>,
    default_config: SessionConfig,
    expired_grace: Duration,
}

impl SessionRegistry {
    pub fn new(default_config: SessionConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            default_config,
            expired_grace: EXPIRED_GRACE,
        }
    }

    /// Builder method: override how long expired sessions are kept
    pub fn with_expired_grace(mut self, grace: Duration) -> Self {
        self.expired_grace = grace;
        self
    }

    pub fn default_config(&self) -> SessionConfig {
        self.default_config
    }

    /// Open a session with the given (or default) configuration
    pub async fn open(&self, config: Option<SessionConfig>) -> (Uuid, Arc<SessionMonitor>) {
        self.sweep_expired().await;

        let id = Uuid::new_v4();
        let monitor = Arc::new(SessionMonitor::start(
            config.unwrap_or(self.default_config),
        ));

        self.sessions.write().await.insert(id, Arc::clone(&monitor));

        tracing::info!(session_id = %id, "Session opened");
        (id, monitor)
    }

    pub async fn get(&self, id: Uuid) -> SessionResult<Arc<SessionMonitor>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Close a session and cancel its ticker
    pub async fn close(&self, id: Uuid) -> SessionResult<()> {
        let monitor = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        // Other handles (e.g. an open event stream) may outlive the entry
        monitor.shutdown();

        tracing::info!(session_id = %id, "Session closed");
        Ok(())
    }

    /// Drop every session that has been expired for at least the grace period
    ///
    /// Returns the number of sessions evicted.
    pub async fn sweep_expired(&self) -> usize {
        let grace = self.expired_grace;
        let mut sessions = self.sessions.write().await;

        let stale: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, monitor)| monitor.expired_for().is_some_and(|since| since >= grace))
            .map(|(id, _)| *id)
            .collect();

        for id in &stale {
            if let Some(monitor) = sessions.remove(id) {
                monitor.shutdown();
                tracing::debug!(session_id = %id, "Expired session evicted");
            }
        }

        if !stale.is_empty() {
            tracing::info!(evicted = stale.len(), open = sessions.len(), "Swept expired sessions");
        }
        stale.len()
    }

    /// Start a background task that sweeps expired sessions every `period`
    ///
    /// The task holds only a weak reference and stops once the registry is
    /// dropped.
    pub fn start_reaper(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        let registry: Weak<Self> = Arc::downgrade(&self);
        drop(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);

            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let Some(registry) = registry.upgrade() else {
                    break;
                };
                registry.sweep_expired().await;
            }
        })
    }

    /// Number of open sessions, after evicting stale expired ones
    pub async fn len(&self) -> usize {
        self.sweep_expired().await;
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
