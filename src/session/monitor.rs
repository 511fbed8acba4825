//! Idle-Session Monitor
//!
//! Owns a [`SessionState`] and the ticker task that counts it down. The
//! ticker is aborted on restart, on [`SessionMonitor::shutdown`] and when the
//! monitor is dropped, so a torn-down monitor never touches stale state.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::activity::{ActivityKind, ExpiryCause, NoopHooks, SessionEvent, SessionHooks};
use super::state::{SessionConfig, SessionSnapshot, SessionState};

/// Capacity of the per-session event channel
const EVENT_CAPACITY: usize = 32;

/// Tracks user activity and enforces the idle timeout for one session
pub struct SessionMonitor {
    config: SessionConfig,
    state: Arc<Mutex<SessionState>>,
    events: broadcast::Sender<SessionEvent>,
    hooks: Arc<dyn SessionHooks>,
    ticker: std::sync::Mutex<Option<JoinHandle<()>>>,
    expired_at: Arc<std::sync::Mutex<Option<Instant>>>,
}

impl SessionMonitor {
    /// Start monitoring with no hooks attached
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: SessionConfig) -> Self {
        Self::start_with_hooks(config, Arc::new(NoopHooks))
    }

    /// Start monitoring, invoking `hooks` on warning and expiry
    pub fn start_with_hooks(config: SessionConfig, hooks: Arc<dyn SessionHooks>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let monitor = Self {
            config,
            state: Arc::new(Mutex::new(SessionState::new(&config))),
            events,
            hooks,
            ticker: std::sync::Mutex::new(None),
            expired_at: Arc::new(std::sync::Mutex::new(None)),
        };

        tracing::debug!(
            timeout_minutes = config.timeout_minutes(),
            warning_minutes = config.warning_minutes(),
            "Session monitor started"
        );
        monitor.publish(SessionEvent::Started {
            timeout_secs: config.timeout_secs(),
        });
        monitor.spawn_ticker();
        monitor
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Receive every notice published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Current countdown view
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.lock().await.snapshot()
    }

    /// How long ago the session expired, or `None` while it is live
    pub fn expired_for(&self) -> Option<Duration> {
        let expired_at = *self.expired_at.lock().unwrap_or_else(|e| e.into_inner());
        expired_at.map(|at| at.elapsed())
    }

    /// Reset the countdown after a tracked input event
    ///
    /// Returns `false` once the session has expired.
    pub async fn on_user_activity(&self, kind: ActivityKind) -> bool {
        let mut state = self.state.lock().await;
        let was_warning = state.warning_shown();
        let applied = state.register_activity();
        drop(state);

        if applied {
            tracing::trace!(activity = ?kind, "Session activity");
            if was_warning {
                self.publish(SessionEvent::Extended {
                    timeout_secs: self.config.timeout_secs(),
                });
            }
        }
        applied
    }

    /// "Stay logged in" from the warning notice
    pub async fn extend_session(&self) -> bool {
        let applied = self.state.lock().await.register_activity();

        if applied {
            tracing::info!("Session extended");
            self.publish(SessionEvent::Extended {
                timeout_secs: self.config.timeout_secs(),
            });
        }
        applied
    }

    /// Expire immediately, bypassing the countdown
    pub async fn expire_now(&self) -> bool {
        let applied = self.state.lock().await.expire();

        if applied {
            self.abort_ticker();
            mark_expired(&self.expired_at);
            tracing::info!("Session expired on request");
            self.hooks.on_expired(ExpiryCause::Forced);
            self.publish(SessionEvent::Expired {
                cause: ExpiryCause::Forced,
            });
        }
        applied
    }

    /// Begin a fresh countdown cycle, e.g. after re-authentication
    pub async fn restart(&self) {
        self.state.lock().await.restart();
        *self.expired_at.lock().unwrap_or_else(|e| e.into_inner()) = None;

        tracing::info!("Session restarted");
        self.publish(SessionEvent::Started {
            timeout_secs: self.config.timeout_secs(),
        });
        self.spawn_ticker();
    }

    /// Stop the ticker. The state is left as-is.
    pub fn shutdown(&self) {
        self.abort_ticker();
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn spawn_ticker(&self) {
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let hooks = Arc::clone(&self.hooks);
        let expired_at = Arc::clone(&self.expired_at);
        let period = self.config.tick_period();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);

            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let outcome = state.lock().await.tick();
                let Some(outcome) = outcome else {
                    break;
                };

                if outcome.warning_raised {
                    tracing::info!(
                        remaining_secs = outcome.remaining_secs,
                        "Session expiring soon"
                    );
                    hooks.on_warning(outcome.remaining_secs);
                    let _ = events.send(SessionEvent::Warning {
                        remaining_secs: outcome.remaining_secs,
                    });
                }

                if outcome.expired {
                    mark_expired(&expired_at);
                    tracing::info!("Session expired after inactivity");
                    hooks.on_expired(ExpiryCause::Timeout);
                    let _ = events.send(SessionEvent::Expired {
                        cause: ExpiryCause::Timeout,
                    });
                    break;
                }
            }
        });

        let mut slot = self.ticker.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    fn abort_ticker(&self) {
        let mut slot = self.ticker.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

fn mark_expired(slot: &std::sync::Mutex<Option<Instant>>) {
    *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
}

impl Drop for SessionMonitor {
    fn drop(&mut self) {
        self.abort_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionPhase;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHooks {
        warnings: AtomicUsize,
        expiries: AtomicUsize,
    }

    impl SessionHooks for CountingHooks {
        fn on_warning(&self, _remaining_secs: u64) {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }

        fn on_expired(&self, _cause: ExpiryCause) {
            self.expiries.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Sleep until half a second past `secs` ticks after `start`
    async fn wait_until(start: tokio::time::Instant, secs: u64) {
        tokio::time::sleep_until(start + Duration::from_millis(secs * 1000 + 500)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_warning_raised_at_threshold() {
        let hooks = Arc::new(CountingHooks::default());
        let monitor =
            SessionMonitor::start_with_hooks(SessionConfig::new(20, 5).unwrap(), hooks.clone());
        let mut rx = monitor.subscribe();
        let start = tokio::time::Instant::now();

        wait_until(start, 899).await;
        assert_eq!(monitor.snapshot().await.phase, SessionPhase::Active);

        wait_until(start, 900).await;
        let snapshot = monitor.snapshot().await;
        assert_eq!(snapshot.phase, SessionPhase::Warning);
        assert_eq!(snapshot.time_remaining_secs, 300);
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::Warning { remaining_secs: 300 });

        // Warning does not freeze the clock or re-fire
        wait_until(start, 960).await;
        assert_eq!(monitor.snapshot().await.time_remaining_secs, 240);
        assert_eq!(hooks.warnings.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_inactivity() {
        let hooks = Arc::new(CountingHooks::default());
        let monitor =
            SessionMonitor::start_with_hooks(SessionConfig::new(2, 1).unwrap(), hooks.clone());
        let mut rx = monitor.subscribe();
        let start = tokio::time::Instant::now();

        wait_until(start, 120).await;

        let snapshot = monitor.snapshot().await;
        assert_eq!(snapshot.phase, SessionPhase::Expired);
        assert_eq!(snapshot.time_remaining_secs, 0);
        assert_eq!(hooks.expiries.load(Ordering::SeqCst), 1);

        assert!(matches!(rx.recv().await.unwrap(), SessionEvent::Warning { .. }));
        assert_eq!(
            rx.recv().await.unwrap(),
            SessionEvent::Expired {
                cause: ExpiryCause::Timeout
            }
        );

        // Activity after expiry is ignored
        assert!(!monitor.on_user_activity(ActivityKind::Click).await);
        assert!(!monitor.extend_session().await);
        assert_eq!(monitor.snapshot().await.phase, SessionPhase::Expired);
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_resets_countdown() {
        let monitor = SessionMonitor::start(SessionConfig::new(20, 5).unwrap());
        let start = tokio::time::Instant::now();

        wait_until(start, 1000).await;
        assert_eq!(monitor.snapshot().await.phase, SessionPhase::Warning);

        assert!(monitor.on_user_activity(ActivityKind::PointerMove).await);
        let snapshot = monitor.snapshot().await;
        assert_eq!(snapshot.phase, SessionPhase::Active);
        assert_eq!(snapshot.time_remaining_secs, 1200);

        wait_until(start, 1010).await;
        assert_eq!(monitor.snapshot().await.time_remaining_secs, 1190);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expire_now_and_restart() {
        let hooks = Arc::new(CountingHooks::default());
        let monitor =
            SessionMonitor::start_with_hooks(SessionConfig::new(20, 5).unwrap(), hooks.clone());

        assert!(monitor.expire_now().await);
        assert!(!monitor.expire_now().await);
        assert_eq!(monitor.snapshot().await.phase, SessionPhase::Expired);
        assert_eq!(hooks.expiries.load(Ordering::SeqCst), 1);

        monitor.restart().await;
        let start = tokio::time::Instant::now();
        wait_until(start, 5).await;
        let snapshot = monitor.snapshot().await;
        assert_eq!(snapshot.phase, SessionPhase::Active);
        assert_eq!(snapshot.time_remaining_secs, 1195);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_for_tracks_expiry_time() {
        let monitor = SessionMonitor::start(SessionConfig::new(1, 0).unwrap());
        let start = tokio::time::Instant::now();
        assert_eq!(monitor.expired_for(), None);

        // Times out at 60s
        wait_until(start, 90).await;
        let since = monitor.expired_for().unwrap();
        assert!(since >= Duration::from_secs(30) && since < Duration::from_secs(31));

        monitor.restart().await;
        assert_eq!(monitor.expired_for(), None);

        monitor.expire_now().await;
        assert_eq!(monitor.expired_for(), Some(Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_ticker() {
        let hooks = Arc::new(CountingHooks::default());
        let monitor =
            SessionMonitor::start_with_hooks(SessionConfig::new(1, 0).unwrap(), hooks.clone());

        let start = tokio::time::Instant::now();
        drop(monitor);
        wait_until(start, 120).await;

        assert_eq!(hooks.warnings.load(Ordering::SeqCst), 0);
        assert_eq!(hooks.expiries.load(Ordering::SeqCst), 0);
    }
}
