//! Session countdown state
//!
//! Pure state transitions for the idle-session monitor. Nothing here touches
//! a clock or a runtime; [`SessionMonitor`](super::SessionMonitor) drives
//! [`SessionState::tick`] once per tick interval.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::SessionError;

/// Longest accepted idle timeout: one day
pub const MAX_TIMEOUT_MINUTES: u64 = 24 * 60;

/// Shortest tick period the monitor will run with
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Configuration for one monitored session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    timeout_minutes: u64,
    warning_minutes: u64,
    tick_interval: Duration,
}

impl SessionConfig {
    /// Create a validated session configuration
    ///
    /// The timeout must be between one minute and [`MAX_TIMEOUT_MINUTES`],
    /// and the warning window must be strictly shorter than the timeout.
    pub fn new(timeout_minutes: u64, warning_minutes: u64) -> Result<Self, SessionError> {
        if timeout_minutes == 0 {
            return Err(SessionError::InvalidConfig(
                "timeout must be at least one minute".to_string(),
            ));
        }
        if timeout_minutes > MAX_TIMEOUT_MINUTES {
            return Err(SessionError::InvalidConfig(format!(
                "timeout ({} min) exceeds the {} minute maximum",
                timeout_minutes, MAX_TIMEOUT_MINUTES
            )));
        }
        if warning_minutes >= timeout_minutes {
            return Err(SessionError::InvalidConfig(format!(
                "warning ({} min) must be shorter than timeout ({} min)",
                warning_minutes, timeout_minutes
            )));
        }

        Ok(Self {
            timeout_minutes,
            warning_minutes,
            tick_interval: Duration::from_secs(1),
        })
    }

    /// Builder method: override the tick period (one second by default)
    ///
    /// Periods below one millisecond are raised to one millisecond.
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(MIN_TICK_INTERVAL);
        self
    }

    pub fn timeout_minutes(&self) -> u64 {
        self.timeout_minutes
    }

    pub fn warning_minutes(&self) -> u64 {
        self.warning_minutes
    }

    /// Full countdown length in seconds
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_minutes * 60
    }

    /// Remaining time at or below which the warning is raised
    pub fn warning_secs(&self) -> u64 {
        self.warning_minutes * 60
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: 20,
            warning_minutes: 5,
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Counting down, no warning raised yet
    Active,
    /// Counting down with the expiry warning showing
    Warning,
    /// Terminal until the session is started again
    Expired,
}

/// What a single tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Seconds left after the tick
    pub remaining_secs: u64,
    /// The warning threshold was crossed on this tick
    pub warning_raised: bool,
    /// The countdown reached zero on this tick
    pub expired: bool,
}

/// Countdown state for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    time_remaining_secs: u64,
    warning_shown: bool,
    is_active: bool,
    timeout_secs: u64,
    warning_secs: u64,
}

impl SessionState {
    /// Fresh, active session at the full timeout
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            time_remaining_secs: config.timeout_secs(),
            warning_shown: false,
            is_active: true,
            timeout_secs: config.timeout_secs(),
            warning_secs: config.warning_secs(),
        }
    }

    pub fn time_remaining_secs(&self) -> u64 {
        self.time_remaining_secs
    }

    pub fn warning_shown(&self) -> bool {
        self.warning_shown
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.is_active {
            SessionPhase::Expired
        } else if self.warning_shown {
            SessionPhase::Warning
        } else {
            SessionPhase::Active
        }
    }

    /// Advance the countdown by one second
    ///
    /// Returns `None` when the session has already expired.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.is_active {
            return None;
        }

        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);

        let mut warning_raised = false;
        if self.time_remaining_secs <= self.warning_secs && !self.warning_shown {
            self.warning_shown = true;
            warning_raised = true;
        }

        let expired = self.time_remaining_secs == 0;
        if expired {
            self.is_active = false;
        }

        Some(TickOutcome {
            remaining_secs: self.time_remaining_secs,
            warning_raised,
            expired,
        })
    }

    /// Reset to the full timeout after user activity
    ///
    /// Returns `false` (and changes nothing) once expired.
    pub fn register_activity(&mut self) -> bool {
        if !self.is_active {
            return false;
        }
        self.time_remaining_secs = self.timeout_secs;
        self.warning_shown = false;
        true
    }

    /// Force expiry. Returns `false` if the session was already expired.
    pub fn expire(&mut self) -> bool {
        if !self.is_active {
            return false;
        }
        self.is_active = false;
        true
    }

    /// Begin a new countdown cycle from scratch
    pub fn restart(&mut self) {
        self.time_remaining_secs = self.timeout_secs;
        self.warning_shown = false;
        self.is_active = true;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            time_remaining_secs: self.time_remaining_secs,
            warning_shown: self.warning_shown,
            is_active: self.is_active,
            display: format_remaining(self.time_remaining_secs),
        }
    }
}

/// Serializable view of a session for the page shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub time_remaining_secs: u64,
    pub warning_shown: bool,
    pub is_active: bool,
    /// Countdown badge text, `m:ss`
    pub display: String,
}

/// Format seconds as `m:ss` for the countdown badge
pub fn format_remaining(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(timeout: u64, warning: u64) -> SessionState {
        SessionState::new(&SessionConfig::new(timeout, warning).unwrap())
    }

    #[test]
    fn test_config_validation() {
        assert!(SessionConfig::new(0, 0).is_err());
        assert!(SessionConfig::new(5, 5).is_err());
        assert!(SessionConfig::new(5, 6).is_err());

        let config = SessionConfig::new(20, 5).unwrap();
        assert_eq!(config.timeout_secs(), 1200);
        assert_eq!(config.warning_secs(), 300);
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_config_rejects_oversized_timeout() {
        let config = SessionConfig::new(MAX_TIMEOUT_MINUTES, 5).unwrap();
        assert_eq!(config.timeout_secs(), 86_400);

        assert!(matches!(
            SessionConfig::new(MAX_TIMEOUT_MINUTES + 1, 5),
            Err(SessionError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::new(u64::MAX, 1),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_tick_interval_is_clamped() {
        let config = SessionConfig::default().tick_interval(Duration::ZERO);
        assert_eq!(config.tick_period(), Duration::from_millis(1));

        let config = SessionConfig::default().tick_interval(Duration::from_millis(250));
        assert_eq!(config.tick_period(), Duration::from_millis(250));
    }

    #[test]
    fn test_tick_decreases_by_one_until_expiry() {
        let mut s = state(2, 1);
        let mut previous = s.time_remaining_secs();

        for _ in 0..119 {
            let outcome = s.tick().unwrap();
            assert_eq!(outcome.remaining_secs, previous - 1);
            assert!(!outcome.expired);
            assert!(s.is_active());
            previous = outcome.remaining_secs;
        }

        let last = s.tick().unwrap();
        assert_eq!(last.remaining_secs, 0);
        assert!(last.expired);
        assert!(!s.is_active());
        assert_eq!(s.phase(), SessionPhase::Expired);

        // Stays expired
        assert_eq!(s.tick(), None);
        assert!(!s.register_activity());
        assert!(!s.is_active());
    }

    #[test]
    fn test_warning_fires_exactly_once_at_threshold() {
        let mut s = state(20, 5);
        let mut raised_at = Vec::new();

        while let Some(outcome) = s.tick() {
            if outcome.warning_raised {
                raised_at.push(outcome.remaining_secs);
            }
        }

        assert_eq!(raised_at, vec![300]);
    }

    #[test]
    fn test_activity_resets_regardless_of_remaining() {
        let mut s = state(20, 5);

        for _ in 0..1000 {
            s.tick();
        }
        assert_eq!(s.phase(), SessionPhase::Warning);

        assert!(s.register_activity());
        assert_eq!(s.time_remaining_secs(), 1200);
        assert!(!s.warning_shown());
        assert_eq!(s.phase(), SessionPhase::Active);

        // Bursts collapse to the same state
        s.register_activity();
        s.register_activity();
        assert_eq!(s.time_remaining_secs(), 1200);
    }

    #[test]
    fn test_warning_rearms_after_reset() {
        let mut s = state(10, 5);
        let mut warnings = 0;

        for _ in 0..301 {
            if s.tick().unwrap().warning_raised {
                warnings += 1;
            }
        }
        s.register_activity();
        for _ in 0..301 {
            if s.tick().unwrap().warning_raised {
                warnings += 1;
            }
        }

        assert_eq!(warnings, 2);
    }

    #[test]
    fn test_expire_now_and_restart() {
        let mut s = state(20, 5);
        assert!(s.expire());
        assert!(!s.expire());
        assert_eq!(s.phase(), SessionPhase::Expired);

        s.restart();
        assert_eq!(s.phase(), SessionPhase::Active);
        assert_eq!(s.time_remaining_secs(), 1200);
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(1200), "20:00");
        assert_eq!(format_remaining(299), "4:59");
        assert_eq!(format_remaining(5), "0:05");
        assert_eq!(format_remaining(0), "0:00");
    }

    #[test]
    fn test_snapshot_serialization() {
        let s = state(20, 5);
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["phase"], "active");
        assert_eq!(json["display"], "20:00");
    }
}
