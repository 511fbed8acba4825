//! Tracked user-activity signals and session notices

use serde::{Deserialize, Serialize};

/// Input events that count as user activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    PointerDown,
    PointerMove,
    KeyPress,
    Scroll,
    TouchStart,
    Click,
}

impl ActivityKind {
    /// Every tracked kind, in listener registration order
    pub fn all() -> &'static [ActivityKind] {
        &[
            ActivityKind::PointerDown,
            ActivityKind::PointerMove,
            ActivityKind::KeyPress,
            ActivityKind::Scroll,
            ActivityKind::TouchStart,
            ActivityKind::Click,
        ]
    }

    /// DOM event name the page shell binds for this kind
    pub fn dom_event(&self) -> &'static str {
        match self {
            ActivityKind::PointerDown => "mousedown",
            ActivityKind::PointerMove => "mousemove",
            ActivityKind::KeyPress => "keypress",
            ActivityKind::Scroll => "scroll",
            ActivityKind::TouchStart => "touchstart",
            ActivityKind::Click => "click",
        }
    }

    /// Map a DOM event name back to a tracked kind
    pub fn from_dom_event(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.dom_event() == name)
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryCause {
    /// Countdown reached zero
    Timeout,
    /// User chose "log out now" or the caller forced it
    Forced,
}

/// Notices published by a session monitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new countdown cycle began
    Started { timeout_secs: u64 },
    /// Activity or an explicit extension reset the countdown
    Extended { timeout_secs: u64 },
    /// The "session expiring" notice should be shown
    Warning { remaining_secs: u64 },
    /// The session is over; block the UI until re-authentication
    Expired { cause: ExpiryCause },
}

/// Callbacks invoked by the surrounding page shell
///
/// Both hooks run on the ticker task (or the caller of `expire_now`), so
/// implementations should return quickly.
pub trait SessionHooks: Send + Sync {
    fn on_warning(&self, _remaining_secs: u64) {}

    fn on_expired(&self, _cause: ExpiryCause) {}
}

/// Hooks that do nothing
pub struct NoopHooks;

impl SessionHooks for NoopHooks {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_event_mapping() {
        for kind in ActivityKind::all() {
            assert_eq!(ActivityKind::from_dom_event(kind.dom_event()), Some(*kind));
        }
        assert_eq!(ActivityKind::from_dom_event("resize"), None);
    }

    #[test]
    fn test_event_serialization() {
        let event = SessionEvent::Warning { remaining_secs: 300 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"warning","remaining_secs":300}"#);

        let event = SessionEvent::Expired {
            cause: ExpiryCause::Timeout,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"expired","cause":"timeout"}"#);
    }
}
