//! Notification Center
//!
//! The header dropdown's notification list: read/star/delete operations,
//! the filter tabs and the unread badge.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::types::Notification;

/// Filter tabs of the dropdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    /// Unread critical notifications
    Critical,
    Starred,
}

impl NotificationFilter {
    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            NotificationFilter::All => true,
            NotificationFilter::Unread => !notification.read,
            NotificationFilter::Critical => notification.is_urgent(),
            NotificationFilter::Starred => notification.starred,
        }
    }
}

impl FromStr for NotificationFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(NotificationFilter::All),
            "unread" => Ok(NotificationFilter::Unread),
            "critical" => Ok(NotificationFilter::Critical),
            "starred" => Ok(NotificationFilter::Starred),
            _ => Err(format!(
                "Invalid notification filter: {}. Use all, unread, critical or starred",
                s
            )),
        }
    }
}

/// Counters for the dropdown header and bell badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationCounts {
    pub total: usize,
    pub unread: usize,
    pub critical: usize,
    pub starred: usize,
}

/// A user's notification list
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn filtered(&self, filter: NotificationFilter) -> Vec<Notification> {
        self.notifications
            .iter()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    /// Returns `false` if no notification has this id
    pub fn mark_read(&mut self, id: &str) -> bool {
        self.update(id, |n| n.read = true)
    }

    /// Returns `false` if no notification has this id
    pub fn toggle_star(&mut self, id: &str) -> bool {
        self.update(id, |n| n.starred = !n.starred)
    }

    /// Returns `false` if no notification has this id
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.read = true;
        }
    }

    pub fn clear_all(&mut self) {
        self.notifications.clear();
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn critical_count(&self) -> usize {
        self.notifications.iter().filter(|n| n.is_urgent()).count()
    }

    pub fn starred_count(&self) -> usize {
        self.notifications.iter().filter(|n| n.starred).count()
    }

    pub fn counts(&self) -> NotificationCounts {
        NotificationCounts {
            total: self.notifications.len(),
            unread: self.unread_count(),
            critical: self.critical_count(),
            starred: self.starred_count(),
        }
    }

    /// Bell badge text; `None` hides the badge
    pub fn badge_label(&self) -> Option<String> {
        match self.unread_count() {
            0 => None,
            n if n > 99 => Some("99+".to_string()),
            n => Some(n.to_string()),
        }
    }

    fn update(&mut self, id: &str, f: impl FnOnce(&mut Notification)) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                f(n);
                true
            }
            None => false,
        }
    }
}
