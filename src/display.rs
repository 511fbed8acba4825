//! Display Variants
//!
//! Every enum-keyed styling choice of the dashboard maps exhaustively to a
//! static [`DisplayConfig`], so adding a variant without a mapping fails to
//! compile instead of silently falling back.

use serde::{Deserialize, Serialize};

use crate::data::{NotificationKind, PatientStatus, Priority, Trend};

/// Frames in the stat count-up animation
pub const ANIMATION_FRAMES: usize = 30;

/// Stats card implementations, selected explicitly by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsCardVariant {
    /// Static value on a plain card
    #[default]
    Basic,
    /// Value counts up from zero when first shown
    Animated,
    /// Highlighted card with a gradient background
    Gradient,
}

impl StatsCardVariant {
    pub fn animates(&self) -> bool {
        matches!(self, StatsCardVariant::Animated | StatsCardVariant::Gradient)
    }
}

/// Semantic colour tone, mapped to a palette by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Danger,
    Warning,
    Success,
    Info,
    Neutral,
}

/// Static display configuration for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayConfig {
    pub tone: Tone,
    /// Icon name from the dashboard icon set
    pub icon: &'static str,
    /// Draw attention with a pulsing badge
    pub pulse: bool,
    pub label: &'static str,
}

/// Types with a fixed display configuration per variant
pub trait Displayable {
    fn display(&self) -> DisplayConfig;
}

impl Displayable for NotificationKind {
    fn display(&self) -> DisplayConfig {
        match self {
            NotificationKind::Critical => DisplayConfig {
                tone: Tone::Danger,
                icon: "alert-triangle",
                pulse: true,
                label: "Critical",
            },
            NotificationKind::Warning => DisplayConfig {
                tone: Tone::Warning,
                icon: "clock",
                pulse: false,
                label: "Warning",
            },
            NotificationKind::Success => DisplayConfig {
                tone: Tone::Success,
                icon: "check-circle",
                pulse: false,
                label: "Success",
            },
            NotificationKind::Info => DisplayConfig {
                tone: Tone::Info,
                icon: "bell-dot",
                pulse: false,
                label: "Info",
            },
        }
    }
}

impl Displayable for PatientStatus {
    fn display(&self) -> DisplayConfig {
        match self {
            PatientStatus::Stable => DisplayConfig {
                tone: Tone::Success,
                icon: "user-check",
                pulse: false,
                label: "Stable",
            },
            PatientStatus::Caution => DisplayConfig {
                tone: Tone::Warning,
                icon: "alert-circle",
                pulse: false,
                label: "Caution",
            },
            PatientStatus::Critical => DisplayConfig {
                tone: Tone::Danger,
                icon: "alert-triangle",
                pulse: true,
                label: "Critical",
            },
            PatientStatus::Inactive => DisplayConfig {
                tone: Tone::Neutral,
                icon: "user-x",
                pulse: false,
                label: "Inactive",
            },
        }
    }
}

impl Displayable for Priority {
    fn display(&self) -> DisplayConfig {
        match self {
            Priority::High => DisplayConfig {
                tone: Tone::Danger,
                icon: "arrow-up-right",
                pulse: false,
                label: "High",
            },
            Priority::Medium => DisplayConfig {
                tone: Tone::Warning,
                icon: "minus",
                pulse: false,
                label: "Medium",
            },
            Priority::Low => DisplayConfig {
                tone: Tone::Neutral,
                icon: "arrow-down-right",
                pulse: false,
                label: "Low",
            },
        }
    }
}

impl Displayable for Trend {
    fn display(&self) -> DisplayConfig {
        match self {
            Trend::Up => DisplayConfig {
                tone: Tone::Success,
                icon: "trending-up",
                pulse: false,
                label: "Up",
            },
            Trend::Down => DisplayConfig {
                tone: Tone::Danger,
                icon: "trending-down",
                pulse: false,
                label: "Down",
            },
            Trend::Neutral => DisplayConfig {
                tone: Tone::Neutral,
                icon: "minus",
                pulse: false,
                label: "Neutral",
            },
        }
    }
}

/// Split a stat value into its leading number and trailing text
///
/// `"87%"` → `(87.0, "%")`, `"1,247"` → `(1247.0, "")`, `"4.7/5"` → `(4.7, "/5")`.
fn split_numeric(value: &str) -> Option<(f64, &str)> {
    let end = value
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == ','))
        .map(|(i, _)| i)
        .unwrap_or(value.len());

    let number: String = value[..end].chars().filter(|c| *c != ',').collect();
    let parsed = number.parse::<f64>().ok()?;
    Some((parsed, &value[end..]))
}

/// Count-up frames for an animated stat value
///
/// Values without a leading number render as a single frame. The last frame
/// is always the original value string.
pub fn animation_frames(value: &str) -> Vec<String> {
    let Some((target, suffix)) = split_numeric(value) else {
        return vec![value.to_string()];
    };

    let step = target / ANIMATION_FRAMES as f64;
    let mut frames: Vec<String> = (1..ANIMATION_FRAMES)
        .map(|i| {
            let current = ((step * i as f64).min(target) * 10.0).round() / 10.0;
            if current.fract() == 0.0 {
                format!("{}{}", current as i64, suffix)
            } else {
                format!("{:.1}{}", current, suffix)
            }
        })
        .collect();
    frames.push(value.to_string());
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_variants_pulse() {
        assert!(NotificationKind::Critical.display().pulse);
        assert!(PatientStatus::Critical.display().pulse);
        assert!(!NotificationKind::Info.display().pulse);
        assert_eq!(PatientStatus::Inactive.display().tone, Tone::Neutral);
    }

    #[test]
    fn test_split_numeric() {
        assert_eq!(split_numeric("87%"), Some((87.0, "%")));
        assert_eq!(split_numeric("1,247"), Some((1247.0, "")));
        assert_eq!(split_numeric("4.7/5"), Some((4.7, "/5")));
        assert_eq!(split_numeric("N/A"), None);
    }

    #[test]
    fn test_animation_frames() {
        let frames = animation_frames("87%");
        assert_eq!(frames.len(), ANIMATION_FRAMES);
        assert_eq!(frames.last().map(String::as_str), Some("87%"));
        assert!(frames[0].ends_with('%'));
        assert_eq!(frames[14], "43.5%");

        assert_eq!(animation_frames("N/A"), vec!["N/A".to_string()]);
        assert_eq!(animation_frames("1,247").last().unwrap(), "1,247");
    }

    #[test]
    fn test_variant_serialization() {
        let json = serde_json::to_string(&StatsCardVariant::Gradient).unwrap();
        assert_eq!(json, "\"gradient\"");
        assert!(StatsCardVariant::Animated.animates());
        assert!(!StatsCardVariant::Basic.animates());
    }
}
