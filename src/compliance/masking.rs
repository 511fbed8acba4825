//! PHI masking for on-screen display

use serde::{Deserialize, Serialize};

/// Character substituted for hidden characters
pub const MASK_CHAR: char = '•';

/// Number of failed unmask attempts before the control locks
pub const MAX_UNMASK_ATTEMPTS: u32 = 3;

/// How a value is masked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum MaskKind {
    /// `•••-••-1234`
    Ssn,
    /// `(•••) •••-1234`
    Phone,
    /// First two characters of the local part, domain kept
    Email,
    /// First `show` characters kept
    Custom { show: usize },
}

impl Default for MaskKind {
    fn default() -> Self {
        MaskKind::Custom { show: 4 }
    }
}

fn repeat_mask(n: usize) -> String {
    std::iter::repeat(MASK_CHAR).take(n).collect()
}

fn last_chars(value: &str, n: usize) -> &str {
    let start = value
        .char_indices()
        .rev()
        .nth(n.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    &value[start..]
}

fn keep_prefix(value: &str, show: usize) -> String {
    let hidden = value.chars().count().saturating_sub(show);
    value.chars().take(show).collect::<String>() + &repeat_mask(hidden)
}

/// Mask `value` for display. Empty input stays empty.
pub fn mask(value: &str, kind: MaskKind) -> String {
    if value.is_empty() {
        return String::new();
    }

    match kind {
        MaskKind::Ssn => format!("{}-{}-{}", repeat_mask(3), repeat_mask(2), last_chars(value, 4)),
        MaskKind::Phone => format!("({}) {}-{}", repeat_mask(3), repeat_mask(3), last_chars(value, 4)),
        MaskKind::Email => match value.split_once('@') {
            Some((local, domain)) => format!("{}@{}", keep_prefix(local, 2), domain),
            None => keep_prefix(value, 2),
        },
        MaskKind::Custom { show } => keep_prefix(value, show),
    }
}

/// Reveal state of one masked value
///
/// Unmasking requires an authorization result; after
/// [`MAX_UNMASK_ATTEMPTS`] failures the control is locked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskedValue {
    value: String,
    kind: MaskKind,
    revealed: bool,
    authorized: bool,
    failed_attempts: u32,
}

impl MaskedValue {
    pub fn new(value: impl Into<String>, kind: MaskKind) -> Self {
        Self {
            value: value.into(),
            kind,
            ..Default::default()
        }
    }

    /// Text to render in the current state
    pub fn render(&self) -> String {
        if self.revealed {
            self.value.clone()
        } else {
            mask(&self.value, self.kind)
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_locked(&self) -> bool {
        self.failed_attempts >= MAX_UNMASK_ATTEMPTS
    }

    /// Attempt to reveal. Once authorized, later reveals skip the check.
    pub fn reveal(&mut self, authorized: bool) -> bool {
        if self.is_locked() {
            return false;
        }
        if self.authorized || authorized {
            self.authorized = true;
            self.revealed = true;
        } else {
            self.failed_attempts += 1;
        }
        self.revealed
    }

    pub fn hide(&mut self) {
        self.revealed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_kinds() {
        assert_eq!(mask("123-45-6789", MaskKind::Ssn), "•••-••-6789");
        assert_eq!(mask("(555) 123-4567", MaskKind::Phone), "(•••) •••-4567");
        assert_eq!(mask("john.doe@example.com", MaskKind::Email), "jo••••••@example.com");
        assert_eq!(mask("A1234567", MaskKind::Custom { show: 4 }), "A123••••");
        assert_eq!(mask("", MaskKind::Ssn), "");
    }

    #[test]
    fn test_mask_short_values() {
        assert_eq!(mask("a@x.org", MaskKind::Email), "a@x.org");
        assert_eq!(mask("12", MaskKind::Ssn), "•••-••-12");
        assert_eq!(mask("abc", MaskKind::Custom { show: 4 }), "abc");
        assert_eq!(mask("noatsign", MaskKind::Email), "no••••••");
    }

    #[test]
    fn test_reveal_locks_after_failures() {
        let mut ssn = MaskedValue::new("123-45-6789", MaskKind::Ssn);
        assert!(!ssn.reveal(false));
        assert!(!ssn.reveal(false));
        assert!(!ssn.is_locked());
        assert!(!ssn.reveal(false));
        assert!(ssn.is_locked());
        assert!(!ssn.reveal(true));
        assert_eq!(ssn.render(), "•••-••-6789");
    }

    #[test]
    fn test_reveal_and_hide() {
        let mut phone = MaskedValue::new("5551234567", MaskKind::Phone);
        assert!(phone.reveal(true));
        assert_eq!(phone.render(), "5551234567");
        phone.hide();
        assert_eq!(phone.render(), "(•••) •••-4567");
        assert!(phone.reveal(false));
    }
}
