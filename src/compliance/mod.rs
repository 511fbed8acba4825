//! Compliance Helpers
//!
//! Safeguards around protected health information:
//!
//! - `masking`: masked rendering of SSNs, phone numbers and emails
//! - `access`: permission sets per access level
//! - `audit`: structured audit entries on a dedicated tracing target

pub mod access;
pub mod audit;
pub mod masking;

pub use access::{check_access, AccessDenied, AccessLevel};
pub use audit::{AuditEntry, ResourceType, Severity, AUDIT_TARGET};
pub use masking::{mask, MaskKind, MaskedValue, MASK_CHAR, MAX_UNMASK_ATTEMPTS};
