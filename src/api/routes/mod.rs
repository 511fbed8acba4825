//! API Routes
//!
//! Route handlers organized by functionality, plus the access and audit
//! helpers they share.

pub mod appointments;
pub mod dashboard;
pub mod health;
pub mod notifications;
pub mod patients;
pub mod registration;
pub mod sessions;

use axum::http::HeaderMap;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::compliance::{check_access, AccessLevel, AuditEntry, ResourceType, Severity};

const PERMISSIONS_HEADER: &str = "x-user-permissions";
const USER_ID_HEADER: &str = "x-user-id";
const USER_ROLE_HEADER: &str = "x-user-role";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Check the caller's comma-separated permissions when enforcement is on
pub(crate) fn authorize(state: &AppState, headers: &HeaderMap, level: AccessLevel) -> ApiResult<()> {
    if !state.config.enforce_access {
        return Ok(());
    }

    let permissions: Vec<&str> = header(headers, PERMISSIONS_HEADER)
        .map(|v| v.split(',').map(str::trim).filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    check_access(level, &permissions)?;
    Ok(())
}

/// Record an access to protected data on the audit target
pub(crate) fn audit(
    headers: &HeaderMap,
    action: &str,
    resource_type: ResourceType,
    resource_id: Option<&str>,
    level: AccessLevel,
) {
    let mut entry = AuditEntry::new(
        action,
        resource_type,
        header(headers, USER_ID_HEADER).unwrap_or("anonymous"),
        header(headers, USER_ROLE_HEADER).unwrap_or("unknown"),
    )
    .severity(Severity::for_access(level));

    if let Some(id) = resource_id {
        entry = entry.resource(id);
    }
    entry.record();
}
