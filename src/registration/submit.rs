//! Submission boundary
//!
//! [`Submitter`] is the single point where a validated registration leaves
//! the form. [`SimulatedSubmitter`] stands in for a network call with a fixed
//! delay and an optional injected failure.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

use super::error::SubmitError;
use super::fields::Field;

/// A registration that passed validation and both gates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub fields: BTreeMap<Field, String>,
    pub consent_given: bool,
    pub privacy_acknowledged: bool,
}

impl Registration {
    pub fn get(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }
}

/// Acknowledgment of a successful submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub registration_id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl SubmitReceipt {
    pub fn new() -> Self {
        Self {
            registration_id: Uuid::new_v4(),
            submitted_at: Utc::now(),
        }
    }
}

impl Default for SubmitReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends a validated registration somewhere
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, registration: &Registration) -> Result<SubmitReceipt, SubmitError>;
}

/// Waits out a fixed delay, then succeeds (or fails if told to)
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    failure: Option<String>,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure: None,
        }
    }

    /// Builder method: fail every submit with `message`
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, registration: &Registration) -> Result<SubmitReceipt, SubmitError> {
        tokio::time::sleep(self.delay).await;

        if let Some(message) = &self.failure {
            tracing::warn!(error = %message, "Simulated registration submit failed");
            return Err(SubmitError(message.clone()));
        }

        let receipt = SubmitReceipt::new();
        tracing::info!(
            registration_id = %receipt.registration_id,
            fields = registration.fields.values().filter(|v| !v.is_empty()).count(),
            "Registration submitted"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            fields: BTreeMap::from([(Field::FirstName, "Sarah".to_string())]),
            consent_given: true,
            privacy_acknowledged: true,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_submit_waits_for_delay() {
        let submitter = SimulatedSubmitter::new(Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        let receipt = submitter.submit(&registration()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(receipt.submitted_at <= Utc::now());
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_failure() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(10)).failing("network down");
        let err = submitter.submit(&registration()).await.unwrap_err();
        assert_eq!(err, SubmitError("network down".to_string()));
    }

    #[test]
    fn test_registration_get() {
        let reg = registration();
        assert_eq!(reg.get(Field::FirstName), "Sarah");
        assert_eq!(reg.get(Field::City), "");
    }
}
