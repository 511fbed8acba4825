//! EHR Dashboard demo
//!
//! Runs a compressed idle-session countdown and a registration round trip
//! against the built-in sample data, logging every step.

use ehr_dashboard::compliance::{mask, MaskKind};
use ehr_dashboard::config::Config;
use ehr_dashboard::data::{DataProvider, MockDataProvider, NotificationCenter, PatientFilter};
use ehr_dashboard::display::{animation_frames, Displayable};
use ehr_dashboard::registration::{Field, RegistrationForm};
use ehr_dashboard::session::{
    ActivityKind, ExpiryCause, SessionConfig, SessionEvent, SessionHooks, SessionMonitor,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct LoggingHooks;

impl SessionHooks for LoggingHooks {
    fn on_warning(&self, remaining_secs: u64) {
        tracing::warn!(remaining_secs, "Session expiring soon");
    }

    fn on_expired(&self, cause: ExpiryCause) {
        tracing::warn!(?cause, "Session expired");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ehr_dashboard=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("EHR Dashboard v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_default();
    let provider = MockDataProvider::new();

    demo_dashboard(&provider).await?;
    demo_registration(&config).await?;
    demo_session().await?;

    tracing::info!("Demo complete");
    Ok(())
}

async fn demo_dashboard(provider: &dyn DataProvider) -> Result<(), Box<dyn std::error::Error>> {
    let critical = provider
        .patients(&PatientFilter::default().status("critical".parse()?))
        .await?;
    for patient in &critical {
        let badge = patient.status.display();
        tracing::info!(
            name = %patient.name,
            mrn = %patient.mrn,
            badge = badge.label,
            pulse = badge.pulse,
            "Critical patient"
        );
    }

    for stat in provider.dashboard_stats().await? {
        let shown = if stat.variant.animates() {
            animation_frames(&stat.value).join(" ")
        } else {
            stat.value.clone()
        };
        tracing::info!(title = %stat.title, variant = ?stat.variant, "{}", shown);
    }

    let center = NotificationCenter::new(provider.notifications().await?);
    tracing::info!(
        unread = center.unread_count(),
        critical = center.critical_count(),
        badge = center.badge_label().as_deref().unwrap_or(""),
        "Notifications loaded"
    );

    Ok(())
}

async fn demo_registration(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = RegistrationForm::new();

    for (field, value) in [
        (Field::FirstName, "Sarah"),
        (Field::LastName, "Johnson"),
        (Field::DateOfBirth, "1979-03-14"),
        (Field::Phone, "555-12"),
        (Field::Email, "sarah.johnson@example.com"),
        (Field::Ssn, "123-45-6789"),
    ] {
        form.on_field_change(field, value);
    }

    if let Some(message) = form.error(Field::Phone) {
        tracing::info!(field = %Field::Phone, "{}", message);
    }
    form.on_field_change(Field::Phone, "(555) 123-4567");

    form.set_consent(true);
    form.set_privacy_acknowledged(true);

    tracing::info!(
        ssn = %mask(form.value(Field::Ssn), MaskKind::Ssn),
        email = %mask(form.value(Field::Email), MaskKind::Email),
        "Submitting registration"
    );

    let submitter = config.registration.submitter();
    match form.submit(&submitter).await {
        Ok(receipt) => tracing::info!(id = %receipt.registration_id, "Registered"),
        Err(e) => tracing::error!(error = %e, "Registration failed"),
    }

    Ok(())
}

async fn demo_session() -> Result<(), Box<dyn std::error::Error>> {
    // One simulated second per 5ms: a 2 minute session with a 1 minute warning
    let config = SessionConfig::new(2, 1)?.tick_interval(Duration::from_millis(5));
    let monitor = SessionMonitor::start_with_hooks(config, Arc::new(LoggingHooks));
    let mut events = monitor.subscribe();

    tokio::time::sleep(Duration::from_millis(200)).await;
    monitor.on_user_activity(ActivityKind::KeyPress).await;
    tracing::info!(remaining = %monitor.snapshot().await.display, "Activity reset the countdown");

    while let Ok(event) = events.recv().await {
        tracing::info!(?event, "Session event");
        if matches!(event, SessionEvent::Expired { .. }) {
            break;
        }
    }

    monitor.restart().await;
    tracing::info!(remaining = %monitor.snapshot().await.display, "Logged in again");
    monitor.shutdown();
    Ok(())
}
