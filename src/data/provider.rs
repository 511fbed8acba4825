//! Data Provider
//!
//! Read access to dashboard entities. Views take a provider instead of
//! closing over module-level sample arrays; [`MockDataProvider`] supplies the
//! built-in sample data.

use async_trait::async_trait;
use thiserror::Error;

use super::types::*;
use crate::display::StatsCardVariant;

/// Errors from a data provider
#[derive(Error, Debug)]
pub enum DataError {
    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backing source failed
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for provider operations
pub type DataResult<T> = Result<T, DataError>;

/// Read operations over dashboard entities
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Patients matching `filter`, in list order
    async fn patients(&self, filter: &PatientFilter) -> DataResult<Vec<Patient>>;

    async fn patient(&self, id: &str) -> DataResult<Patient>;

    /// Today's appointments
    async fn appointments(&self) -> DataResult<Vec<Appointment>>;

    /// Notifications as initially delivered to a new panel
    async fn notifications(&self) -> DataResult<Vec<Notification>>;

    /// Stats cards for the dashboard header
    async fn dashboard_stats(&self) -> DataResult<Vec<DashboardStat>>;
}

/// Provider backed by fixed sample data
#[derive(Debug, Clone)]
pub struct MockDataProvider {
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
    notifications: Vec<Notification>,
    stats: Vec<DashboardStat>,
}

impl MockDataProvider {
    pub fn new() -> Self {
        Self {
            patients: sample_patients(),
            appointments: sample_appointments(),
            notifications: sample_notifications(),
            stats: sample_stats(),
        }
    }

    /// Provider with no data at all
    pub fn empty() -> Self {
        Self {
            patients: Vec::new(),
            appointments: Vec::new(),
            notifications: Vec::new(),
            stats: Vec::new(),
        }
    }

    /// Builder method: replace the patient list
    pub fn with_patients(mut self, patients: Vec<Patient>) -> Self {
        self.patients = patients;
        self
    }
}

impl Default for MockDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataProvider for MockDataProvider {
    async fn patients(&self, filter: &PatientFilter) -> DataResult<Vec<Patient>> {
        Ok(self
            .patients
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn patient(&self, id: &str) -> DataResult<Patient> {
        self.patients
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| DataError::NotFound(format!("Patient {}", id)))
    }

    async fn appointments(&self) -> DataResult<Vec<Appointment>> {
        Ok(self.appointments.clone())
    }

    async fn notifications(&self) -> DataResult<Vec<Notification>> {
        Ok(self.notifications.clone())
    }

    async fn dashboard_stats(&self) -> DataResult<Vec<DashboardStat>> {
        Ok(self.stats.clone())
    }
}

#[allow(clippy::too_many_arguments)]
fn patient(
    id: &str,
    name: &str,
    age: u32,
    condition: &str,
    status: PatientStatus,
    location: &str,
    physician: &str,
    dates: (&str, &str),
    blood_type: &str,
    alerts: &[&str],
    allergies: &[&str],
) -> Patient {
    Patient {
        id: id.to_string(),
        name: name.to_string(),
        mrn: format!("MRN-{:06}", 1233 + id.parse::<u32>().unwrap_or(0)),
        age,
        primary_condition: condition.to_string(),
        status,
        location: location.to_string(),
        attending_physician: physician.to_string(),
        admission_date: dates.0.to_string(),
        last_visit: dates.1.to_string(),
        blood_type: blood_type.to_string(),
        alerts: alerts.iter().map(|s| s.to_string()).collect(),
        allergies: allergies.iter().map(|s| s.to_string()).collect(),
    }
}

fn sample_patients() -> Vec<Patient> {
    use PatientStatus::*;

    vec![
        patient(
            "1",
            "Sarah Johnson",
            45,
            "Hypertension, Type 2 Diabetes",
            Stable,
            "Room 302-A",
            "Dr. Smith",
            ("2024-01-15", "2024-01-20"),
            "A+",
            &[],
            &["Penicillin", "Shellfish"],
        ),
        patient(
            "2",
            "Michael Chen",
            62,
            "Post-operative care",
            Caution,
            "Room 201-B",
            "Dr. Rodriguez",
            ("2024-01-18", "2024-01-19"),
            "O-",
            &["High BP", "Elevated temp"],
            &["Latex"],
        ),
        patient(
            "3",
            "Emma Davis",
            28,
            "Pregnancy - 32 weeks",
            Stable,
            "Room 405-C",
            "Dr. Wilson",
            ("2024-01-20", "2024-01-21"),
            "AB+",
            &[],
            &[],
        ),
        patient(
            "4",
            "Robert Taylor",
            67,
            "Heart failure",
            Critical,
            "ICU 101",
            "Dr. Martinez",
            ("2024-01-19", "2024-01-21"),
            "B+",
            &["Critical BP", "Low oxygen", "Arrhythmia"],
            &["Aspirin"],
        ),
        patient(
            "5",
            "Anna Williams",
            34,
            "Diabetes Type 1",
            Stable,
            "Room 150-A",
            "Dr. Thompson",
            ("2024-01-17", "2024-01-20"),
            "A-",
            &[],
            &["Nuts"],
        ),
        patient(
            "6",
            "David Brown",
            52,
            "Chronic kidney disease",
            Caution,
            "Room 220-B",
            "Dr. Lee",
            ("2024-01-16", "2024-01-21"),
            "O+",
            &["Elevated creatinine"],
            &["Iodine"],
        ),
    ]
}

fn sample_appointments() -> Vec<Appointment> {
    [
        ("1", "Rosa Charles", "Consultation", "Headache", "09:50 AM"),
        ("2", "Keenan Waller", "Re visit", "Food Allergy", "10:30 AM"),
        ("3", "Alexander Wells", "Scheduled visit", "Hypertension", "11:50 AM"),
    ]
    .into_iter()
    .map(|(id, name, reason, diagnosis, time)| Appointment {
        id: id.to_string(),
        patient_name: name.to_string(),
        reason: reason.to_string(),
        diagnosis: diagnosis.to_string(),
        time: time.to_string(),
    })
    .collect()
}

fn sample_notifications() -> Vec<Notification> {
    use NotificationKind::*;

    let entry = |id: &str,
                 title: &str,
                 message: &str,
                 kind: NotificationKind,
                 timestamp: &str,
                 read: bool,
                 patient: Option<&str>,
                 department: &str,
                 priority: Priority| Notification {
        id: id.to_string(),
        title: title.to_string(),
        message: message.to_string(),
        kind,
        timestamp: timestamp.to_string(),
        read,
        patient: patient.map(str::to_string),
        department: Some(department.to_string()),
        priority: Some(priority),
        starred: false,
    };

    let mut notifications = vec![
        entry(
            "1",
            "Critical Lab Result",
            "Patient John Doe has abnormal blood glucose levels requiring immediate attention.",
            Critical,
            "2 minutes ago",
            false,
            Some("John Doe"),
            "Laboratory",
            Priority::High,
        ),
        entry(
            "2",
            "Medication Reminder",
            "Patient Sarah Johnson is due for scheduled medication at 3:00 PM.",
            Warning,
            "15 minutes ago",
            false,
            Some("Sarah Johnson"),
            "Pharmacy",
            Priority::Medium,
        ),
        entry(
            "3",
            "Surgery Schedule Update",
            "OR Room 3 scheduling conflict requires immediate attention.",
            Critical,
            "8 minutes ago",
            false,
            None,
            "Surgery",
            Priority::High,
        ),
        entry(
            "4",
            "Discharge Ready",
            "Patient Michael Chen has completed all requirements and is ready for discharge.",
            Success,
            "1 hour ago",
            true,
            Some("Michael Chen"),
            "General Medicine",
            Priority::Low,
        ),
        entry(
            "5",
            "Equipment Alert",
            "MRI Machine 2 requires maintenance check.",
            Warning,
            "1 hour ago",
            false,
            None,
            "Radiology",
            Priority::Medium,
        ),
        entry(
            "6",
            "Appointment Reminder",
            "Dr. Smith has a consultation scheduled in 30 minutes with Emma Davis.",
            Info,
            "2 hours ago",
            true,
            Some("Emma Davis"),
            "Cardiology",
            Priority::Low,
        ),
    ];

    notifications[0].starred = true;
    notifications
}

fn sample_stats() -> Vec<DashboardStat> {
    vec![
        DashboardStat::new("New Patients Today", "15")
            .variant(StatsCardVariant::Gradient)
            .change("+12%", Trend::Up, "vs yesterday"),
        DashboardStat::new("Total Active Patients", "1,247")
            .variant(StatsCardVariant::Animated)
            .change("+3.2%", Trend::Up, "this month"),
        DashboardStat::new("Bed Occupancy", "87%")
            .variant(StatsCardVariant::Animated)
            .change("-2%", Trend::Down, "optimal level"),
        DashboardStat::new("Patient Satisfaction", "4.7/5")
            .change("+0.3", Trend::Up, "this quarter"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_patients() {
        let provider = MockDataProvider::new();

        let all = provider.patients(&PatientFilter::default()).await.unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].mrn, "MRN-001234");
        assert_eq!(all[5].mrn, "MRN-001239");

        let critical = provider
            .patients(&PatientFilter::default().status(PatientStatus::Critical))
            .await
            .unwrap();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].name, "Robert Taylor");

        let diabetes = provider
            .patients(&PatientFilter::default().search("diabetes"))
            .await
            .unwrap();
        assert_eq!(diabetes.len(), 2);
    }

    #[tokio::test]
    async fn test_patient_lookup() {
        let provider = MockDataProvider::new();
        assert_eq!(provider.patient("3").await.unwrap().name, "Emma Davis");
        assert!(matches!(
            provider.patient("99").await,
            Err(DataError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_other_collections() {
        let provider = MockDataProvider::new();
        assert_eq!(provider.appointments().await.unwrap().len(), 3);
        assert_eq!(provider.dashboard_stats().await.unwrap().len(), 4);

        let notifications = provider.notifications().await.unwrap();
        assert_eq!(notifications.len(), 6);
        assert!(notifications[0].starred);

        let empty = MockDataProvider::empty();
        assert!(empty.appointments().await.unwrap().is_empty());
    }
}
