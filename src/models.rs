use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which learning platform a record was pulled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingSource {
    Udemy,
    #[serde(rename = "CSOD")]
    Csod,
}

impl fmt::Display for TrainingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingSource::Udemy => write!(f, "Udemy"),
            TrainingSource::Csod => write!(f, "CSOD"),
        }
    }
}

impl FromStr for TrainingSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "udemy" => Ok(TrainingSource::Udemy),
            "csod" => Ok(TrainingSource::Csod),
            other => Err(format!("unknown source '{other}' (expected udemy or csod)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingStatus {
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Not Started")]
    NotStarted,
}

impl fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingStatus::Completed => write!(f, "Completed"),
            TrainingStatus::InProgress => write!(f, "In Progress"),
            TrainingStatus::NotStarted => write!(f, "Not Started"),
        }
    }
}

impl FromStr for TrainingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "completed" => Ok(TrainingStatus::Completed),
            "in_progress" => Ok(TrainingStatus::InProgress),
            "not_started" => Ok(TrainingStatus::NotStarted),
            other => Err(format!(
                "unknown status '{other}' (expected completed, in-progress or not-started)"
            )),
        }
    }
}

/// One employee's enrollment in one course, in the shape shared by both
/// platforms. `employee_email` is the join key for every derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: String,
    pub training_name: String,
    pub training_details: String,
    pub employee_name: String,
    pub employee_email: String,
    pub department: String,
    pub start_date: NaiveDate,
    /// `None` means not yet completed; `status` is `Completed` iff this is set.
    pub completion_date: Option<NaiveDate>,
    pub hours_consumed: f64,
    pub source: TrainingSource,
    pub skill_category: String,
    pub status: TrainingStatus,
}

impl Training {
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self.status,
            TrainingStatus::InProgress | TrainingStatus::NotStarted
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseStatus {
    Active,
    #[serde(rename = "At Risk")]
    AtRisk,
    Inactive,
}

impl LicenseStatus {
    /// Tiering over whole days since last activity: up to 14 days is Active,
    /// 15-30 is At Risk, beyond 30 is Inactive.
    pub fn from_days_inactive(days: i64) -> Self {
        match days {
            d if d <= 14 => LicenseStatus::Active,
            d if d <= 30 => LicenseStatus::AtRisk,
            _ => LicenseStatus::Inactive,
        }
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseStatus::Active => write!(f, "Active"),
            LicenseStatus::AtRisk => write!(f, "At Risk"),
            LicenseStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

impl FromStr for LicenseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "active" => Ok(LicenseStatus::Active),
            "at_risk" => Ok(LicenseStatus::AtRisk),
            "inactive" => Ok(LicenseStatus::Inactive),
            other => Err(format!(
                "unknown license status '{other}' (expected active, at-risk or inactive)"
            )),
        }
    }
}

/// One employee's seat on the Udemy Business plan, with utilization figures
/// as reported by the platform (trusted as-is).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UdemyLicense {
    pub id: String,
    pub employee_name: String,
    pub employee_email: String,
    pub department: String,
    pub license_assigned: NaiveDate,
    pub last_active: NaiveDate,
    pub courses_started: u32,
    pub courses_completed: u32,
    pub hours_spent: f64,
    pub days_inactive: i64,
    pub status: LicenseStatus,
}

/// Per-employee aggregate of completed trainings. Derived, never stored;
/// recomputed from scratch whenever the training set changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLearner {
    pub id: String,
    pub employee_name: String,
    pub employee_email: String,
    pub department: String,
    pub courses_completed: u32,
    pub total_hours: f64,
    /// Source of the last record folded into this entry. An accumulation
    /// artifact, not the employee's dominant platform.
    pub source: TrainingSource,
    pub avatar: String,
    /// No derivation rule exists for streaks yet; always zero.
    pub streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    NudgeComplete,
    Inactive15,
    Inactive30,
    Inactive60,
    Inactive90,
    Custom,
}

/// A named subject/body pair with `{{token}}` placeholders, loaded from the
/// fixed catalog in `templates.rs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub category: TemplateCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Success,
    Error,
}

/// What one source contributed to a sync run. Counts reflect exactly what
/// was merged; a failed fetch contributes zero records and an error message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    pub trainings: usize,
    pub licenses: usize,
    pub status: SourceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceReport {
    pub fn success() -> Self {
        SourceReport {
            trainings: 0,
            licenses: 0,
            status: SourceStatus::Success,
            error: None,
        }
    }

    pub fn record_failure(&mut self, message: String) {
        self.status = SourceStatus::Error;
        self.error = Some(message);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSources {
    pub udemy: SourceReport,
    pub csod: SourceReport,
}

/// Immutable snapshot produced by one orchestration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub sync_id: Uuid,
    pub trainings: Vec<Training>,
    pub licenses: Vec<UdemyLicense>,
    pub synced_at: DateTime<Utc>,
    pub sources: SyncSources,
}
