use std::collections::HashSet;

use serde::Serialize;

use crate::models::{LicenseStatus, Training, TrainingStatus, UdemyLicense};

/// Dashboard roll-up over a (usually filtered) training collection.
///
/// `unique_people` counts distinct employee *names*, matching the existing
/// dashboard tile, even though the leaderboard groups by email. Two
/// employees sharing a display name would collapse here; kept as-is until
/// the discrepancy is resolved with the dashboard owners.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingStats {
    pub total: usize,
    pub completed: usize,
    /// Rounded to the nearest whole hour for display.
    pub total_hours: i64,
    pub unique_people: usize,
}

impl TrainingStats {
    pub fn compute(trainings: &[Training]) -> TrainingStats {
        let completed = trainings
            .iter()
            .filter(|t| t.status == TrainingStatus::Completed)
            .count();
        let hours: f64 = trainings.iter().map(|t| t.hours_consumed).sum();
        let people: HashSet<&str> = trainings
            .iter()
            .map(|t| t.employee_name.as_str())
            .collect();

        TrainingStats {
            total: trainings.len(),
            completed,
            total_hours: hours.round() as i64,
            unique_people: people.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LicenseStats {
    pub total: usize,
    pub active: usize,
    pub at_risk: usize,
    pub inactive: usize,
}

impl LicenseStats {
    pub fn compute(licenses: &[UdemyLicense]) -> LicenseStats {
        let count = |status: LicenseStatus| licenses.iter().filter(|l| l.status == status).count();
        LicenseStats {
            total: licenses.len(),
            active: count(LicenseStatus::Active),
            at_risk: count(LicenseStatus::AtRisk),
            inactive: count(LicenseStatus::Inactive),
        }
    }
}
