use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{LicenseStatus, Training, TrainingSource, TrainingStatus, UdemyLicense};

/// AND-composed predicate set over the merged training collection. Unset
/// options are skipped, so the default filter is the identity. `today` is
/// injected rather than read from the clock so date windows are testable.
#[derive(Debug, Default, Clone)]
pub struct TrainingFilter {
    /// Matched against the completion year, falling back to the start year
    /// for records without a completion date.
    pub year: Option<i32>,
    /// Keep records completed within the last N days of `today`.
    pub last_days: Option<i64>,
    pub skill: Option<String>,
    pub source: Option<TrainingSource>,
    pub status: Option<TrainingStatus>,
    /// Restrict to In Progress / Not Started before the other options apply.
    pub incomplete_only: bool,
    /// Case-insensitive substring over training name, employee name,
    /// department and employee email.
    pub search: Option<String>,
}

impl TrainingFilter {
    pub fn apply(&self, trainings: &[Training], today: NaiveDate) -> Vec<Training> {
        trainings
            .iter()
            .filter(|t| self.matches(t, today))
            .cloned()
            .collect()
    }

    fn matches(&self, t: &Training, today: NaiveDate) -> bool {
        if self.incomplete_only && !t.is_incomplete() {
            return false;
        }
        if let Some(year) = self.year {
            if t.completion_date.unwrap_or(t.start_date).year() != year {
                return false;
            }
        }
        if let Some(days) = self.last_days {
            let cutoff = today - Duration::days(days);
            match t.completion_date {
                Some(completed) if completed >= cutoff => {}
                _ => return false,
            }
        }
        if let Some(skill) = &self.skill {
            if t.skill_category != *skill {
                return false;
            }
        }
        if let Some(source) = self.source {
            if t.source != source {
                return false;
            }
        }
        if let Some(status) = self.status {
            if t.status != status {
                return false;
            }
        }
        if let Some(query) = &self.search {
            let q = query.to_lowercase();
            let hit = t.training_name.to_lowercase().contains(&q)
                || t.employee_name.to_lowercase().contains(&q)
                || t.department.to_lowercase().contains(&q)
                || t.employee_email.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Predicate set for the license utilization view.
#[derive(Debug, Default, Clone)]
pub struct LicenseFilter {
    pub status: Option<LicenseStatus>,
    pub min_inactive_days: Option<i64>,
    pub search: Option<String>,
}

impl LicenseFilter {
    pub fn apply(&self, licenses: &[UdemyLicense]) -> Vec<UdemyLicense> {
        licenses
            .iter()
            .filter(|l| {
                if let Some(status) = self.status {
                    if l.status != status {
                        return false;
                    }
                }
                if let Some(days) = self.min_inactive_days {
                    if l.days_inactive < days {
                        return false;
                    }
                }
                if let Some(query) = &self.search {
                    let q = query.to_lowercase();
                    if !l.employee_name.to_lowercase().contains(&q)
                        && !l.department.to_lowercase().contains(&q)
                    {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training(
        id: &str,
        name: &str,
        skill: &str,
        source: TrainingSource,
        completion: Option<(i32, u32, u32)>,
    ) -> Training {
        let completion_date =
            completion.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        Training {
            id: id.to_string(),
            training_name: name.to_string(),
            training_details: "details".to_string(),
            employee_name: "Priya Sharma".to_string(),
            employee_email: "priya.sharma@company.com".to_string(),
            department: "Engineering".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            completion_date,
            hours_consumed: 4.0,
            source,
            skill_category: skill.to_string(),
            status: if completion_date.is_some() {
                TrainingStatus::Completed
            } else {
                TrainingStatus::InProgress
            },
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn default_filter_is_identity() {
        let data = vec![
            training("TR-0001", "A", "DevOps", TrainingSource::Udemy, Some((2025, 1, 1))),
            training("TR-0002", "B", "Agile", TrainingSource::Csod, None),
        ];
        let out = TrainingFilter::default().apply(&data, today());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, "TR-0001");
        assert_eq!(out[1].id, "TR-0002");
    }

    #[test]
    fn options_compose_with_and() {
        let data = vec![
            training("TR-0001", "A", "DevOps", TrainingSource::Udemy, Some((2025, 1, 1))),
            training("TR-0002", "B", "DevOps", TrainingSource::Csod, Some((2025, 1, 1))),
            training("TR-0003", "C", "Agile", TrainingSource::Udemy, Some((2025, 1, 1))),
        ];
        let filter = TrainingFilter {
            source: Some(TrainingSource::Udemy),
            skill: Some("DevOps".to_string()),
            ..TrainingFilter::default()
        };
        let out = filter.apply(&data, today());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "TR-0001");
    }

    #[test]
    fn year_falls_back_to_start_date_when_incomplete() {
        let data = vec![
            training("TR-0001", "A", "DevOps", TrainingSource::Udemy, Some((2025, 2, 1))),
            // no completion date; start date is 2024-06-01
            training("TR-0002", "B", "DevOps", TrainingSource::Udemy, None),
        ];
        let filter = TrainingFilter {
            year: Some(2024),
            ..TrainingFilter::default()
        };
        let out = filter.apply(&data, today());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "TR-0002");
    }

    #[test]
    fn date_window_measures_from_injected_today() {
        let data = vec![
            training("TR-0001", "A", "DevOps", TrainingSource::Udemy, Some((2025, 6, 1))),
            training("TR-0002", "B", "DevOps", TrainingSource::Udemy, Some((2025, 3, 1))),
            training("TR-0003", "C", "DevOps", TrainingSource::Udemy, None),
        ];
        let filter = TrainingFilter {
            last_days: Some(30),
            ..TrainingFilter::default()
        };
        let out = filter.apply(&data, today());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "TR-0001");
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let data = vec![
            training("TR-0001", "Docker Deep Dive", "DevOps", TrainingSource::Udemy, None),
            training("TR-0002", "Leadership", "Leadership", TrainingSource::Csod, None),
        ];
        let filter = TrainingFilter {
            search: Some("dOcKeR".to_string()),
            ..TrainingFilter::default()
        };
        assert_eq!(filter.apply(&data, today()).len(), 1);

        let filter = TrainingFilter {
            search: Some("engineering".to_string()),
            ..TrainingFilter::default()
        };
        assert_eq!(filter.apply(&data, today()).len(), 2);
    }

    #[test]
    fn incomplete_only_drops_completed_records() {
        let data = vec![
            training("TR-0001", "A", "DevOps", TrainingSource::Udemy, Some((2025, 1, 1))),
            training("TR-0002", "B", "DevOps", TrainingSource::Udemy, None),
        ];
        let filter = TrainingFilter {
            incomplete_only: true,
            ..TrainingFilter::default()
        };
        let out = filter.apply(&data, today());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "TR-0002");
    }

    #[test]
    fn license_filter_by_status_and_inactivity_floor() {
        let mk = |id: &str, days: i64| UdemyLicense {
            id: id.to_string(),
            employee_name: "Raj Patel".to_string(),
            employee_email: "raj.patel@company.com".to_string(),
            department: "Sales".to_string(),
            license_assigned: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            last_active: today() - Duration::days(days),
            courses_started: 3,
            courses_completed: 1,
            hours_spent: 12.0,
            days_inactive: days,
            status: LicenseStatus::from_days_inactive(days),
        };
        let data = vec![mk("UL-001", 5), mk("UL-002", 20), mk("UL-003", 60)];

        let filter = LicenseFilter {
            min_inactive_days: Some(15),
            ..LicenseFilter::default()
        };
        assert_eq!(filter.apply(&data).len(), 2);

        let filter = LicenseFilter {
            status: Some(LicenseStatus::Inactive),
            ..LicenseFilter::default()
        };
        let out = filter.apply(&data);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "UL-003");
    }
}
