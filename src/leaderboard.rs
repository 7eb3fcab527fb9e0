use std::collections::HashMap;

use crate::models::{TopLearner, Training, TrainingStatus};

const LEADERBOARD_SIZE: usize = 15;

/// Fold completed trainings into per-employee aggregates keyed by email,
/// then rank by total hours. Grouping happens in encounter order and the
/// sort is stable, so ties keep their first-seen order. Truncated to the
/// top 15.
///
/// The entry's `source` is whatever record folded in last for that employee,
/// kept for compatibility with the existing dashboard rather than as a
/// statement about the employee's primary platform.
pub fn top_learners(trainings: &[Training]) -> Vec<TopLearner> {
    let mut entries: Vec<TopLearner> = Vec::new();
    let mut index_by_email: HashMap<String, usize> = HashMap::new();

    for t in trainings {
        if t.status != TrainingStatus::Completed {
            continue;
        }
        match index_by_email.get(&t.employee_email) {
            Some(&i) => {
                let entry = &mut entries[i];
                entry.courses_completed += 1;
                entry.total_hours += t.hours_consumed;
                entry.source = t.source;
            }
            None => {
                index_by_email.insert(t.employee_email.clone(), entries.len());
                entries.push(TopLearner {
                    id: format!("TL-{}", entries.len() + 1),
                    employee_name: t.employee_name.clone(),
                    employee_email: t.employee_email.clone(),
                    department: t.department.clone(),
                    courses_completed: 1,
                    total_hours: t.hours_consumed,
                    source: t.source,
                    avatar: crate::mock::initials(&t.employee_name),
                    streak: 0,
                });
            }
        }
    }

    for entry in &mut entries {
        entry.total_hours = (entry.total_hours * 10.0).round() / 10.0;
    }

    entries.sort_by(|a, b| {
        b.total_hours
            .partial_cmp(&a.total_hours)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(LEADERBOARD_SIZE);
    entries
}
