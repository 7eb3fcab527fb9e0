use anyhow::Context;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{LicenseStatus, Training, TrainingSource, TrainingStatus, UdemyLicense};

const DEPARTMENTS: [&str; 8] = [
    "Engineering",
    "Marketing",
    "Sales",
    "HR",
    "Finance",
    "Operations",
    "Product",
    "Legal",
];

const NAMES: [&str; 25] = [
    "Sarah Chen",
    "James Wilson",
    "Priya Sharma",
    "Michael Brown",
    "Emily Davis",
    "Raj Patel",
    "Lisa Anderson",
    "David Kim",
    "Maria Garcia",
    "Alex Thompson",
    "Fatima Hassan",
    "John O'Brien",
    "Yuki Tanaka",
    "Carlos Rivera",
    "Anna Kowalski",
    "Robert Lee",
    "Samantha Clark",
    "Hassan Ali",
    "Jennifer Wu",
    "Thomas Moore",
    "Aisha Mohammed",
    "Kevin Zhang",
    "Rachel Green",
    "Omar Syed",
    "Laura Martinez",
];

struct Course {
    name: &'static str,
    details: &'static str,
    skill: &'static str,
}

const UDEMY_COURSES: [Course; 8] = [
    Course {
        name: "Complete Python Bootcamp",
        details: "From zero to hero in Python programming",
        skill: "Data Analytics",
    },
    Course {
        name: "AWS Solutions Architect",
        details: "Prepare for AWS certification",
        skill: "Cloud Computing",
    },
    Course {
        name: "Machine Learning A-Z",
        details: "Hands-on ML with Python & R",
        skill: "AI & ML",
    },
    Course {
        name: "Agile Project Management",
        details: "Scrum Master certification prep",
        skill: "Agile",
    },
    Course {
        name: "Docker & Kubernetes",
        details: "Container orchestration masterclass",
        skill: "DevOps",
    },
    Course {
        name: "React - The Complete Guide",
        details: "Build modern web applications",
        skill: "DevOps",
    },
    Course {
        name: "Data Science Bootcamp",
        details: "Statistics, ML, and data visualization",
        skill: "Data Analytics",
    },
    Course {
        name: "Cybersecurity Fundamentals",
        details: "Network security and ethical hacking",
        skill: "Cybersecurity",
    },
];

const CSOD_COURSES: [Course; 8] = [
    Course {
        name: "Leadership Excellence Program",
        details: "Develop leadership competencies",
        skill: "Leadership",
    },
    Course {
        name: "Effective Communication",
        details: "Business communication and presentation",
        skill: "Communication",
    },
    Course {
        name: "Project Management Professional",
        details: "PMP certification training",
        skill: "Project Management",
    },
    Course {
        name: "Compliance & Ethics Training",
        details: "Annual compliance requirements",
        skill: "Leadership",
    },
    Course {
        name: "UX Research Methods",
        details: "User research and usability testing",
        skill: "UX Design",
    },
    Course {
        name: "Strategic Thinking Workshop",
        details: "Critical thinking for business leaders",
        skill: "Leadership",
    },
    Course {
        name: "Data-Driven Decision Making",
        details: "Analytics for business leaders",
        skill: "Data Analytics",
    },
    Course {
        name: "Change Management",
        details: "Leading organizational change",
        skill: "Project Management",
    },
];

const INACTIVITY_BUCKETS: [i64; 10] = [0, 2, 5, 8, 16, 22, 35, 45, 65, 95];

/// Stand-in dataset for the two platforms until live credentials exist.
/// Deterministic for a given seed so CLI runs and tests are reproducible.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    pub trainings: Vec<Training>,
    pub licenses: Vec<UdemyLicense>,
}

impl MockCatalog {
    pub fn generate(seed: u64, today: NaiveDate) -> anyhow::Result<MockCatalog> {
        let mut rng = StdRng::seed_from_u64(seed);
        let trainings = generate_trainings(&mut rng)?;
        let licenses = generate_licenses(&mut rng, today)?;
        Ok(MockCatalog {
            trainings,
            licenses,
        })
    }

    pub fn trainings_for(&self, source: TrainingSource) -> Vec<Training> {
        self.trainings
            .iter()
            .filter(|t| t.source == source)
            .cloned()
            .collect()
    }
}

/// "John O'Brien" becomes "john.o.brien@company.com".
pub fn email_for(name: &str) -> String {
    let local: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '\'' { '.' } else { c })
        .collect();
    format!("{local}@company.com")
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect()
}

fn random_date(rng: &mut StdRng, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days().max(0);
    start + Duration::days(rng.gen_range(0..=span))
}

fn generate_trainings(rng: &mut StdRng) -> anyhow::Result<Vec<Training>> {
    let mut trainings = Vec::new();
    let mut id = 1u32;

    for year in 2023..=2025 {
        let count = if year == 2025 { 30 } else { 50 };
        let year_start = NaiveDate::from_ymd_opt(year, 1, 1).context("invalid date")?;
        let year_end = NaiveDate::from_ymd_opt(year, 12, 1).context("invalid date")?;

        for _ in 0..count {
            let source = if rng.gen_bool(0.55) {
                TrainingSource::Udemy
            } else {
                TrainingSource::Csod
            };
            let courses: &[Course] = match source {
                TrainingSource::Udemy => &UDEMY_COURSES,
                TrainingSource::Csod => &CSOD_COURSES,
            };
            let course = &courses[rng.gen_range(0..courses.len())];
            let name = NAMES[rng.gen_range(0..NAMES.len())];
            let start_date = random_date(rng, year_start, year_end);
            let completed = rng.gen_bool(0.85);
            let completion_date = if completed {
                Some(random_date(rng, start_date, start_date + Duration::days(90)))
            } else {
                None
            };
            let status = if completed {
                TrainingStatus::Completed
            } else if rng.gen_bool(0.5) {
                TrainingStatus::InProgress
            } else {
                TrainingStatus::NotStarted
            };

            trainings.push(Training {
                id: format!("TR-{id:04}"),
                training_name: course.name.to_string(),
                training_details: course.details.to_string(),
                employee_name: name.to_string(),
                employee_email: email_for(name),
                department: DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())].to_string(),
                start_date,
                completion_date,
                hours_consumed: round1(rng.gen_range(2.0..42.0)),
                source,
                skill_category: course.skill.to_string(),
                status,
            });
            id += 1;
        }
    }

    Ok(trainings)
}

fn generate_licenses(rng: &mut StdRng, today: NaiveDate) -> anyhow::Result<Vec<UdemyLicense>> {
    let assigned_start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid date")?;
    let assigned_end = NaiveDate::from_ymd_opt(2024, 7, 1).context("invalid date")?;
    let mut licenses = Vec::with_capacity(NAMES.len());

    for (i, name) in NAMES.iter().enumerate() {
        let days_inactive = INACTIVITY_BUCKETS[rng.gen_range(0..INACTIVITY_BUCKETS.len())];
        licenses.push(UdemyLicense {
            id: format!("UL-{:03}", i + 1),
            employee_name: name.to_string(),
            employee_email: email_for(name),
            department: DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())].to_string(),
            license_assigned: random_date(rng, assigned_start, assigned_end),
            last_active: today - Duration::days(days_inactive),
            courses_started: rng.gen_range(0..8),
            courses_completed: rng.gen_range(0..5),
            hours_spent: round1(rng.gen_range(0.0..60.0)),
            days_inactive,
            status: LicenseStatus::from_days_inactive(days_inactive),
        });
    }

    Ok(licenses)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = MockCatalog::generate(7, today()).unwrap();
        let b = MockCatalog::generate(7, today()).unwrap();
        assert_eq!(a.trainings.len(), b.trainings.len());
        assert_eq!(a.trainings[0].id, b.trainings[0].id);
        assert_eq!(a.trainings[0].employee_email, b.trainings[0].employee_email);
        assert_eq!(a.licenses[3].days_inactive, b.licenses[3].days_inactive);
    }

    #[test]
    fn dataset_has_expected_shape() {
        let catalog = MockCatalog::generate(1, today()).unwrap();
        assert_eq!(catalog.trainings.len(), 130);
        assert_eq!(catalog.licenses.len(), 25);
        assert_eq!(catalog.trainings[0].id, "TR-0001");
        assert_eq!(catalog.licenses[0].id, "UL-001");
    }

    #[test]
    fn completion_date_matches_status() {
        let catalog = MockCatalog::generate(3, today()).unwrap();
        for t in &catalog.trainings {
            assert_eq!(
                t.status == crate::models::TrainingStatus::Completed,
                t.completion_date.is_some(),
                "record {} violates the completed-iff-dated invariant",
                t.id
            );
            assert!(t.hours_consumed >= 0.0);
        }
    }

    #[test]
    fn license_status_matches_inactivity() {
        let catalog = MockCatalog::generate(9, today()).unwrap();
        for l in &catalog.licenses {
            assert_eq!(l.status, LicenseStatus::from_days_inactive(l.days_inactive));
            assert_eq!(today() - Duration::days(l.days_inactive), l.last_active);
        }
    }

    #[test]
    fn emails_fold_spaces_and_apostrophes() {
        assert_eq!(email_for("Sarah Chen"), "sarah.chen@company.com");
        assert_eq!(email_for("John O'Brien"), "john.o.brien@company.com");
    }

    #[test]
    fn trainings_split_by_source() {
        let catalog = MockCatalog::generate(5, today()).unwrap();
        let udemy = catalog.trainings_for(TrainingSource::Udemy);
        let csod = catalog.trainings_for(TrainingSource::Csod);
        assert_eq!(udemy.len() + csod.len(), catalog.trainings.len());
        assert!(udemy.iter().all(|t| t.source == TrainingSource::Udemy));
        assert!(csod.iter().all(|t| t.source == TrainingSource::Csod));
    }
}
