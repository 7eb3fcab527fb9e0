use std::io::Write;

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::models::Training;

const HEADERS: [&str; 12] = [
    "ID",
    "Training Name",
    "Details",
    "Employee",
    "Email",
    "Department",
    "Start Date",
    "Completion Date",
    "Hours",
    "Source",
    "Skill",
    "Status",
];

/// Write the filtered training set as CSV: header plus one row per record,
/// twelve double-quoted fields in fixed column order. An unset completion
/// date becomes an empty field.
pub fn write_csv<W: Write>(records: &[Training], out: W) -> anyhow::Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);

    writer.write_record(HEADERS)?;
    for t in records {
        writer.write_record([
            t.id.as_str(),
            t.training_name.as_str(),
            t.training_details.as_str(),
            t.employee_name.as_str(),
            t.employee_email.as_str(),
            t.department.as_str(),
            &t.start_date.to_string(),
            &t.completion_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            &t.hours_consumed.to_string(),
            &t.source.to_string(),
            t.skill_category.as_str(),
            &t.status.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn default_export_name(today: NaiveDate) -> String {
    format!("trainings_export_{today}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::{TrainingSource, TrainingStatus};

    fn training(id: &str, completion: Option<NaiveDate>) -> Training {
        Training {
            id: id.to_string(),
            training_name: "Data Science Bootcamp".to_string(),
            training_details: "Statistics, ML, and data visualization".to_string(),
            employee_name: "Fatima Hassan".to_string(),
            employee_email: "fatima.hassan@company.com".to_string(),
            department: "Product".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            completion_date: completion,
            hours_consumed: 12.5,
            source: TrainingSource::Udemy,
            skill_category: "Data Analytics".to_string(),
            status: if completion.is_some() {
                TrainingStatus::Completed
            } else {
                TrainingStatus::InProgress
            },
        }
    }

    fn export(records: &[Training]) -> String {
        let mut buf = Vec::new();
        write_csv(records, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn produces_header_plus_one_row_per_record() {
        let records = vec![
            training("TR-0001", NaiveDate::from_ymd_opt(2025, 2, 1)),
            training("TR-0002", None),
            training("TR-0003", NaiveDate::from_ymd_opt(2025, 3, 1)),
        ];
        let out = export(&records);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("\"ID\",\"Training Name\""));
    }

    #[test]
    fn every_line_has_twelve_quoted_fields() {
        let records = vec![training("TR-0001", NaiveDate::from_ymd_opt(2025, 2, 1))];
        let out = export(&records);
        for line in out.lines() {
            let fields: Vec<&str> = line.split("\",\"").collect();
            assert_eq!(fields.len(), 12, "line: {line}");
            assert!(line.starts_with('"') && line.ends_with('"'));
        }
    }

    #[test]
    fn fixed_column_order_and_values() {
        let records = vec![training("TR-0001", NaiveDate::from_ymd_opt(2025, 2, 1))];
        let out = export(&records);
        let row = out.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"TR-0001\",\"Data Science Bootcamp\",\"Statistics, ML, and data visualization\",\
             \"Fatima Hassan\",\"fatima.hassan@company.com\",\"Product\",\"2025-01-05\",\
             \"2025-02-01\",\"12.5\",\"Udemy\",\"Data Analytics\",\"Completed\""
        );
    }

    #[test]
    fn missing_completion_date_is_an_empty_field() {
        let records = vec![training("TR-0002", None)];
        let out = export(&records);
        let row = out.lines().nth(1).unwrap();
        assert!(row.contains("\"2025-01-05\",\"\",\"12.5\""));
    }

    #[test]
    fn export_name_embeds_the_date() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        assert_eq!(
            default_export_name(today),
            "trainings_export_2026-08-25.csv"
        );
    }
}
