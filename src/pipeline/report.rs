// src/pipeline/report.rs

//! Daily activity report.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::Result;
use crate::models::History;

/// One action in the daily report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportEntry {
    pub post_id: String,
    pub author: String,
    pub timestamp: DateTime<Local>,
    pub comment: String,
    pub image_count: u32,
}

/// Summary of one calendar day's activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub target: u32,
    pub completed: u32,
    pub entries: Vec<ReportEntry>,
}

/// Build the report for one calendar day from the full history.
pub fn build_report(history: &History, date: NaiveDate, target: u32) -> DailyReport {
    let entries: Vec<ReportEntry> = history
        .records_on(date)
        .into_iter()
        .map(|r| ReportEntry {
            post_id: r.post_id.clone(),
            author: r.author.clone(),
            timestamp: r.timestamp,
            comment: r.comment.clone(),
            image_count: r.image_count,
        })
        .collect();

    DailyReport {
        date,
        target,
        completed: entries.len() as u32,
        entries,
    }
}

/// Write a report to `report_YYYY-MM-DD.json` under the given
/// directory, returning the written path.
pub async fn write_report(report: &DailyReport, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).await?;
    let path = dir.join(format!("report_{}.json", report.date.format("%Y-%m-%d")));
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EngagementRecord;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn history_with_two_days() -> History {
        let mut history = History::default();
        history.append(EngagementRecord {
            post_id: "p1".into(),
            author: "Ada".into(),
            timestamp: Local.with_ymd_and_hms(2026, 3, 13, 15, 0, 0).unwrap(),
            had_images: false,
            image_count: 0,
            comment: "Older".into(),
        });
        history.append(EngagementRecord {
            post_id: "p2".into(),
            author: "Bob".into(),
            timestamp: Local.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
            had_images: true,
            image_count: 1,
            comment: "Fresh".into(),
        });
        history
    }

    #[test]
    fn test_report_covers_only_the_requested_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let report = build_report(&history_with_two_days(), date, 5);

        assert_eq!(report.completed, 1);
        assert_eq!(report.target, 5);
        assert_eq!(report.entries[0].post_id, "p2");
        assert_eq!(report.entries[0].image_count, 1);
    }

    #[test]
    fn test_report_for_idle_day_is_empty() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let report = build_report(&history_with_two_days(), date, 5);
        assert_eq!(report.completed, 0);
        assert!(report.entries.is_empty());
    }

    #[tokio::test]
    async fn test_write_report_names_file_by_date() {
        let dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let report = build_report(&history_with_two_days(), date, 5);

        let path = write_report(&report, dir.path()).await.unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "report_2026-03-14.json"
        );

        let loaded: DailyReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, report);
    }
}
