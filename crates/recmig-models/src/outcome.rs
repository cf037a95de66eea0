//! Per-item outcomes and run summaries.
//!
//! Nothing here is persisted; these values exist for logging within a run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Terminal result of migrating one recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// Stored at the destination and deleted from the provider.
    Succeeded,
    /// Every attempt failed; the recording was left at the provider.
    FailedAfterRetries,
}

impl MigrationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MigrationOutcome::Succeeded)
    }
}

/// Counts for one processed calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub listed: usize,
    pub migrated: usize,
    pub failed: usize,
}

impl DaySummary {
    /// Tally a day's outcomes.
    pub fn from_outcomes(date: NaiveDate, outcomes: &[MigrationOutcome]) -> Self {
        let migrated = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            date,
            listed: outcomes.len(),
            migrated,
            failed: outcomes.len() - migrated,
        }
    }
}

/// Totals for a whole run, including the dates whose listing failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub days_processed: usize,
    pub recordings_listed: usize,
    pub migrated: usize,
    pub failed: usize,
    pub skipped_dates: Vec<NaiveDate>,
}

impl RunSummary {
    pub fn record_day(&mut self, day: &DaySummary) {
        self.days_processed += 1;
        self.recordings_listed += day.listed;
        self.migrated += day.migrated;
        self.failed += day.failed;
    }

    pub fn record_skipped(&mut self, date: NaiveDate) {
        self.skipped_dates.push(date);
    }

    /// True when every listed recording migrated and no date was skipped.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped_dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    #[test]
    fn test_day_summary_counts() {
        let outcomes = [
            MigrationOutcome::Succeeded,
            MigrationOutcome::FailedAfterRetries,
            MigrationOutcome::Succeeded,
        ];
        let day = DaySummary::from_outcomes(date(1), &outcomes);
        assert_eq!(day.listed, 3);
        assert_eq!(day.migrated, 2);
        assert_eq!(day.failed, 1);
    }

    #[test]
    fn test_run_summary_accumulates() {
        let mut run = RunSummary::default();
        run.record_day(&DaySummary::from_outcomes(date(1), &[MigrationOutcome::Succeeded]));
        run.record_skipped(date(2));
        run.record_day(&DaySummary::from_outcomes(date(3), &[]));

        assert_eq!(run.days_processed, 2);
        assert_eq!(run.migrated, 1);
        assert_eq!(run.skipped_dates, vec![date(2)]);
        assert!(!run.is_clean());
    }

    #[test]
    fn test_outcome_serde() {
        let json = serde_json::to_string(&MigrationOutcome::FailedAfterRetries).unwrap();
        assert_eq!(json, "\"failed_after_retries\"");
    }
}
