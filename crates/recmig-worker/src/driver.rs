//! Date-range driver.
//!
//! Walks the configured days in order. For each day it lists the provider's
//! recordings, migrates them through the limiter and waits for every one of
//! them to settle before moving on to the next day.

use std::sync::Arc;

use chrono::NaiveDate;
use recmig_models::{DateRange, DaySummary, RunSummary, DATE_FORMAT};
use recmig_storage::ObjectStore;
use recmig_twilio::RecordingSource;
use tracing::{error, info, warn};

use crate::config::RunConfig;
use crate::error::WorkerResult;
use crate::limiter::ConcurrencyLimiter;
use crate::migrator::RecordingMigrator;

/// Drives a whole migration run over a date range.
pub struct MigrationDriver {
    source: Arc<dyn RecordingSource>,
    migrator: RecordingMigrator,
    limiter: ConcurrencyLimiter,
    range: DateRange,
}

impl MigrationDriver {
    pub fn new(
        config: &RunConfig,
        source: Arc<dyn RecordingSource>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        let migrator = RecordingMigrator::new(Arc::clone(&source), store, config.retry_config());

        Self {
            source,
            migrator,
            limiter: ConcurrencyLimiter::new(config.concurrency_limit),
            range: config.date_range(),
        }
    }

    /// Process every day of the range.
    ///
    /// Failures never abort the run: a day whose listing fails is recorded in
    /// the summary's skipped dates and the next day proceeds.
    pub async fn run(&self) -> RunSummary {
        info!(
            start = %self.range.start,
            end = %self.range.end,
            days = self.range.len(),
            concurrency = self.limiter.limit(),
            "Beginning process to copy and delete call recordings between {} and {}",
            self.range.start,
            self.range.end
        );

        let mut summary = RunSummary::default();

        for date in self.range.days() {
            match self.process_date(date).await {
                Ok(day) => summary.record_day(&day),
                Err(e) => {
                    error!(
                        date = %date,
                        "Error retrieving recordings for date {}: {}",
                        date.format(DATE_FORMAT),
                        e
                    );
                    summary.record_skipped(date);
                }
            }
        }

        if !summary.skipped_dates.is_empty() {
            let skipped: Vec<String> = summary
                .skipped_dates
                .iter()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .collect();
            warn!(
                "Skipped {} date(s) whose listing failed: {}",
                skipped.len(),
                skipped.join(", ")
            );
        }

        info!(
            days = summary.days_processed,
            listed = summary.recordings_listed,
            migrated = summary.migrated,
            failed = summary.failed,
            skipped = summary.skipped_dates.len(),
            "Complete. Migration finished for the configured timeframe"
        );

        summary
    }

    /// List one day's recordings and migrate all of them.
    ///
    /// Returns only after every dispatched migration has settled. The only
    /// error is a failed listing.
    pub async fn process_date(&self, date: NaiveDate) -> WorkerResult<DaySummary> {
        let day = date.format(DATE_FORMAT).to_string();
        info!(date = %day, "Processing date: {}", day);

        let recordings = self.source.list_recordings(date).await?;
        info!(
            date = %day,
            count = recordings.len(),
            "Found {} recordings for date {}",
            recordings.len(),
            day
        );

        let outcomes = self
            .limiter
            .run_all(recordings.iter().map(|item| self.migrator.migrate(item)))
            .await;

        let summary = DaySummary::from_outcomes(date, &outcomes);
        info!(
            date = %day,
            listed = summary.listed,
            migrated = summary.migrated,
            failed = summary.failed,
            "Finished date {}",
            day
        );

        Ok(summary)
    }
}
