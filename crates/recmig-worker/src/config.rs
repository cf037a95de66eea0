//! Migration configuration.

use std::time::Duration;

use chrono::NaiveDate;
use recmig_models::{parse_date, DateRange};
use recmig_storage::S3Config;
use recmig_twilio::TwilioConfig;

use crate::error::{WorkerError, WorkerResult};
use crate::limiter::DEFAULT_CONCURRENCY_LIMIT;
use crate::retry::{RetryConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};

/// First day migrated when `MIGRATION_START_DATE` is unset.
pub const DEFAULT_START_DATE: &str = "2023-01-01";

/// Last day migrated when `MIGRATION_END_DATE` is unset.
pub const DEFAULT_END_DATE: &str = "2024-01-01";

/// Run parameters of the migration pipeline.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// First day to migrate (inclusive)
    pub start_date: NaiveDate,
    /// Last day to migrate (inclusive)
    pub end_date: NaiveDate,
    /// Attempts per recording, including the first
    pub max_attempts: u32,
    /// Delay between attempts of one recording
    pub retry_delay: Duration,
    /// Recordings migrated concurrently within a day
    pub concurrency_limit: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        let range = DateRange::parse(DEFAULT_START_DATE, DEFAULT_END_DATE)
            .expect("default dates are valid");
        Self::for_range(range.start, range.end)
    }
}

impl RunConfig {
    /// Default tuning over the given inclusive range.
    pub fn for_range(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
        }
    }

    /// Create config from environment variables.
    ///
    /// Only the date range is read from the environment; retry and
    /// concurrency settings keep their defaults.
    pub fn from_env() -> WorkerResult<Self> {
        let start = std::env::var("MIGRATION_START_DATE")
            .unwrap_or_else(|_| DEFAULT_START_DATE.to_string());
        let end =
            std::env::var("MIGRATION_END_DATE").unwrap_or_else(|_| DEFAULT_END_DATE.to_string());

        let start_date = parse_date(&start)
            .map_err(|e| WorkerError::config_error(format!("MIGRATION_START_DATE: {}", e)))?;
        let end_date = parse_date(&end)
            .map_err(|e| WorkerError::config_error(format!("MIGRATION_END_DATE: {}", e)))?;

        if start_date > end_date {
            return Err(WorkerError::config_error(format!(
                "MIGRATION_START_DATE {} is after MIGRATION_END_DATE {}",
                start_date, end_date
            )));
        }

        Ok(Self::for_range(start_date, end_date))
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new("migration")
            .with_max_attempts(self.max_attempts)
            .with_delay(self.retry_delay)
    }
}

/// Everything the worker binary needs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub run: RunConfig,
    pub storage: S3Config,
    pub provider: TwilioConfig,
}

impl MigrationConfig {
    /// Create config from environment variables.
    pub fn from_env() -> WorkerResult<Self> {
        Ok(Self {
            run: RunConfig::from_env()?,
            storage: S3Config::from_env()?,
            provider: TwilioConfig::from_env()?,
        })
    }
}
