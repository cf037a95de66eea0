//! Shared data models for the call-recording migrator.
//!
//! This crate provides Serde-serializable types for:
//! - Provider recording identifiers and listed recordings
//! - Destination object keys
//! - Inclusive calendar date ranges
//! - Per-item outcomes and run summaries

pub mod date_range;
pub mod outcome;
pub mod recording;

// Re-export common types
pub use date_range::{parse_date, DateRange, DateRangeError, Days, DATE_FORMAT};
pub use outcome::{DaySummary, MigrationOutcome, RunSummary};
pub use recording::{CallSid, DestinationKey, RecordingItem, RecordingSid, MEDIA_CONTENT_TYPE, MEDIA_EXTENSION};
