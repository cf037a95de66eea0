//! Structured per-recording logging.
//!
//! Every migration step logs through a `RecordingLogger` so that lines for
//! one recording share the same fields (recording SID, call SID, date).

use recmig_models::{DestinationKey, RecordingItem, DATE_FORMAT};
use tracing::{info, Span};

/// Logger for one recording's migration lifecycle.
#[derive(Debug, Clone)]
pub struct RecordingLogger {
    recording_sid: String,
    call_sid: String,
    date: String,
}

impl RecordingLogger {
    pub fn new(item: &RecordingItem) -> Self {
        Self {
            recording_sid: item.sid.to_string(),
            call_sid: item.call_sid.to_string(),
            date: item.date.format(DATE_FORMAT).to_string(),
        }
    }

    /// Log that the media was stored at the destination.
    pub fn log_uploaded(&self, bucket: &str, key: &DestinationKey) {
        info!(
            recording_sid = %self.recording_sid,
            bucket = %bucket,
            key = %key,
            "Recording {} copied to S3 as {}", self.recording_sid, key
        );
    }

    /// Log that the provider copy was deleted.
    pub fn log_deleted(&self) {
        info!(
            recording_sid = %self.recording_sid,
            "Recording {} deleted from Twilio", self.recording_sid
        );
    }

    /// Log that the whole migration finished.
    pub fn log_migrated(&self, attempts: u32) {
        info!(
            recording_sid = %self.recording_sid,
            attempts = attempts,
            "Recording {} migrated", self.recording_sid
        );
    }

    /// Create a tracing span carrying the recording's identifiers.
    ///
    /// Retry and client logs emitted inside it inherit the fields.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "recording",
            recording_sid = %self.recording_sid,
            call_sid = %self.call_sid,
            date = %self.date
        )
    }
}
