//! Provider recordings and their destination keys.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date_range::DATE_FORMAT;

/// File extension of migrated media objects.
pub const MEDIA_EXTENSION: &str = "mp3";

/// Content type attached to every uploaded media object.
pub const MEDIA_CONTENT_TYPE: &str = "audio/mpeg";

/// Unique identifier of a provider-side recording (e.g. `RE...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordingSid(pub String);

impl RecordingSid {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordingSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the call that owns a recording (e.g. `CA...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallSid(pub String);

impl CallSid {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recording as listed by the provider for one calendar day.
///
/// Immutable once listed. `date` is the day the recording was listed under,
/// not the provider's full creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingItem {
    pub sid: RecordingSid,
    pub call_sid: CallSid,
    /// Provider resource path used to locate the media (e.g. `/2010-04-01/Accounts/AC../Recordings/RE...json`).
    pub uri: String,
    pub date: NaiveDate,
}

impl RecordingItem {
    pub fn new(
        sid: impl Into<String>,
        call_sid: impl Into<String>,
        uri: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            sid: RecordingSid::from_string(sid),
            call_sid: CallSid::from_string(call_sid),
            uri: uri.into(),
            date,
        }
    }

    /// Key under which this recording is stored at the destination.
    pub fn destination_key(&self) -> DestinationKey {
        DestinationKey::for_recording(&self.call_sid, self.date, &self.sid)
    }
}

/// Object key at the destination store: `{callSid}-{YYYY-MM-DD}-{recordingSid}.mp3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationKey(String);

impl DestinationKey {
    /// Derive the key for a recording. Pure and deterministic.
    pub fn for_recording(call_sid: &CallSid, date: NaiveDate, sid: &RecordingSid) -> Self {
        Self(format!(
            "{}-{}-{}.{}",
            call_sid,
            date.format(DATE_FORMAT),
            sid,
            MEDIA_EXTENSION
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
