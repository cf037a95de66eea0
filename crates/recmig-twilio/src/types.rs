//! Twilio REST API wire types.

use chrono::NaiveDate;
use recmig_models::RecordingItem;
use serde::Deserialize;

/// One page of `GET /Accounts/{sid}/Recordings.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingPage {
    #[serde(default)]
    pub recordings: Vec<RecordingResource>,
    /// Relative URI of the next page; absent or null on the last page.
    #[serde(default)]
    pub next_page_uri: Option<String>,
}

/// Key segment used when a recording carries no call SID.
pub const MISSING_CALL_SID: &str = "null";

/// A recording resource as returned by the API.
///
/// `call_sid` and `uri` are nullable in the API schema.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingResource {
    pub sid: String,
    #[serde(default)]
    pub call_sid: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl RecordingResource {
    /// Convert to a listed item under the day it was queried for.
    ///
    /// Returns `None` without a `uri`, since there is no media to fetch. A
    /// missing call SID becomes [`MISSING_CALL_SID`] in the key.
    pub fn into_item(self, date: NaiveDate) -> Option<RecordingItem> {
        let uri = self.uri.filter(|u| !u.is_empty())?;
        let call_sid = self
            .call_sid
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| MISSING_CALL_SID.to_string());
        Some(RecordingItem::new(self.sid, call_sid, uri, date))
    }
}
