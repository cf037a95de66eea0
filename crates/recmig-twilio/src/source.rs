//! Recording source interface.

use async_trait::async_trait;
use chrono::NaiveDate;
use recmig_models::{RecordingItem, RecordingSid};

use crate::error::TwilioResult;

/// Provider-side store of call recordings.
///
/// Implementations are shared by every in-flight migration and must be safe
/// for concurrent use.
#[async_trait]
pub trait RecordingSource: Send + Sync {
    /// List every recording created on `date`.
    async fn list_recordings(&self, date: NaiveDate) -> TwilioResult<Vec<RecordingItem>>;

    /// Download the full media payload of a recording.
    async fn fetch_media(&self, item: &RecordingItem) -> TwilioResult<Vec<u8>>;

    /// Delete a recording from the provider.
    async fn delete_recording(&self, sid: &RecordingSid) -> TwilioResult<()>;
}
