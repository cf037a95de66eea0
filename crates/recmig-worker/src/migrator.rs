//! Per-recording migration: fetch, upload, delete.

use std::sync::Arc;

use recmig_models::{MigrationOutcome, RecordingItem, MEDIA_CONTENT_TYPE};
use recmig_storage::ObjectStore;
use recmig_twilio::RecordingSource;
use tracing::Instrument;

use crate::error::WorkerResult;
use crate::logging::RecordingLogger;
use crate::retry::{retry_async, RetryConfig};

/// Moves recordings from the provider to the destination store.
///
/// Fetch, upload and delete form a single retry unit: a failure at any step
/// restarts the whole sequence. Re-uploading on a later attempt overwrites
/// the same deterministic key.
#[derive(Clone)]
pub struct RecordingMigrator {
    source: Arc<dyn RecordingSource>,
    store: Arc<dyn ObjectStore>,
    retry: RetryConfig,
}

impl RecordingMigrator {
    pub fn new(
        source: Arc<dyn RecordingSource>,
        store: Arc<dyn ObjectStore>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            source,
            store,
            retry,
        }
    }

    /// Migrate one recording, retrying the full sequence on failure.
    ///
    /// On exhaustion the recording stays at the provider; the destination
    /// object may or may not exist depending on how far the last attempt got.
    pub async fn migrate(&self, item: &RecordingItem) -> MigrationOutcome {
        let logger = RecordingLogger::new(item);
        let config = self
            .retry
            .named(format!("Processing recording {}", item.sid));

        let result = retry_async(&config, |_attempt| self.attempt(item, &logger))
            .instrument(logger.create_span())
            .await;

        if result.is_success() {
            logger.log_migrated(result.attempts());
            MigrationOutcome::Succeeded
        } else {
            MigrationOutcome::FailedAfterRetries
        }
    }

    async fn attempt(&self, item: &RecordingItem, logger: &RecordingLogger) -> WorkerResult<()> {
        let payload = self.source.fetch_media(item).await?;

        let key = item.destination_key();
        self.store
            .put_object(&key, payload, MEDIA_CONTENT_TYPE)
            .await?;
        logger.log_uploaded(self.store.bucket(), &key);

        self.source.delete_recording(&item.sid).await?;
        logger.log_deleted();

        Ok(())
    }
}
