//! Destination store interface.

use async_trait::async_trait;
use recmig_models::DestinationKey;

use crate::error::StorageResult;

/// Object store that migrated recordings are written to.
///
/// Writes overwrite any existing object at the same key. Implementations are
/// shared by every in-flight migration and must be safe for concurrent use.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` at `key` with the given content type.
    async fn put_object(
        &self,
        key: &DestinationKey,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Bucket the store writes into, for logging.
    fn bucket(&self) -> &str;
}
