use async_trait::async_trait;
use bytes::Bytes;

use crate::{FileId, FileRecord, StoreResult};

/// One stored segment of an uploaded payload
///
/// `data` is exactly the session's chunk size for every chunk except the
/// final one, which may be shorter. A zero-length file has no chunks at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRecord {
    pub file_id: FileId,
    /// Zero-based position of this chunk within the file
    pub n: u32,
    pub data: Bytes,
}

/// Store collaborator holding chunk records - must perform durable,
/// per-call-atomic inserts
#[async_trait]
pub trait ChunkSink: Send + Sync {
    /// Idempotent preparation hook, invoked once per session creation.
    /// Backends typically ensure the `(file_id, n)` index here.
    async fn prepare(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Append one chunk record
    async fn insert(&self, chunk: ChunkRecord) -> StoreResult<()>;

    /// Remove every chunk belonging to `file_id`. Zero matches is success.
    async fn delete_for_file(&self, file_id: &FileId) -> StoreResult<()>;
}

/// Store collaborator holding file metadata records
#[async_trait]
pub trait FileSink: Send + Sync {
    /// Insert one file record
    async fn insert(&self, record: FileRecord) -> StoreResult<()>;

    /// Remove the file record with this identifier. Zero matches is success.
    async fn delete(&self, file_id: &FileId) -> StoreResult<()>;
}
