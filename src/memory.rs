//! In-memory sink implementations for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{ChunkRecord, ChunkSink, FileId, FileRecord, FileSink, StoreResult};

/// In-memory chunk sink
///
/// Clones share the same storage, so a handle kept next to the
/// [`FileStore`](crate::FileStore) can observe what the engine wrote.
#[derive(Clone, Default)]
pub struct MemoryChunkSink {
    chunks: Arc<RwLock<Vec<ChunkRecord>>>,
}

impl MemoryChunkSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks belonging to one file, ordered by sequence number
    pub async fn chunks_for(&self, file_id: &FileId) -> Vec<ChunkRecord> {
        let mut matching: Vec<ChunkRecord> = self
            .chunks
            .read()
            .await
            .iter()
            .filter(|chunk| chunk.file_id == *file_id)
            .cloned()
            .collect();
        matching.sort_by_key(|chunk| chunk.n);
        matching
    }

    /// Reassemble a file's payload by concatenating its chunks in order
    pub async fn assemble(&self, file_id: &FileId) -> Vec<u8> {
        let mut payload = Vec::new();
        for chunk in self.chunks_for(file_id).await {
            payload.extend_from_slice(&chunk.data);
        }
        payload
    }

    /// Total chunk records held, across all files
    pub async fn len(&self) -> usize {
        self.chunks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chunks.read().await.is_empty()
    }
}

#[async_trait]
impl ChunkSink for MemoryChunkSink {
    async fn insert(&self, chunk: ChunkRecord) -> StoreResult<()> {
        self.chunks.write().await.push(chunk);
        Ok(())
    }

    async fn delete_for_file(&self, file_id: &FileId) -> StoreResult<()> {
        self.chunks
            .write()
            .await
            .retain(|chunk| chunk.file_id != *file_id);
        Ok(())
    }
}

/// In-memory file record sink
#[derive(Clone, Default)]
pub struct MemoryFileSink {
    files: Arc<RwLock<Vec<FileRecord>>>,
}

impl MemoryFileSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the record stored for one file
    pub async fn get(&self, file_id: &FileId) -> Option<FileRecord> {
        self.files
            .read()
            .await
            .iter()
            .find(|record| record.id == *file_id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

#[async_trait]
impl FileSink for MemoryFileSink {
    async fn insert(&self, record: FileRecord) -> StoreResult<()> {
        self.files.write().await.push(record);
        Ok(())
    }

    async fn delete(&self, file_id: &FileId) -> StoreResult<()> {
        self.files
            .write()
            .await
            .retain(|record| record.id != *file_id);
        Ok(())
    }
}
