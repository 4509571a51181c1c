use std::sync::Arc;

use bytes::BytesMut;
use futures_util::StreamExt;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    record::COMPUTED_FIELDS, ByteStream, ChunkRecord, ChunkSink, FileId, FileRecord, FileSink,
    PayloadDigest, StoreError, StoreResult, UploadStatus,
};

/// Single-writer chunked upload session
///
/// Feeds append to an internal buffer; whenever the buffer reaches the
/// session's chunk size it is flushed as one chunk record, in sequence
/// order, and the streaming digest is updated with exactly those bytes.
/// The session ends with [`finalize`](Self::finalize) (commits the file
/// record) or [`cancel`](Self::cancel) (deletes every chunk written so
/// far). A session that is simply dropped leaves its already-written
/// chunk records behind; cleaning those up is the caller's job.
pub struct FileUpload {
    chunks: Arc<dyn ChunkSink>,
    files: Arc<dyn FileSink>,
    file_id: FileId,
    chunk_size: u64,
    filename: Option<String>,
    content_type: Option<String>,
    extra: Map<String, Value>,
    buffer: BytesMut,
    length: u64,
    chunk_count: u32,
    digest: PayloadDigest,
    status: UploadStatus,
}

impl FileUpload {
    pub(crate) fn new(
        chunks: Arc<dyn ChunkSink>,
        files: Arc<dyn FileSink>,
        file_id: FileId,
        chunk_size: u64,
        filename: Option<String>,
        content_type: Option<String>,
        extra: Map<String, Value>,
    ) -> Self {
        Self {
            chunks,
            files,
            file_id,
            chunk_size,
            filename,
            content_type,
            extra,
            buffer: BytesMut::with_capacity(chunk_size as usize),
            length: 0,
            chunk_count: 0,
            digest: PayloadDigest::new(),
            status: UploadStatus::Active,
        }
    }

    /// Identifier of the file this session produces
    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    /// Chunk payload size, fixed for the lifetime of the session
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Bytes flushed to the chunk sink so far (buffered bytes not included)
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Chunk records written so far
    pub fn chunk_count(&self) -> u32 {
        self.chunk_count
    }

    /// Bytes currently buffered, always below the chunk size between calls
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    /// Append raw bytes to the session
    ///
    /// Oversized input is split into as many full chunks as fit, each
    /// flushed in order, with only the final remainder left buffered.
    /// Returns the session so feeds can be chained.
    pub async fn feed_bytes<B: AsRef<[u8]>>(&mut self, content: B) -> StoreResult<&mut Self> {
        self.ensure_active("feed_bytes")?;
        self.append(content.as_ref()).await?;
        Ok(self)
    }

    /// Drain a byte stream into the session
    ///
    /// Each item is appended with the same fill-and-flush logic as
    /// [`feed_bytes`](Self::feed_bytes). An empty item that is not
    /// end-of-stream stops the drain rather than spinning on a source
    /// that makes no progress. The trailing partial buffer is left for a
    /// later feed or for finalize.
    pub async fn feed_stream(&mut self, mut source: ByteStream) -> StoreResult<&mut Self> {
        self.ensure_active("feed_stream")?;
        while let Some(read) = source.next().await {
            let bytes = read?;
            if bytes.is_empty() {
                break;
            }
            self.append(&bytes).await?;
        }
        Ok(self)
    }

    /// Flush the trailing partial chunk and commit the file record
    ///
    /// A zero-length file writes no chunk at all and commits a record with
    /// `length = 0` and the MD5 digest of the empty payload. The session
    /// accepts no further feeds afterwards.
    pub async fn finalize(&mut self) -> StoreResult<FileRecord> {
        self.ensure_active("finalize")?;
        self.flush().await?;

        let mut extra = self.extra.clone();
        for field in COMPUTED_FIELDS {
            extra.remove(field);
        }

        let record = FileRecord {
            id: self.file_id,
            upload_date: chrono::Utc::now(),
            filename: self
                .filename
                .clone()
                .unwrap_or_else(|| self.file_id.to_string()),
            content_type: self.content_type.clone(),
            chunk_size: self.chunk_size,
            length: self.length,
            md5: self.digest.clone().finalize_hex(),
            extra,
        };

        self.files
            .insert(record.clone())
            .await?;
        self.status = UploadStatus::Finalized;
        info!(
            "Finalized file {} ({} chunks, {} bytes)",
            self.file_id, self.chunk_count, self.length
        );
        Ok(record)
    }

    /// Discard the buffer and delete everything written for this file
    ///
    /// Removes all chunk records with this session's identifier, then the
    /// file record if one exists. Idempotent; cancelling a session that
    /// never flushed is a no-op success.
    pub async fn cancel(&mut self) -> StoreResult<()> {
        self.buffer.clear();
        self.chunks.delete_for_file(&self.file_id).await?;
        self.files.delete(&self.file_id).await?;
        self.status = UploadStatus::Cancelled;
        info!(
            "Cancelled upload {} ({} chunks discarded)",
            self.file_id, self.chunk_count
        );
        Ok(())
    }

    fn ensure_active(&self, operation: &'static str) -> StoreResult<()> {
        if self.status != UploadStatus::Active {
            return Err(StoreError::session_closed(operation));
        }
        Ok(())
    }

    /// Buffer `content`, flushing one full chunk each time the buffer
    /// reaches capacity. Runs as a loop so a single oversized write cannot
    /// grow the stack.
    async fn append(&mut self, mut content: &[u8]) -> StoreResult<()> {
        let capacity = self.chunk_size as usize;
        loop {
            let free = capacity - self.buffer.len();
            if content.len() > free {
                self.buffer.extend_from_slice(&content[..free]);
                content = &content[free..];
                self.flush().await?;
            } else {
                self.buffer.extend_from_slice(content);
                if self.buffer.len() == capacity {
                    self.flush().await?;
                }
                return Ok(());
            }
        }
    }

    /// Write the buffered bytes as the next chunk record
    ///
    /// An empty buffer writes nothing. The digest sees each flushed byte
    /// exactly once; after a failed insert the buffer is already consumed
    /// and the session must be cancelled, not fed further.
    async fn flush(&mut self) -> StoreResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let data = self.buffer.split().freeze();
        self.digest.update(&data);
        let n = self.chunk_count;
        let len = data.len() as u64;
        self.chunks
            .insert(ChunkRecord {
                file_id: self.file_id,
                n,
                data,
            })
            .await?;
        self.length += len;
        self.chunk_count = n + 1;
        debug!(
            "Flushed chunk {} for file {} ({} bytes)",
            n, self.file_id, len
        );
        Ok(())
    }
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_id", &self.file_id)
            .field("chunk_size", &self.chunk_size)
            .field("length", &self.length)
            .field("chunk_count", &self.chunk_count)
            .field("buffered", &self.buffer.len())
            .field("status", &self.status)
            .finish()
    }
}
