//! # chunkstore: GridFS-style chunked file storage
//!
//! `chunkstore` splits arbitrary-length binary payloads into fixed-size
//! chunk records, computes a streaming MD5 over the whole payload, and
//! commits a single file-metadata document on completion. It is the
//! "large object split into chunk documents" pattern, packaged as an
//! engine that any document store can sit underneath.
//!
//! ## Key Features
//!
//! - **Streaming-first**: feed bytes in as many calls as you like, or drain
//!   a fallible byte stream; the engine never buffers more than one chunk
//! - **Exactly-once chunk numbering**: chunks are written in order with
//!   dense, zero-based sequence numbers, all sharing the file's identifier
//! - **Split-independent integrity**: the file record's `md5` depends only
//!   on the payload bytes, never on how feeds were sliced
//! - **Storage agnostic**: the engine writes through two small traits
//!   ([`ChunkSink`], [`FileSink`]); in-memory implementations ship for
//!   testing and development
//!
//! ## Quick Start
//!
//! ```rust
//! use chunkstore::prelude::*;
//! use chunkstore::{MemoryChunkSink, MemoryFileSink};
//!
//! # #[tokio::main]
//! # async fn main() -> StoreResult<()> {
//! // 1. Bind the two sink collaborators
//! let chunks = MemoryChunkSink::new();
//! let store = FileStore::new(chunks.clone(), MemoryFileSink::new(), StoreConfig::default());
//!
//! // 2. Open a session and feed bytes across as many calls as needed
//! let mut upload = store
//!     .create_upload(FilePut::new().with_filename("hello.txt"))
//!     .await?;
//! upload.feed_bytes(b"Hello, ").await?;
//! upload.feed_bytes(b"world!").await?;
//!
//! // 3. Finalize to flush the trailing chunk and commit the file record
//! let record = upload.finalize().await?;
//! assert_eq!(record.length, 13);
//! assert_eq!(chunks.chunks_for(&record.id).await.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │    Your Service     │  ← decides what to upload
//! ├─────────────────────┤
//! │      FileStore      │  ← opens upload sessions
//! ├─────────────────────┤
//! │      FileUpload     │  ← buffering, chunking, hashing
//! ├─────────────────────┤
//! │ ChunkSink / FileSink│  ← document-store collaborators
//! └─────────────────────┘
//! ```
//!
//! The engine is infrastructure, not a service. You embed it:
//!
//! ```rust
//! use chunkstore::prelude::*;
//!
//! pub struct AttachmentService {
//!     files: FileStore,
//! }
//!
//! impl AttachmentService {
//!     pub async fn save(&self, name: &str, payload: Vec<u8>) -> StoreResult<String> {
//!         let mut upload = self
//!             .files
//!             .create_upload(FilePut::new().with_filename(name))
//!             .await?;
//!         upload.feed_bytes(payload).await?;
//!         let record = upload.finalize().await?;
//!         Ok(record.md5)
//!     }
//! }
//! ```
//!
//! Every session ends in exactly one of two ways: [`FileUpload::finalize`]
//! commits the file record, [`FileUpload::cancel`] deletes every chunk
//! already written. A session dropped without either leaves orphaned chunk
//! records behind.

mod config;
mod digest;
mod error;
mod memory;
mod record;
pub mod sink;
mod store;
mod types;
mod upload;

// Re-export main types for clean API
pub use config::{StoreConfig, DEFAULT_CHUNK_SIZE};
pub use digest::PayloadDigest;
pub use error::{StoreError, StoreResult};
pub use memory::{MemoryChunkSink, MemoryFileSink};
pub use record::FileRecord;
pub use sink::{ChunkRecord, ChunkSink, FileSink};
pub use store::FileStore;
pub use types::{ByteStream, FileId, FilePut, UploadStatus};
pub use upload::FileUpload;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ByteStream, ChunkSink, FileId, FilePut, FileRecord, FileSink, FileStore, FileUpload,
        StoreConfig, StoreError, StoreResult,
    };
}
