use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    ChunkSink, FileId, FilePut, FileSink, FileUpload, StoreConfig, StoreError, StoreResult,
};

/// The main file store adapter - binds the two sink collaborators and the
/// configuration, and opens upload sessions against them
pub struct FileStore {
    chunks: Arc<dyn ChunkSink>,
    files: Arc<dyn FileSink>,
    config: StoreConfig,
}

impl FileStore {
    /// Create a new file store
    pub fn new<C, F>(chunks: C, files: F, config: StoreConfig) -> Self
    where
        C: ChunkSink + 'static,
        F: FileSink + 'static,
    {
        Self {
            chunks: Arc::new(chunks),
            files: Arc::new(files),
            config,
        }
    }

    /// Open a fresh upload session
    ///
    /// Resolves the file identifier (explicit id, then an `"_id"` string
    /// attribute, then a generated one) and the chunk size (per-file
    /// override or the configured default). Invokes the chunk sink's
    /// idempotent `prepare` hook before any bytes are accepted.
    pub async fn create_upload(&self, put: FilePut) -> StoreResult<FileUpload> {
        let FilePut {
            id,
            filename,
            content_type,
            chunk_size,
            attributes,
        } = put;

        let mut extra = match attributes {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => {
                return Err(StoreError::invalid_config(
                    "file attributes must be a JSON object",
                ))
            }
        };

        // An "_id" attribute may carry a caller-chosen identifier; an
        // explicit FilePut id always wins over it.
        let supplied = extra.remove("_id");
        let file_id = match id {
            Some(id) => id,
            None => match supplied {
                Some(Value::String(value)) => FileId::parse(&value)?,
                Some(other) => return Err(StoreError::invalid_id(other.to_string())),
                None => FileId::new(),
            },
        };

        let filename = filename.or_else(|| take_string(&mut extra, "filename"));
        let content_type = content_type.or_else(|| take_string(&mut extra, "contentType"));

        let chunk_size = chunk_size.unwrap_or(self.config.default_chunk_size);
        if chunk_size == 0 {
            return Err(StoreError::invalid_config(
                "chunk size must be a positive byte count",
            ));
        }

        self.chunks.prepare().await?;

        debug!(
            "Opened upload session {} (chunk size {} bytes)",
            file_id, chunk_size
        );

        Ok(FileUpload::new(
            Arc::clone(&self.chunks),
            Arc::clone(&self.files),
            file_id,
            chunk_size,
            filename,
            content_type,
            extra,
        ))
    }

    /// Get configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

/// Remove `key` from the map when it holds a string, leaving any other
/// value type in place.
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !matches!(map.get(key), Some(Value::String(_))) {
        return None;
    }
    match map.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}
