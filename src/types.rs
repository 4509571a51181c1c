use bytes::Bytes;
use futures_core::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use uuid::Uuid;

use crate::{StoreError, StoreResult};

/// Stream of payload bytes fed into an upload session
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Unique identifier for a stored file
///
/// Used as the foreign key on every chunk record and as the primary key
/// of the file record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(Uuid);

impl FileId {
    /// Generate a new random file ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a file ID from its string representation
    pub fn parse(value: &str) -> StoreResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| StoreError::invalid_id(value))
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for FileId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for FileId {
    type Err = StoreError;

    fn from_str(value: &str) -> StoreResult<Self> {
        Self::parse(value)
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request to store a chunked file
#[derive(Debug, Clone)]
pub struct FilePut {
    pub id: Option<FileId>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub chunk_size: Option<u64>,
    pub attributes: serde_json::Value,
}

impl Default for FilePut {
    fn default() -> Self {
        Self {
            id: None,
            filename: None,
            content_type: None,
            chunk_size: None,
            attributes: serde_json::Value::Null,
        }
    }
}

impl FilePut {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-chosen identifier instead of a generated one
    pub fn with_id(mut self, id: FileId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Override the configured chunk size for this file only
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    pub fn with_attribute<K: Into<String>, V: serde::Serialize>(mut self, key: K, value: V) -> Self {
        if self.attributes.is_null() {
            self.attributes = serde_json::Value::Object(serde_json::Map::new());
        }
        if let Some(obj) = self.attributes.as_object_mut() {
            obj.insert(key.into(), serde_json::to_value(value).unwrap_or(serde_json::Value::Null));
        }
        self
    }

    pub fn with_attributes(mut self, attributes: serde_json::Value) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Status of an upload session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// Accepting feeds
    Active,
    /// File record committed; no further calls accepted
    Finalized,
    /// Chunks deleted; no further calls accepted
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hyphenated_and_simple_forms() {
        let id = FileId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let same = FileId::parse("67e5504410b1426f9247bb680e5fe0c8").unwrap();
        assert_eq!(id, same);
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn rejects_garbage_identifiers() {
        let err = FileId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(err, StoreError::InvalidId { value } if value == "not-a-uuid"));
    }
}
