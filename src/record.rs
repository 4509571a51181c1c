use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::FileId;

/// Field names computed by the engine. Caller-supplied attributes never
/// override these; size and hash accounting must stay trustworthy.
pub(crate) const COMPUTED_FIELDS: [&str; 5] = ["_id", "uploadDate", "chunkSize", "length", "md5"];

/// Metadata document summarizing a completed upload
///
/// Serializes to the persisted shape:
/// `{_id, uploadDate, filename, contentType?, <extra fields>, chunkSize, length, md5}`
/// with `uploadDate` as milliseconds since the epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "_id")]
    pub id: FileId,

    #[serde(rename = "uploadDate", with = "chrono::serde::ts_milliseconds")]
    pub upload_date: DateTime<Utc>,

    pub filename: String,

    #[serde(
        rename = "contentType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,

    #[serde(rename = "chunkSize")]
    pub chunk_size: u64,

    /// Total payload bytes across all chunks
    pub length: u64,

    /// MD5 digest of the full payload, 32 lowercase hex characters
    pub md5: String,

    /// Caller-supplied extra fields merged into the document
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileRecord {
    /// Number of chunk records backing this file
    pub fn chunk_count(&self) -> u64 {
        if self.length == 0 {
            0
        } else {
            (self.length + self.chunk_size - 1) / self.chunk_size
        }
    }

    /// Render the record as a field-name to value mapping
    pub fn document(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
