/// Chunk payload size used when nothing else is configured: 255 KiB,
/// the conventional GridFS default.
pub const DEFAULT_CHUNK_SIZE: u64 = 255 * 1024;

/// Configuration for a file store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Chunk payload size (bytes) for sessions that do not override it.
    /// Fixed per session once an upload is created.
    pub default_chunk_size: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl StoreConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default chunk size
    pub fn with_default_chunk_size(mut self, bytes: u64) -> Self {
        self.default_chunk_size = bytes;
        self
    }
}
