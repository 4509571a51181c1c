//! Streaming MD5 accumulator over flushed chunk payloads.

/// Incremental MD5 state, fed exactly once with each flushed chunk.
///
/// The accumulator never sees buffered-but-unflushed bytes, so the final
/// digest covers the ordered concatenation of all chunk payloads and
/// nothing else.
#[derive(Clone)]
pub struct PayloadDigest {
    context: md5::Context,
}

impl PayloadDigest {
    pub fn new() -> Self {
        Self {
            context: md5::Context::new(),
        }
    }

    /// Absorb the bytes of one flushed chunk
    pub fn update(&mut self, bytes: &[u8]) {
        self.context.consume(bytes);
    }

    /// Finish and render the digest as 32 lowercase hex characters
    pub fn finalize_hex(self) -> String {
        format!("{:x}", self.context.finalize())
    }
}

impl Default for PayloadDigest {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PayloadDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PayloadDigest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_digest() {
        assert_eq!(
            PayloadDigest::new().finalize_hex(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn known_vector() {
        let mut digest = PayloadDigest::new();
        digest.update(b"abc");
        assert_eq!(digest.finalize_hex(), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn digest_is_split_independent() {
        let mut whole = PayloadDigest::new();
        whole.update(b"The quick brown fox jumps over the lazy dog");

        let mut split = PayloadDigest::new();
        split.update(b"The quick brown fox ");
        split.update(b"jumps over ");
        split.update(b"the lazy dog");

        let hex = whole.finalize_hex();
        assert_eq!(hex, split.finalize_hex());
        assert_eq!(hex, "9e107d9d372bb6826bd81d3542a419d6");
    }
}
