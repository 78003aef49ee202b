//! FlateDecode (zlib/deflate) encoder.
//!
//! Uses the flate2 crate for zlib compression.

use crate::encoders::StreamEncoder;
use crate::error::{Error, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

/// FlateDecode filter implementation.
#[derive(Debug, Clone, Copy)]
pub struct FlateEncoder {
    level: Compression,
}

impl Default for FlateEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlateEncoder {
    /// Create an encoder with the default compression level.
    pub fn new() -> Self {
        Self {
            level: Compression::default(),
        }
    }

    /// Create an encoder with a specific level (0-9).
    pub fn with_level(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }
}

impl StreamEncoder for FlateEncoder {
    fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(input.len() / 2 + 64), self.level);
        encoder
            .write_all(input)
            .and_then(|_| encoder.finish())
            .map_err(|e| Error::Encoding {
                filter: self.filter_name().to_string(),
                object: None,
                reason: e.to_string(),
            })
    }

    fn filter_name(&self) -> &str {
        "FlateDecode"
    }
}
