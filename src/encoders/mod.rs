//! Stream encoder implementations for PDF filters.
//!
//! Two interchangeable encoders turn raw stream bytes into the bytes written
//! between `stream` and `endstream`:
//! - FlateDecode (zlib/deflate compression)
//! - ASCII85Decode (base-85 text encoding)
//!
//! The filter name reported by an encoder is the `/Filter` value a reader
//! uses to undo it.

use crate::error::Result;

mod ascii85;
mod flate;

pub use ascii85::{Ascii85Decoder, Ascii85Encoder};
pub use flate::FlateEncoder;

/// Trait for PDF stream encoders.
///
/// Encoders may keep scratch state between calls, so `encode` takes
/// `&mut self`; one instance must not be shared by concurrent callers.
pub trait StreamEncoder {
    /// Encode the input data.
    ///
    /// # Returns
    ///
    /// The encoded bytes, or `Error::Encoding` if the encoder failed. A
    /// failure is never reported as an empty payload.
    fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>>;

    /// Get the filter name that reverses this encoding (e.g., "FlateDecode").
    fn filter_name(&self) -> &str;
}

impl<E: StreamEncoder + ?Sized> StreamEncoder for Box<E> {
    fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        (**self).encode(input)
    }

    fn filter_name(&self) -> &str {
        (**self).filter_name()
    }
}
