//! Byte-counting output sink.

use std::io::{self, Write};

/// Wraps the output sink and tracks how many bytes have gone through it, so
/// object offsets can be recorded without seeking.
#[derive(Debug)]
pub struct OffsetWriter<W: Write> {
    inner: W,
    bytes_written: u64,
}

impl<W: Write> OffsetWriter<W> {
    /// Start counting at zero.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Current position, in bytes from the start of the output.
    pub fn position(&self) -> u64 {
        self.bytes_written
    }

    /// Release the wrapped sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for OffsetWriter<W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.bytes_written += written as u64;
        Ok(written)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // On error the count may overshoot; the document is unusable then.
        self.bytes_written += buf.len() as u64;
        self.inner.write_all(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
