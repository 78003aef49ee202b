//! Error types for the PDF writer.
//!
//! This module defines all error types that can occur while a document is
//! being assembled and written.

use crate::object::ObjectId;
use crate::writer::DocumentState;

/// Result type alias for PDF writer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The output sink could not be opened or written.
    Sink,
    /// An operation was invoked outside its valid lifecycle state.
    State,
    /// A stream encoder failed.
    Encoding,
    /// Caller-supplied data was rejected before anything was written.
    Input,
    /// The object bookkeeping is inconsistent (duplicate or missing offsets).
    Consistency,
}

/// Error types that can occur while writing a PDF document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error on the output sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation not valid in the current lifecycle state
    #[error("Cannot {operation} while the document is {state}")]
    InvalidState {
        /// Name of the rejected operation
        operation: &'static str,
        /// State the document was in
        state: DocumentState,
    },

    /// Stream encoding failed
    #[error("{filter} encoding failed{}: {reason}", object_suffix(.object))]
    Encoding {
        /// Filter name (e.g. "FlateDecode")
        filter: String,
        /// Object whose stream was being encoded, when known
        object: Option<ObjectId>,
        /// Reason reported by the encoder
        reason: String,
    },

    /// Bits per pixel other than 8, 24 or 32
    #[error("Unsupported bits per pixel: {0} (expected 8, 24 or 32)")]
    UnsupportedBitsPerPixel(u32),

    /// Pixel buffer length does not match stride × height
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    PixelBufferSize {
        /// stride × height
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Scanline stride shorter than one packed row
    #[error("Stride {stride} is smaller than the minimum row size {minimum}")]
    InvalidStride {
        /// Stride supplied by the caller
        stride: usize,
        /// width × bytes per pixel
        minimum: usize,
    },

    /// Character that cannot be written into a single-byte text string
    #[error("Character {character:?} at index {index} cannot be encoded in a single byte")]
    UnencodableText {
        /// Offending character
        character: char,
        /// Character index within the string
        index: usize,
    },

    /// NaN or infinite coordinate, color or size
    #[error("Non-finite value passed to {operation}")]
    NonFiniteValue {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// Other invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An object offset was recorded twice
    #[error("Offset for object {0} was already recorded")]
    DuplicateOffset(ObjectId),

    /// Object ids were allocated but never written
    #[error("Objects allocated but never written: {}", format_ids(.0))]
    UnwrittenObjects(Vec<ObjectId>),
}

fn object_suffix(object: &Option<ObjectId>) -> String {
    match object {
        Some(id) => format!(" for object {}", id),
        None => String::new(),
    }
}

fn format_ids(ids: &[ObjectId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Sink,
            Error::InvalidState { .. } => ErrorKind::State,
            Error::Encoding { .. } => ErrorKind::Encoding,
            Error::UnsupportedBitsPerPixel(_)
            | Error::PixelBufferSize { .. }
            | Error::InvalidStride { .. }
            | Error::UnencodableText { .. }
            | Error::NonFiniteValue { .. }
            | Error::InvalidInput(_) => ErrorKind::Input,
            Error::DuplicateOffset(_) | Error::UnwrittenObjects(_) => ErrorKind::Consistency,
        }
    }

    /// Attach the object id to an encoding error that does not carry one yet.
    pub(crate) fn for_object(self, id: ObjectId) -> Self {
        match self {
            Error::Encoding {
                filter,
                object: None,
                reason,
            } => Error::Encoding {
                filter,
                object: Some(id),
                reason,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_error() {
        let err = Error::InvalidState {
            operation: "draw a line",
            state: DocumentState::Closed,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("draw a line"));
        assert!(msg.contains("closed"));
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn test_encoding_error_carries_object() {
        let err = Error::Encoding {
            filter: "FlateDecode".to_string(),
            object: None,
            reason: "out of memory".to_string(),
        }
        .for_object(ObjectId::new(7));
        let msg = format!("{}", err);
        assert!(msg.contains("FlateDecode"));
        assert!(msg.contains("object 7"));
        assert!(msg.contains("out of memory"));
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_for_object_keeps_existing_id() {
        let err = Error::Encoding {
            filter: "FlateDecode".to_string(),
            object: Some(ObjectId::new(3)),
            reason: "boom".to_string(),
        }
        .for_object(ObjectId::new(9));
        assert!(matches!(
            err,
            Error::Encoding {
                object: Some(id),
                ..
            } if id == ObjectId::new(3)
        ));
    }

    #[test]
    fn test_unwritten_objects_error() {
        let err = Error::UnwrittenObjects(vec![ObjectId::new(4), ObjectId::new(6)]);
        let msg = format!("{}", err);
        assert!(msg.contains("4, 6"));
        assert_eq!(err.kind(), ErrorKind::Consistency);
    }

    #[test]
    fn test_input_errors_are_classified() {
        assert_eq!(Error::UnsupportedBitsPerPixel(16).kind(), ErrorKind::Input);
        assert_eq!(
            Error::PixelBufferSize {
                expected: 24,
                actual: 20
            }
            .kind(),
            ErrorKind::Input
        );
        let err = Error::UnencodableText {
            character: '€',
            index: 2,
        };
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_io_error_is_sink_kind() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(err.kind(), ErrorKind::Sink);
        assert!(format!("{}", err).contains("disk full"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
