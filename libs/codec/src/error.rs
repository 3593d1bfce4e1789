//! Protocol-level errors for wire value processing
//!
//! Provides comprehensive error handling for the wire codec, including
//! detailed context for debugging and monitoring. Each error variant
//! includes specific information about what went wrong and what was
//! expected.

use thiserror::Error;
use types::RecordError;

/// Wire codec errors with diagnostic context
///
/// A session (one encode or decode call) stops at the first error; no
/// partially written or partially decoded result is ever returned. Framing
/// and type-mismatch errors are fatal to the session. A registry miss is
/// fatal to the decode call that hit it, but the envelope layer catches it
/// and turns it into per-entry data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// Decode input ended before the declared data - truncated or corrupt frame
    #[error("buffer truncated at offset {offset}: need {need} bytes, {available} available (context: {context})")]
    Truncated {
        offset: usize,
        need: usize,
        available: usize,
        context: &'static str,
    },

    /// Type tag value is not part of the wire protocol
    #[error("unknown type tag {tag} at offset {offset}: valid tags are 0-8")]
    UnknownTag { tag: i32, offset: usize },

    /// A length or count field holds a value outside its legal range
    #[error("invalid length {length} at offset {offset} (context: {context})")]
    InvalidLength {
        length: i32,
        offset: usize,
        context: &'static str,
    },

    /// Sequence discriminator byte is neither raw-bytes nor elements
    #[error("invalid sequence discriminator {found:#04x} at offset {offset}: expected 0x00 (elements) or 0x01 (raw bytes)")]
    InvalidDiscriminator { found: u8, offset: usize },

    /// String payload is not valid UTF-8
    #[error("invalid utf-8 in string payload at offset {offset}: {source}")]
    InvalidUtf8 {
        offset: usize,
        source: std::str::Utf8Error,
    },

    /// The wire held a different kind than the containing format requires
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Decode encountered a record type name with no registered factory
    #[error("record type {type_name:?} is not registered - register it before decoding")]
    UnregisteredRecord { type_name: String },

    /// A record was encountered in a decode session created without a registry
    #[error("registry required to decode record {type_name:?}, but none was provided to this session")]
    RegistryRequired { type_name: String },

    /// The record's own codec failed; wrapped with the type name, never swallowed
    #[error("record codec failed for {type_name}: {source}")]
    RecordCodec {
        type_name: String,
        source: RecordError,
    },

    /// Text at the transport boundary is not valid Base64. Distinct from
    /// framing errors: the bytes never reached the decoder.
    #[error("invalid base64 text: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

impl CodecError {
    /// Create a Truncated error for a read past the end of the input.
    pub fn truncated(
        offset: usize,
        need: usize,
        available: usize,
        context: &'static str,
    ) -> Self {
        Self::Truncated {
            offset,
            need,
            available,
            context,
        }
    }

    /// Create an InvalidLength error for an out-of-range length or count.
    pub fn invalid_length(length: i32, offset: usize, context: &'static str) -> Self {
        Self::InvalidLength {
            length,
            offset,
            context,
        }
    }

    /// Create a TypeMismatch error for a wire shape contract violation.
    pub fn type_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    /// Wrap a record codec failure with the record's type name.
    pub fn record_codec(type_name: impl Into<String>, source: RecordError) -> Self {
        Self::RecordCodec {
            type_name: type_name.into(),
            source,
        }
    }
}

/// Result type for codec operations
pub type CodecResult<T> = std::result::Result<T, CodecError>;
