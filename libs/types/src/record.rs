//! The record seam - the contract between the codec and external per-record codecs.
//!
//! The wire format frames structured records but never interprets their
//! payload bytes. A record type brings its own codec by implementing
//! [`Record`]: the registered type name, a `to_bytes` that produces the
//! payload, and a `merge_from_bytes` that populates a fresh instance from
//! one. A protocol-buffer message wrapper satisfies this the same way a
//! hand-rolled format does.

use std::fmt;

use thiserror::Error;

/// Failure inside a record's own codec while producing or consuming its
/// payload bytes. The wire codec wraps these with the record's type name
/// before propagating; the original message is never swallowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The record could not serialize itself to payload bytes.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The record could not populate itself from payload bytes.
    #[error("decode failed: {0}")]
    Decode(String),
}

/// A structured record that can cross the wire.
///
/// Implementors own their payload encoding end to end; the wire codec only
/// frames the bytes with a length and the registered type name. Decode-side
/// instantiation goes through a registry of `Record + Default` types, so the
/// trait must stay object-safe.
///
/// `type_name` must be stable and unique across the process - it is the key
/// the decoding side uses to look up the factory for a fresh instance.
pub trait Record: fmt::Debug + Send + Sync {
    /// The registered wire name of this record type.
    fn type_name(&self) -> &str;

    /// Serialize the record to its payload bytes. A zero-length payload is
    /// legal and round-trips as "present but empty".
    fn to_bytes(&self) -> Result<Vec<u8>, RecordError>;

    /// Populate this (fresh) instance from payload bytes.
    fn merge_from_bytes(&mut self, payload: &[u8]) -> Result<(), RecordError>;
}
