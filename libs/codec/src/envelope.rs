//! # Envelope Container
//!
//! ## Purpose
//!
//! The unit of exchange above the raw codec: an ordered list of
//! (value, key, error) entries plus notification and replica-request
//! markers. Built from a source value whose shape decides the layout:
//! sequences and maps fan out into one entry per element, anything else
//! becomes a single entry.
//!
//! ## Errors As Data
//!
//! This is the one layer where errors travel as data instead of control
//! flow: each entry carries its own optional error, and a registry miss
//! while decoding one entry's value becomes that entry's error rather
//! than aborting its siblings.
//!
//! Entry errors carry only the message text across the wire. Structured
//! error detail does not survive a round trip; callers must not rely on
//! recovering more than the message.

use thiserror::Error;
use tracing::warn;
use types::Value;

use crate::engine::{WireDecoder, WireEncoder};
use crate::error::{CodecError, CodecResult};
use crate::registry::RecordRegistry;

/// Per-entry error. Carries exactly the message string - any structured
/// detail of the original failure is gone after one serialize/deserialize.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EntryError {
    message: String,
}

impl EntryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One (value, key, error) triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    value: Value,
    key: Value,
    error: Option<EntryError>,
}

impl Entry {
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn key(&self) -> &Value {
        &self.key
    }

    pub fn error(&self) -> Option<&EntryError> {
        self.error.as_ref()
    }
}

/// Ordered entries plus notification/replica-request markers.
///
/// The markers are session metadata, independent of the entries, and are
/// NOT serialized - they describe how a holder should treat the envelope,
/// not what is in it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    entries: Vec<Entry>,
    notification: bool,
    replica_request: bool,
    replica: u8,
}

impl Envelope {
    /// Build an envelope from a source value, shape-polymorphically:
    ///
    /// - `Sequence` → one entry per element, keyed by `Int32` position
    /// - `Map` → one entry per pair, keyed by the map key
    /// - anything else (including `Null`, `Bytes`, records) → one entry
    ///   with a `Null` key
    ///
    /// The error attaches only on the single-entry shapes; fan-out shapes
    /// carry per-entry errors via [`Envelope::push`] instead. An empty
    /// sequence or map source yields an envelope with zero entries.
    pub fn new(source: Value, error: Option<EntryError>) -> Self {
        let mut envelope = Envelope::default();
        match source {
            Value::Sequence(items) => {
                for (index, item) in items.into_iter().enumerate() {
                    envelope.push(item, Value::Int32(index as i32), None);
                }
            }
            Value::Map(entries) => {
                for (key, value) in entries {
                    envelope.push(value, key, None);
                }
            }
            other => envelope.push(other, Value::Null, error),
        }
        envelope
    }

    /// An envelope carrying only an error.
    pub fn from_error(message: impl Into<String>) -> Self {
        Envelope::new(Value::Null, Some(EntryError::new(message)))
    }

    /// An envelope marked as a notification.
    pub fn notification(source: Value) -> Self {
        let mut envelope = Envelope::new(source, None);
        envelope.notification = true;
        envelope
    }

    /// A replica request copied from an existing envelope, addressed to
    /// `replica`. Entries are copied as-is; the source is untouched.
    pub fn replica_request(source: &Envelope, replica: u8) -> Self {
        let mut copy = source.clone();
        copy.replica_request = true;
        copy.replica = replica;
        copy
    }

    /// Append one entry.
    pub fn push(&mut self, value: Value, key: Value, error: Option<EntryError>) {
        self.entries.push(Entry { value, key, error });
    }

    /// Append another envelope's entries in order. Markers are not merged.
    pub fn append(&mut self, other: &Envelope) {
        self.entries.extend(other.entries.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// First entry's value, if any entry exists.
    pub fn first_value(&self) -> Option<&Value> {
        self.entries.first().map(Entry::value)
    }

    pub fn first_key(&self) -> Option<&Value> {
        self.entries.first().map(Entry::key)
    }

    pub fn first_error(&self) -> Option<&EntryError> {
        self.entries.first().and_then(Entry::error)
    }

    /// All values in entry order.
    pub fn values(&self) -> Vec<&Value> {
        self.entries.iter().map(Entry::value).collect()
    }

    /// All keys in entry order.
    pub fn keys(&self) -> Vec<&Value> {
        self.entries.iter().map(Entry::key).collect()
    }

    /// All per-entry errors in entry order, position-preserving.
    pub fn errors(&self) -> Vec<Option<&EntryError>> {
        self.entries.iter().map(Entry::error).collect()
    }

    pub fn is_notification(&self) -> bool {
        self.notification
    }

    pub fn is_replica_request(&self) -> bool {
        self.replica_request
    }

    /// Target replica number; meaningful only when `is_replica_request`.
    pub fn replica(&self) -> u8 {
        self.replica
    }

    /// Serialize to wire bytes: entry count, then per entry the value, the
    /// key, and the error message (empty string = no error), all through
    /// the dispatch engine, followed by one reserved absent slot where a
    /// structured query descriptor would travel. Markers are not written.
    pub fn serialize(&self) -> CodecResult<Vec<u8>> {
        let mut encoder = WireEncoder::new();
        encoder.encode(&Value::Int32(self.entries.len() as i32))?;
        for entry in &self.entries {
            encoder.encode(&entry.value)?;
            encoder.encode(&entry.key)?;
            let message = entry
                .error
                .as_ref()
                .map(|error| error.message().to_owned())
                .unwrap_or_default();
            encoder.encode(&Value::String(message))?;
        }
        encoder.encode(&Value::Null)?;
        Ok(encoder.bytes())
    }

    /// The exact mirror of [`Envelope::serialize`].
    ///
    /// A registry miss on one entry's value is confined to that entry: the
    /// value becomes `Null`, the miss becomes the entry's error, and the
    /// remaining entries still decode. Every other failure aborts.
    pub fn deserialize(data: &[u8], registry: Option<&RecordRegistry>) -> CodecResult<Envelope> {
        let mut decoder = WireDecoder::new(data, registry);

        let count = match decoder.decode()? {
            Value::Int32(count) => count,
            other => {
                return Err(CodecError::type_mismatch(
                    "int32 entry count",
                    other.kind_name(),
                ))
            }
        };
        if count < 0 {
            return Err(CodecError::invalid_length(
                count,
                decoder.position(),
                "envelope entry count",
            ));
        }

        let mut envelope = Envelope::default();
        for _ in 0..count {
            let (value, miss) = match decoder.decode() {
                Ok(value) => (value, None),
                Err(err @ CodecError::UnregisteredRecord { .. }) => {
                    warn!(error = %err, "envelope entry held an unregistered record type");
                    (Value::Null, Some(EntryError::new(err.to_string())))
                }
                Err(err) => return Err(err),
            };
            let key = decoder.decode()?;
            let error = match decoder.decode()? {
                Value::String(message) if message.is_empty() => miss,
                Value::String(message) => Some(EntryError::new(message)),
                other => {
                    return Err(CodecError::type_mismatch(
                        "string error message",
                        other.kind_name(),
                    ))
                }
            };
            envelope.entries.push(Entry { value, key, error });
        }

        // Reserved query-descriptor slot: always absent in this protocol.
        match decoder.decode()? {
            Value::Null => {}
            other => {
                return Err(CodecError::type_mismatch(
                    "absent reserved slot",
                    other.kind_name(),
                ))
            }
        }

        Ok(envelope)
    }
}
