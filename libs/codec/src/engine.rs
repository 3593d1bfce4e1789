//! # Dispatch Engine - Encode/Decode Sessions
//!
//! ## Purpose
//!
//! Top-level entry point for turning a [`Value`] into tagged bytes and
//! back. One session owns one buffer and one cursor (and, on decode, an
//! optional registry reference); handlers recurse through the session
//! state for nested values.
//!
//! ## Dispatch
//!
//! Encode switches on the value variant, writes the matching tag, then
//! delegates to the handler. Null is carried on the record tag with the
//! absent sentinel. Decode reads the tag and dispatches to the same
//! handler; an unrecognized tag fails the session.
//!
//! ## Architecture Role
//!
//! ```text
//! Caller Value → [WireEncoder] → tagged bytes → [WireDecoder] → Value
//!       ↑             ↓                               ↓            ↑
//!   Sum Type    Tag + Handler                  Tag Dispatch   Registry
//!   Variants    Recursion                      Recursion      (records)
//! ```

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use types::Value;

use crate::buffer::{Cursor, WireBuffer};
use crate::constants::INITIAL_SESSION_CAPACITY;
use crate::error::{CodecError, CodecResult};
use crate::map::{get_map, put_map};
use crate::primitives::{
    get_bool, get_f32, get_f64, get_i32, get_i64, get_string, put_bool, put_f32, put_f64, put_i32,
    put_i64, put_str,
};
use crate::record::{get_record, put_absent_record, put_record};
use crate::registry::RecordRegistry;
use crate::sequence::{get_bytes_or_sequence, put_bytes, put_sequence};
use crate::tags::TypeTag;

fn put_tag(tag: TypeTag, buf: &mut WireBuffer, cursor: &mut Cursor) {
    put_i32(tag as i32, buf, cursor);
}

/// Encode one value at the session cursor: tag first, then the payload via
/// the matching handler. Complex handlers re-enter for nested values.
pub(crate) fn write_value(
    value: &Value,
    buf: &mut WireBuffer,
    cursor: &mut Cursor,
) -> CodecResult<()> {
    match value {
        Value::Null => {
            put_tag(TypeTag::Record, buf, cursor);
            put_absent_record(buf, cursor);
            Ok(())
        }
        Value::Bool(v) => {
            put_tag(TypeTag::Bool, buf, cursor);
            put_bool(*v, buf, cursor);
            Ok(())
        }
        Value::Int32(v) => {
            put_tag(TypeTag::Int32, buf, cursor);
            put_i32(*v, buf, cursor);
            Ok(())
        }
        Value::Int64(v) => {
            put_tag(TypeTag::Int64, buf, cursor);
            put_i64(*v, buf, cursor);
            Ok(())
        }
        Value::Float32(v) => {
            put_tag(TypeTag::Float32, buf, cursor);
            put_f32(*v, buf, cursor);
            Ok(())
        }
        Value::Float64(v) => {
            put_tag(TypeTag::Float64, buf, cursor);
            put_f64(*v, buf, cursor);
            Ok(())
        }
        Value::String(v) => {
            put_tag(TypeTag::String, buf, cursor);
            put_str(v, buf, cursor);
            Ok(())
        }
        Value::Bytes(v) => {
            put_tag(TypeTag::Sequence, buf, cursor);
            put_bytes(v, buf, cursor);
            Ok(())
        }
        Value::Sequence(items) => {
            put_tag(TypeTag::Sequence, buf, cursor);
            put_sequence(items, buf, cursor)
        }
        Value::Map(entries) => {
            put_tag(TypeTag::Map, buf, cursor);
            put_map(entries, buf, cursor)
        }
        Value::Record(record) => {
            put_tag(TypeTag::Record, buf, cursor);
            put_record(record.as_ref(), buf, cursor)
        }
    }
}

/// Decode one value at the session cursor: read the tag, dispatch to the
/// matching handler, propagate its errors as session failures.
pub(crate) fn read_value(
    buf: &WireBuffer,
    cursor: &mut Cursor,
    registry: Option<&RecordRegistry>,
) -> CodecResult<Value> {
    let tag_offset = cursor.position();
    let raw = get_i32(buf, cursor)?;
    let tag = TypeTag::try_from(raw).map_err(|_| CodecError::UnknownTag {
        tag: raw,
        offset: tag_offset,
    })?;

    match tag {
        TypeTag::Bool => Ok(Value::Bool(get_bool(buf, cursor)?)),
        TypeTag::Int32 => Ok(Value::Int32(get_i32(buf, cursor)?)),
        TypeTag::Int64 => Ok(Value::Int64(get_i64(buf, cursor)?)),
        TypeTag::Float32 => Ok(Value::Float32(get_f32(buf, cursor)?)),
        TypeTag::Float64 => Ok(Value::Float64(get_f64(buf, cursor)?)),
        TypeTag::String => Ok(Value::String(get_string(buf, cursor)?)),
        TypeTag::Sequence => get_bytes_or_sequence(buf, cursor, registry),
        TypeTag::Map => get_map(buf, cursor, registry),
        TypeTag::Record => get_record(buf, cursor, registry),
    }
}

/// One encode session: buffer + cursor. Encode never needs a registry.
#[derive(Debug)]
pub struct WireEncoder {
    buffer: WireBuffer,
    cursor: Cursor,
}

impl WireEncoder {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_SESSION_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: WireBuffer::with_capacity(capacity),
            cursor: Cursor::new(),
        }
    }

    /// Append one tagged value. May be called repeatedly; values land at
    /// strictly increasing offsets.
    pub fn encode(&mut self, value: &Value) -> CodecResult<()> {
        write_value(value, &mut self.buffer, &mut self.cursor)
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Copy out the encoded range - the session result.
    pub fn bytes(&self) -> Vec<u8> {
        self.buffer.slice(0, self.cursor.position())
    }

    /// The encoded range as portable ASCII text for text transports.
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(self.bytes())
    }
}

impl Default for WireEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// One decode session: buffer + cursor + optional registry reference.
///
/// The registry is only consulted when a structured record is
/// encountered; sessions that never see one may be built without it.
#[derive(Debug)]
pub struct WireDecoder<'a> {
    buffer: WireBuffer,
    cursor: Cursor,
    registry: Option<&'a RecordRegistry>,
}

impl<'a> WireDecoder<'a> {
    pub fn new(data: impl Into<Vec<u8>>, registry: Option<&'a RecordRegistry>) -> Self {
        Self {
            buffer: WireBuffer::from_vec(data.into()),
            cursor: Cursor::new(),
            registry,
        }
    }

    /// Decode the next tagged value.
    pub fn decode(&mut self) -> CodecResult<Value> {
        read_value(&self.buffer, &mut self.cursor, self.registry)
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Bytes left in the session input.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor.position())
    }
}

/// Encode a single value to bytes in one call.
pub fn encode_value(value: &Value) -> CodecResult<Vec<u8>> {
    let mut encoder = WireEncoder::new();
    encoder.encode(value)?;
    Ok(encoder.bytes())
}

/// Decode a single value from bytes in one call. Pass a registry whenever
/// the input may contain structured records.
pub fn decode_value(data: &[u8], registry: Option<&RecordRegistry>) -> CodecResult<Value> {
    WireDecoder::new(data, registry).decode()
}

/// Encode bytes as portable ASCII text. Boundary helper only - the wire
/// format itself is binary.
pub fn to_base64(data: &[u8]) -> String {
    BASE64_STANDARD.encode(data)
}

/// Decode Base64 text back to wire bytes. Malformed text fails with
/// [`CodecError::InvalidBase64`], distinct from any framing error.
pub fn from_base64(text: &str) -> CodecResult<Vec<u8>> {
    Ok(BASE64_STANDARD.decode(text)?)
}
