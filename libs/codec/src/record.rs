//! Structured-record framing handler.
//!
//! The payload bytes belong entirely to the record's own codec; this
//! handler frames them with a length and the registered type name. Wire
//! layout: big-endian int32 payload length (-1 absent, -2 present but
//! zero-length), type name string, payload bytes.
//!
//! On a registry miss the payload is already framed, so the handler skips
//! it before erroring. That leaves the cursor on the next value, letting a
//! containing envelope confine the miss to one entry instead of aborting
//! the whole decode.

use std::sync::Arc;

use types::{Record, Value};

use crate::buffer::{Cursor, WireBuffer};
use crate::constants::{ABSENT_SENTINEL, EMPTY_RECORD_SENTINEL};
use crate::error::{CodecError, CodecResult};
use crate::primitives::{get_i32, get_string, put_i32, put_str};
use crate::registry::RecordRegistry;

pub(crate) fn put_record(
    record: &dyn Record,
    buf: &mut WireBuffer,
    cursor: &mut Cursor,
) -> CodecResult<()> {
    let payload = record
        .to_bytes()
        .map_err(|source| CodecError::record_codec(record.type_name(), source))?;

    if payload.is_empty() {
        put_i32(EMPTY_RECORD_SENTINEL, buf, cursor);
    } else {
        put_i32(payload.len() as i32, buf, cursor);
    }
    put_str(record.type_name(), buf, cursor);
    if !payload.is_empty() {
        buf.ensure_capacity(cursor, payload.len());
        buf.write(cursor, &payload);
    }
    Ok(())
}

/// Write the absent form. Used for `Value::Null`, which shares the record tag.
pub(crate) fn put_absent_record(buf: &mut WireBuffer, cursor: &mut Cursor) {
    put_i32(ABSENT_SENTINEL, buf, cursor);
}

pub(crate) fn get_record(
    buf: &WireBuffer,
    cursor: &mut Cursor,
    registry: Option<&RecordRegistry>,
) -> CodecResult<Value> {
    let length_offset = cursor.position();
    let length = get_i32(buf, cursor)?;
    if length == ABSENT_SENTINEL || length == 0 {
        return Ok(Value::Null);
    }
    if length < EMPTY_RECORD_SENTINEL {
        return Err(CodecError::invalid_length(
            length,
            length_offset,
            "record payload length",
        ));
    }

    let type_name = get_string(buf, cursor)?;

    let registry = match registry {
        Some(registry) => registry,
        None => return Err(CodecError::RegistryRequired { type_name }),
    };

    let info = match registry.info(&type_name) {
        Ok(info) => info,
        Err(err) => {
            // The payload is framed by the length we already read; skip it
            // so the session stays aligned for an enclosing container.
            if length > 0 {
                buf.read(cursor, length as usize, "record payload (skipped)")?;
            }
            return Err(err);
        }
    };

    let mut instance = info.new_instance();
    if length == EMPTY_RECORD_SENTINEL {
        return Ok(Value::Record(Arc::from(instance)));
    }

    let payload = buf.read(cursor, length as usize, "record payload")?;
    instance
        .merge_from_bytes(payload)
        .map_err(|source| CodecError::record_codec(type_name, source))?;
    Ok(Value::Record(Arc::from(instance)))
}
