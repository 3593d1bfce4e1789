//! Ordered-sequence handler.
//!
//! Wire layout: big-endian int32 count, then - only when count > 0 - one
//! discriminator byte and either the raw bytes verbatim or that many
//! individually tagged elements. Null and zero-length sequences collapse
//! to the absent sentinel with nothing after it.
//!
//! A raw byte payload and a sequence of byte-valued integers share the
//! sequence tag but are never interchangeable: only the raw form uses
//! discriminator 1 and a verbatim copy.

use types::Value;

use crate::buffer::{Cursor, WireBuffer};
use crate::constants::{ABSENT_SENTINEL, ELEMENTS_DISCRIMINATOR, RAW_BYTES_DISCRIMINATOR};
use crate::engine::{read_value, write_value};
use crate::error::{CodecError, CodecResult};
use crate::primitives::{get_i32, put_i32};
use crate::registry::RecordRegistry;

/// Encode a raw byte payload: count, discriminator 1, bytes verbatim.
pub(crate) fn put_bytes(bytes: &[u8], buf: &mut WireBuffer, cursor: &mut Cursor) {
    if bytes.is_empty() {
        put_i32(ABSENT_SENTINEL, buf, cursor);
        return;
    }
    put_i32(bytes.len() as i32, buf, cursor);
    buf.ensure_capacity(cursor, 1 + bytes.len());
    buf.write_byte(cursor, RAW_BYTES_DISCRIMINATOR);
    buf.write(cursor, bytes);
}

/// Encode an element sequence: count, discriminator 0, each element
/// re-dispatched through the engine with its own tag.
pub(crate) fn put_sequence(
    items: &[Value],
    buf: &mut WireBuffer,
    cursor: &mut Cursor,
) -> CodecResult<()> {
    if items.is_empty() {
        put_i32(ABSENT_SENTINEL, buf, cursor);
        return Ok(());
    }
    put_i32(items.len() as i32, buf, cursor);
    buf.ensure_capacity(cursor, 1);
    buf.write_byte(cursor, ELEMENTS_DISCRIMINATOR);
    for item in items {
        write_value(item, buf, cursor)?;
    }
    Ok(())
}

/// Decode a sequence payload into `Bytes` or `Sequence` per the
/// discriminator. Absent and zero counts both yield `Null`.
pub(crate) fn get_bytes_or_sequence(
    buf: &WireBuffer,
    cursor: &mut Cursor,
    registry: Option<&RecordRegistry>,
) -> CodecResult<Value> {
    let count_offset = cursor.position();
    let count = get_i32(buf, cursor)?;
    if count == ABSENT_SENTINEL || count == 0 {
        return Ok(Value::Null);
    }
    if count < 0 {
        return Err(CodecError::invalid_length(
            count,
            count_offset,
            "sequence element count",
        ));
    }

    let discriminator_offset = cursor.position();
    match buf.read_byte(cursor, "sequence discriminator")? {
        RAW_BYTES_DISCRIMINATOR => {
            let raw = buf.read(cursor, count as usize, "raw byte payload")?;
            Ok(Value::Bytes(raw.to_vec()))
        }
        ELEMENTS_DISCRIMINATOR => {
            let mut items = Vec::with_capacity(count as usize);
            for _ in 0..count {
                items.push(read_value(buf, cursor, registry)?);
            }
            Ok(Value::Sequence(items))
        }
        found => Err(CodecError::InvalidDiscriminator {
            found,
            offset: discriminator_offset,
        }),
    }
}
