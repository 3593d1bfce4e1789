//! Key-value mapping handler.
//!
//! Wire layout: big-endian int32 entry count, then each key and value in
//! turn through the engine, every one carrying its own tag. Null and empty
//! maps collapse to the absent sentinel. Entries go out in the caller's
//! iteration order and come back in wire order - round-trip key ordering
//! is not part of the contract.

use types::Value;

use crate::buffer::{Cursor, WireBuffer};
use crate::constants::ABSENT_SENTINEL;
use crate::engine::{read_value, write_value};
use crate::error::{CodecError, CodecResult};
use crate::primitives::{get_i32, put_i32};
use crate::registry::RecordRegistry;

pub(crate) fn put_map(
    entries: &[(Value, Value)],
    buf: &mut WireBuffer,
    cursor: &mut Cursor,
) -> CodecResult<()> {
    if entries.is_empty() {
        put_i32(ABSENT_SENTINEL, buf, cursor);
        return Ok(());
    }
    put_i32(entries.len() as i32, buf, cursor);
    for (key, value) in entries {
        write_value(key, buf, cursor)?;
        write_value(value, buf, cursor)?;
    }
    Ok(())
}

/// Decode a map payload. Absent and zero counts both yield `Null`.
pub(crate) fn get_map(
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
            "map entry count",
        ));
    }

    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let key = read_value(buf, cursor, registry)?;
        let value = read_value(buf, cursor, registry)?;
        entries.push((key, value));
    }
    Ok(Value::Map(entries))
}
