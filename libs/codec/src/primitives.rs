//! Fixed-width primitive handlers.
//!
//! Each handler writes or reads exactly its width at the cursor, big-endian,
//! and advances it. No recursion, no registry. Strings are the one
//! variable-width primitive: a big-endian int32 UTF-8 byte count followed
//! by the bytes; length zero carries no trailing bytes.

use crate::buffer::{Cursor, WireBuffer};
use crate::error::{CodecError, CodecResult};

fn be_array<const N: usize>(raw: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(raw);
    out
}

pub(crate) fn put_bool(value: bool, buf: &mut WireBuffer, cursor: &mut Cursor) {
    buf.ensure_capacity(cursor, 1);
    buf.write_byte(cursor, u8::from(value));
}

pub(crate) fn get_bool(buf: &WireBuffer, cursor: &mut Cursor) -> CodecResult<bool> {
    Ok(buf.read_byte(cursor, "bool payload")? == 1)
}

pub(crate) fn put_i32(value: i32, buf: &mut WireBuffer, cursor: &mut Cursor) {
    buf.ensure_capacity(cursor, 4);
    buf.write(cursor, &value.to_be_bytes());
}

pub(crate) fn get_i32(buf: &WireBuffer, cursor: &mut Cursor) -> CodecResult<i32> {
    let raw = buf.read(cursor, 4, "int32 payload")?;
    Ok(i32::from_be_bytes(be_array(raw)))
}

pub(crate) fn put_i64(value: i64, buf: &mut WireBuffer, cursor: &mut Cursor) {
    buf.ensure_capacity(cursor, 8);
    buf.write(cursor, &value.to_be_bytes());
}

pub(crate) fn get_i64(buf: &WireBuffer, cursor: &mut Cursor) -> CodecResult<i64> {
    let raw = buf.read(cursor, 8, "int64 payload")?;
    Ok(i64::from_be_bytes(be_array(raw)))
}

pub(crate) fn put_f32(value: f32, buf: &mut WireBuffer, cursor: &mut Cursor) {
    buf.ensure_capacity(cursor, 4);
    buf.write(cursor, &value.to_bits().to_be_bytes());
}

pub(crate) fn get_f32(buf: &WireBuffer, cursor: &mut Cursor) -> CodecResult<f32> {
    let raw = buf.read(cursor, 4, "float32 payload")?;
    Ok(f32::from_bits(u32::from_be_bytes(be_array(raw))))
}

pub(crate) fn put_f64(value: f64, buf: &mut WireBuffer, cursor: &mut Cursor) {
    buf.ensure_capacity(cursor, 8);
    buf.write(cursor, &value.to_bits().to_be_bytes());
}

pub(crate) fn get_f64(buf: &WireBuffer, cursor: &mut Cursor) -> CodecResult<f64> {
    let raw = buf.read(cursor, 8, "float64 payload")?;
    Ok(f64::from_bits(u64::from_be_bytes(be_array(raw))))
}

pub(crate) fn put_str(value: &str, buf: &mut WireBuffer, cursor: &mut Cursor) {
    put_i32(value.len() as i32, buf, cursor);
    buf.ensure_capacity(cursor, value.len());
    buf.write(cursor, value.as_bytes());
}

pub(crate) fn get_string(buf: &WireBuffer, cursor: &mut Cursor) -> CodecResult<String> {
    let length_offset = cursor.position();
    let length = get_i32(buf, cursor)?;
    if length < 0 {
        return Err(CodecError::invalid_length(
            length,
            length_offset,
            "string byte length",
        ));
    }
    if length == 0 {
        return Ok(String::new());
    }
    let payload_offset = cursor.position();
    let raw = buf.read(cursor, length as usize, "string payload")?;
    let text = std::str::from_utf8(raw).map_err(|source| CodecError::InvalidUtf8 {
        offset: payload_offset,
        source,
    })?;
    Ok(text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (WireBuffer, Cursor) {
        (WireBuffer::with_capacity(16), Cursor::new())
    }

    #[test]
    fn bool_is_one_byte() {
        let (mut buf, mut cursor) = session();
        put_bool(true, &mut buf, &mut cursor);
        put_bool(false, &mut buf, &mut cursor);
        assert_eq!(cursor.position(), 2);
        assert_eq!(buf.slice(0, 2), vec![0x01, 0x00]);
    }

    #[test]
    fn int32_is_big_endian() {
        let (mut buf, mut cursor) = session();
        put_i32(0x0102_0304, &mut buf, &mut cursor);
        assert_eq!(buf.slice(0, 4), vec![0x01, 0x02, 0x03, 0x04]);

        let mut read = Cursor::new();
        assert_eq!(get_i32(&buf, &mut read).unwrap(), 0x0102_0304);
    }

    #[test]
    fn int64_negative_round_trips() {
        let (mut buf, mut cursor) = session();
        put_i64(-39, &mut buf, &mut cursor);
        assert_eq!(cursor.position(), 8);

        let mut read = Cursor::new();
        assert_eq!(get_i64(&buf, &mut read).unwrap(), -39);
    }

    #[test]
    fn floats_preserve_bits() {
        let (mut buf, mut cursor) = session();
        put_f32(-0.0, &mut buf, &mut cursor);
        put_f64(39.39, &mut buf, &mut cursor);

        let mut read = Cursor::new();
        let f = get_f32(&buf, &mut read).unwrap();
        assert_eq!(f.to_bits(), (-0.0f32).to_bits());
        assert_eq!(get_f64(&buf, &mut read).unwrap(), 39.39);
    }

    #[test]
    fn empty_string_has_no_payload_bytes() {
        let (mut buf, mut cursor) = session();
        put_str("", &mut buf, &mut cursor);
        assert_eq!(cursor.position(), 4);

        let mut read = Cursor::new();
        assert_eq!(get_string(&buf, &mut read).unwrap(), "");
        assert_eq!(read.position(), 4);
    }

    #[test]
    fn negative_string_length_is_framing_error() {
        let (mut buf, mut cursor) = session();
        put_i32(-5, &mut buf, &mut cursor);

        let mut read = Cursor::new();
        let err = get_string(&buf, &mut read).unwrap_err();
        assert!(matches!(err, CodecError::InvalidLength { length: -5, .. }));
    }

    #[test]
    fn invalid_utf8_is_framing_error() {
        let (mut buf, mut cursor) = session();
        put_i32(2, &mut buf, &mut cursor);
        buf.ensure_capacity(&cursor, 2);
        buf.write(&mut cursor, &[0xC3, 0x28]);

        let mut read = Cursor::new();
        let err = get_string(&buf, &mut read).unwrap_err();
        assert!(matches!(err, CodecError::InvalidUtf8 { offset: 4, .. }));
    }
}
