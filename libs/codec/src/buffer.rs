//! # Session Buffer and Cursor
//!
//! ## Purpose
//!
//! One growable byte buffer and one monotonic offset per encode/decode
//! session. Handlers thread the pair through every call: writes are
//! preceded by an explicit capacity reservation and are then raw, reads
//! are bounds-checked because decode input is untrusted.
//!
//! ## Growth Policy
//!
//! `ensure_capacity` doubles the buffer, with a floor that guarantees at
//! least `requested + 512` bytes of headroom when doubling alone is not
//! enough. The buffer never shrinks; it lives exactly as long as its
//! session.
//!
//! ## Safety Contract
//!
//! `write`/`write_byte` assume the caller reserved space via
//! `ensure_capacity` first. Violating that is a programming error inside
//! this crate and panics rather than corrupting neighbouring data. The
//! read side never panics on short input - it returns a framing error.

use crate::constants::GROWTH_HEADROOM;
use crate::error::{CodecError, CodecResult};

/// Mutable read/write offset for one session.
///
/// Monotonically increasing; exclusively owned by the session that created
/// it. Encode and decode visit fields in identical cursor order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor {
    pos: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset into the session buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor forward by `n` bytes.
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }
}

/// Growable byte region owned by one encode or decode session.
#[derive(Debug)]
pub struct WireBuffer {
    data: Vec<u8>,
}

impl WireBuffer {
    /// Create a zeroed buffer for an encode session.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
        }
    }

    /// Wrap received bytes for a decode session.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Guarantee `[cursor, cursor + additional)` is writable without
    /// further growth. new_size = max(2 × old_size, cursor + additional + 512).
    pub fn ensure_capacity(&mut self, cursor: &Cursor, additional: usize) {
        let need = cursor.position() + additional;
        if need > self.data.len() {
            let grown = (self.data.len() * 2).max(need + GROWTH_HEADROOM);
            self.data.resize(grown, 0);
        }
    }

    /// Raw write at the cursor, advancing it. Caller must have called
    /// `ensure_capacity` for at least `bytes.len()`.
    pub fn write(&mut self, cursor: &mut Cursor, bytes: &[u8]) {
        let start = cursor.position();
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        cursor.advance(bytes.len());
    }

    /// Raw single-byte write at the cursor, advancing it.
    pub fn write_byte(&mut self, cursor: &mut Cursor, byte: u8) {
        self.data[cursor.position()] = byte;
        cursor.advance(1);
    }

    /// Checked read of `len` bytes at the cursor, advancing it. Short
    /// input yields a framing error, never a panic.
    pub fn read(&self, cursor: &mut Cursor, len: usize, context: &'static str) -> CodecResult<&[u8]> {
        let start = cursor.position();
        let end = start
            .checked_add(len)
            .ok_or_else(|| CodecError::truncated(start, len, 0, context))?;
        if end > self.data.len() {
            return Err(CodecError::truncated(
                start,
                len,
                self.data.len().saturating_sub(start),
                context,
            ));
        }
        cursor.advance(len);
        Ok(&self.data[start..end])
    }

    /// Checked single-byte read at the cursor, advancing it.
    pub fn read_byte(&self, cursor: &mut Cursor, context: &'static str) -> CodecResult<u8> {
        let raw = self.read(cursor, 1, context)?;
        Ok(raw[0])
    }

    /// Copy out `[start, end)` - the final encoded output of a session.
    pub fn slice(&self, start: usize, end: usize) -> Vec<u8> {
        self.data[start..end].to_vec()
    }
}
