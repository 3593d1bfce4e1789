//! # Wire Protocol Constants
//!
//! Central registry of wire-level constants. These values define the byte
//! layout of every encoded value and must remain stable for backward
//! compatibility: a sentinel or discriminator change is a wire break.

/// Length sentinel meaning "absent". Null values, empty sequences, and
/// empty maps all collapse to this single code on the wire - there is no
/// separate empty-but-present collection state.
pub const ABSENT_SENTINEL: i32 = -1;

/// Record-length sentinel meaning "present, but the record's payload
/// serialized to zero bytes". Distinct from [`ABSENT_SENTINEL`]: decoding
/// it yields a fresh instance rather than null.
pub const EMPTY_RECORD_SENTINEL: i32 = -2;

/// Sequence discriminator: the count bytes that follow are a raw byte
/// payload, copied verbatim.
pub const RAW_BYTES_DISCRIMINATOR: u8 = 1;

/// Sequence discriminator: count individually tagged elements follow.
pub const ELEMENTS_DISCRIMINATOR: u8 = 0;

/// Initial buffer size for an encode session. Typical messages fit without
/// growth; larger ones double from here.
pub const INITIAL_SESSION_CAPACITY: usize = 1024;

/// Extra headroom added when doubling alone cannot satisfy a write.
pub const GROWTH_HEADROOM: usize = 512;
