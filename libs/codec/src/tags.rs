//! # Type-Kind Tag Protocol
//!
//! A closed enumeration identifying the wire shape that follows. Every
//! encoded value is prefixed with its tag, written as a big-endian int32,
//! so the decoder can pick a handler without external schema.
//!
//! Tag `Record` doubles as the absent/null code: a null value is written
//! as the record tag followed by the absent sentinel, mirroring how the
//! decode side cannot distinguish "null" from "null record" - both decode
//! to the absent value.

use num_enum::TryFromPrimitive;

/// Wire shape of the value that follows the tag.
///
/// The numeric codes are wire format - reordering or renumbering is a
/// protocol break. Decoding a value outside this set fails the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(i32)]
pub enum TypeTag {
    /// Structured record, and the carrier for absent/null via sentinel.
    Record = 0,
    Bool = 1,
    Int32 = 2,
    Int64 = 3,
    Float32 = 4,
    Float64 = 5,
    String = 6,
    /// Ordered sequence or raw byte payload, split by a discriminator byte.
    Sequence = 7,
    Map = 8,
}

impl TypeTag {
    /// Human-readable tag name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Record => "Record",
            TypeTag::Bool => "Bool",
            TypeTag::Int32 => "Int32",
            TypeTag::Int64 => "Int64",
            TypeTag::Float32 => "Float32",
            TypeTag::Float64 => "Float64",
            TypeTag::String => "String",
            TypeTag::Sequence => "Sequence",
            TypeTag::Map => "Map",
        }
    }
}
