//! The closed set of value kinds the wire codec understands.
//!
//! Every encodable value is one of these variants; the codec dispatches on
//! the variant when encoding and on the wire tag when decoding. There is no
//! open-ended runtime inspection - a value that cannot be expressed here
//! cannot cross the wire.

use std::sync::Arc;

use crate::record::Record;

/// A self-describing wire value.
///
/// Two variants deserve care:
///
/// - `Bytes` and `Sequence` share a wire tag but are distinguished by a
///   discriminator byte and are never interchangeable: a `Bytes` payload is
///   copied verbatim, a `Sequence` re-encodes every element with its own tag.
/// - `Null` is the single absent state. Empty sequences and maps collapse to
///   it on the wire; there is no empty-but-present collection state.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent. Also what empty sequences and maps decode back to.
    #[default]
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    /// A raw byte sequence, copied verbatim on the wire.
    Bytes(Vec<u8>),
    /// An ordered sequence of values, each element individually tagged.
    Sequence(Vec<Value>),
    /// Key-value entries in the caller's iteration order. Round-trip key
    /// order is not guaranteed by the wire design; do not depend on it.
    Map(Vec<(Value, Value)>),
    /// A structured record; payload bytes are the record codec's business.
    Record(Arc<dyn Record>),
}

impl Value {
    /// Wrap a record instance as a value.
    pub fn record(record: impl Record + 'static) -> Self {
        Value::Record(Arc::new(record))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Kind label for diagnostics and error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Sequence(_) => "sequence",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Float32(a), Value::Float32(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Records compare by identity on the wire: same registered name,
            // same payload bytes. A record that fails to serialize compares
            // unequal to everything.
            (Value::Record(a), Value::Record(b)) => {
                a.type_name() == b.type_name()
                    && matches!(
                        (a.to_bytes(), b.to_bytes()),
                        (Ok(left), Ok(right)) if left == right
                    )
            }
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(value: Vec<(Value, Value)>) -> Self {
        Value::Map(value)
    }
}
