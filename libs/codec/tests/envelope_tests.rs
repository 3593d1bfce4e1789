//! # Envelope Integration Tests
//!
//! Construction shapes, markers, append semantics, wire round-trips, and
//! the per-entry confinement of registry misses.

use codec::{
    CodecError, EntryError, Envelope, Record, RecordError, RecordRegistry, Value, WireEncoder,
};

#[derive(Debug, Default, Clone)]
struct DeviceStatus {
    address: String,
}

impl Record for DeviceStatus {
    fn type_name(&self) -> &str {
        "DeviceStatus"
    }

    fn to_bytes(&self) -> Result<Vec<u8>, RecordError> {
        Ok(self.address.clone().into_bytes())
    }

    fn merge_from_bytes(&mut self, payload: &[u8]) -> Result<(), RecordError> {
        self.address = String::from_utf8(payload.to_vec())
            .map_err(|err| RecordError::Decode(err.to_string()))?;
        Ok(())
    }
}

#[test]
fn sequence_source_keys_by_position() {
    let source = Value::Sequence(vec![
        Value::Int32(1),
        Value::Int32(2),
        Value::Int32(3),
        Value::Int32(4),
        Value::Int32(5),
    ]);
    let envelope = Envelope::new(source, None);

    assert_eq!(envelope.len(), 5);
    for (index, entry) in envelope.entries().iter().enumerate() {
        assert_eq!(entry.key(), &Value::Int32(index as i32));
        assert_eq!(entry.value(), &Value::Int32(index as i32 + 1));
        assert!(entry.error().is_none());
    }
}

#[test]
fn map_source_keys_by_map_key() {
    let source = Value::Map(vec![
        (Value::from("one"), Value::Int32(1)),
        (Value::from("two"), Value::Int32(2)),
        (Value::from("three"), Value::Int32(3)),
    ]);
    let envelope = Envelope::new(source, None);

    assert_eq!(envelope.len(), 3);
    for (key, expected) in [("one", 1), ("two", 2), ("three", 3)] {
        let entry = envelope
            .entries()
            .iter()
            .find(|entry| entry.key() == &Value::from(key))
            .unwrap_or_else(|| panic!("missing key {key}"));
        assert_eq!(entry.value(), &Value::Int32(expected));
    }
}

#[test]
fn serialize_deserialize_round_trip() {
    let mut envelope = Envelope::new(Value::from("test data"), Some(EntryError::new("first failed")));
    envelope.push(Value::from("second element"), Value::from("second key"), None);
    envelope.push(Value::Int64(7), Value::Null, None);

    let data = envelope.serialize().unwrap();
    let decoded = Envelope::deserialize(&data, None).unwrap();

    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded.first_value(), Some(&Value::from("test data")));
    assert_eq!(decoded.first_key(), Some(&Value::Null));
    assert_eq!(
        decoded.first_error().map(EntryError::message),
        Some("first failed")
    );
    assert_eq!(decoded.values()[1], &Value::from("second element"));
    assert_eq!(decoded.keys()[1], &Value::from("second key"));
    assert!(decoded.errors()[1].is_none());
    assert_eq!(decoded.values()[2], &Value::Int64(7));
}

#[test]
fn empty_envelope_round_trips() {
    let envelope = Envelope::new(Value::Sequence(Vec::new()), None);
    let data = envelope.serialize().unwrap();
    let decoded = Envelope::deserialize(&data, None).unwrap();
    assert!(decoded.is_empty());
    assert!(decoded.first_value().is_none());
}

#[test]
fn error_only_envelope_round_trips() {
    let envelope = Envelope::from_error("Hello Error");
    let data = envelope.serialize().unwrap();
    let decoded = Envelope::deserialize(&data, None).unwrap();

    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.first_value(), Some(&Value::Null));
    assert_eq!(
        decoded.first_error().map(EntryError::message),
        Some("Hello Error")
    );
}

#[test]
fn markers_do_not_cross_the_wire() {
    let notify = Envelope::notification(Value::from("changed"));
    let replica = Envelope::replica_request(&notify, 2);

    let data = replica.serialize().unwrap();
    let decoded = Envelope::deserialize(&data, None).unwrap();

    // Entries survive; notification/replica markers are local metadata.
    assert_eq!(decoded.values(), notify.values());
    assert!(!decoded.is_notification());
    assert!(!decoded.is_replica_request());
    assert_eq!(decoded.replica(), 0);
}

#[test]
fn records_round_trip_inside_envelopes() {
    let registry = RecordRegistry::new();
    registry.register::<DeviceStatus>();

    let envelope = Envelope::new(
        Value::record(DeviceStatus {
            address: "10.0.0.7".to_owned(),
        }),
        None,
    );
    let data = envelope.serialize().unwrap();
    let decoded = Envelope::deserialize(&data, Some(&registry)).unwrap();

    match decoded.first_value() {
        Some(Value::Record(record)) => {
            assert_eq!(record.type_name(), "DeviceStatus");
            assert_eq!(record.to_bytes().unwrap(), b"10.0.0.7");
        }
        other => panic!("expected record value, got {:?}", other),
    }
}

#[test]
fn registry_miss_is_confined_to_one_entry() {
    let registry = RecordRegistry::new();
    registry.register::<DeviceStatus>();

    let mut envelope = Envelope::new(Value::from("before"), None);
    envelope.push(
        Value::record(DeviceStatus {
            address: "10.0.0.9".to_owned(),
        }),
        Value::from("device"),
        None,
    );
    envelope.push(Value::from("after"), Value::Null, None);

    let data = envelope.serialize().unwrap();

    // Decode with an empty registry: the record entry degrades, siblings survive.
    let empty = RecordRegistry::new();
    let decoded = Envelope::deserialize(&data, Some(&empty)).unwrap();

    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded.values()[0], &Value::from("before"));
    assert_eq!(decoded.values()[2], &Value::from("after"));

    assert_eq!(decoded.values()[1], &Value::Null);
    assert_eq!(decoded.keys()[1], &Value::from("device"));
    let miss = decoded.errors()[1].unwrap_or_else(|| panic!("expected entry error"));
    assert!(miss.message().contains("DeviceStatus"));
    assert!(miss.message().contains("not registered"));
}

#[test]
fn wire_error_message_wins_over_registry_miss() {
    let mut envelope = Envelope::default();
    envelope.push(
        Value::record(DeviceStatus {
            address: "10.0.0.1".to_owned(),
        }),
        Value::Null,
        Some(EntryError::new("upstream failure")),
    );
    let data = envelope.serialize().unwrap();

    let empty = RecordRegistry::new();
    let decoded = Envelope::deserialize(&data, Some(&empty)).unwrap();
    assert_eq!(
        decoded.first_error().map(EntryError::message),
        Some("upstream failure")
    );
}

#[test]
fn malformed_reserved_slot_is_rejected() {
    // Hand-build an envelope frame whose reserved slot is a string
    // instead of the mandated absent value.
    let mut encoder = WireEncoder::new();
    encoder.encode(&Value::Int32(0)).unwrap();
    encoder.encode(&Value::from("unexpected")).unwrap();

    let err = Envelope::deserialize(&encoder.bytes(), None).unwrap_err();
    assert!(matches!(err, CodecError::TypeMismatch { .. }));
}

#[test]
fn malformed_count_kind_is_rejected() {
    let mut encoder = WireEncoder::new();
    encoder.encode(&Value::from("not a count")).unwrap();

    let err = Envelope::deserialize(&encoder.bytes(), None).unwrap_err();
    assert!(matches!(
        err,
        CodecError::TypeMismatch {
            expected: "int32 entry count",
            ..
        }
    ));
}

#[test]
fn append_then_round_trip() {
    let mut base = Envelope::new(Value::from("first"), None);
    let mut extra = Envelope::default();
    extra.push(Value::from("second"), Value::from("k2"), None);
    extra.push(
        Value::from("third"),
        Value::from("k3"),
        Some(EntryError::new("partial")),
    );

    base.append(&extra);
    let decoded = Envelope::deserialize(&base.serialize().unwrap(), None).unwrap();

    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded.keys()[2], &Value::from("k3"));
    assert_eq!(decoded.errors()[2].map(EntryError::message), Some("partial"));
}
