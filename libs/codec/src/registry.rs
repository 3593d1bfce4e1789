//! # Record Type Registry
//!
//! ## Purpose
//!
//! Process-wide mapping from a registered type name to a factory able to
//! produce fresh instances of that type during decode. Encode never needs
//! it - the encode side asks the record itself for its name and payload.
//!
//! ## Concurrency
//!
//! The registry is the only structure shared across sessions and threads.
//! Lookups are lock-free reads; registration is a single atomic
//! insert-or-replace that may race lookups without ever exposing a
//! partially constructed entry. Registration is idempotent per name - a
//! later registration for the same name overwrites the earlier one.

use std::any::TypeId;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};
use types::Record;

use crate::error::{CodecError, CodecResult};

/// Registry entry: everything decode needs to materialize one record type.
#[derive(Debug, Clone)]
pub struct RecordInfo {
    name: String,
    type_id: TypeId,
    type_label: &'static str,
    factory: fn() -> Box<dyn Record>,
}

impl RecordInfo {
    /// Produce a fresh, mutable instance ready for `merge_from_bytes`.
    pub fn new_instance(&self) -> Box<dyn Record> {
        (self.factory)()
    }

    /// The registered wire name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the underlying Rust type, for diagnostics.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified Rust type path, for diagnostics.
    pub fn type_label(&self) -> &'static str {
        self.type_label
    }
}

/// Concurrent name-to-factory map shared by all decode sessions.
///
/// Cloning is cheap and shares the underlying map, so a single registry
/// can be handed to every session in the process.
#[derive(Debug, Clone, Default)]
pub struct RecordRegistry {
    entries: Arc<DashMap<String, Arc<RecordInfo>>>,
}

impl RecordRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its own `type_name`. Returns true when an earlier
    /// registration for the same name was replaced.
    pub fn register<T>(&self) -> bool
    where
        T: Record + Default + 'static,
    {
        let name = T::default().type_name().to_owned();
        let factory: fn() -> Box<dyn Record> = || Box::<T>::default();
        let info = Arc::new(RecordInfo {
            name: name.clone(),
            type_id: TypeId::of::<T>(),
            type_label: std::any::type_name::<T>(),
            factory,
        });

        match self.entries.insert(name.clone(), info) {
            Some(previous) => {
                debug!(
                    name = %name,
                    replaced = previous.type_label(),
                    "record registration overwrote an existing entry"
                );
                true
            }
            None => {
                trace!(name = %name, "registered record type");
                false
            }
        }
    }

    /// Look up the factory for a registered name. A miss is an error,
    /// never a silent `None`.
    pub fn info(&self, name: &str) -> CodecResult<Arc<RecordInfo>> {
        self.entries
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| CodecError::UnregisteredRecord {
                type_name: name.to_owned(),
            })
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered record types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
