//! # Wire Value Types
//!
//! Pure data definitions for the self-describing wire codec. This crate
//! holds the closed set of value kinds the codec can carry and the record
//! seam through which external per-record codecs plug in.
//!
//! ## Design Philosophy
//!
//! - **Explicit sum type**: every encodable value is a [`Value`] variant;
//!   encode dispatch is a `match`, not open-ended runtime inspection
//! - **Pure data, no rules**: wire layout, tags, and sentinels live in the
//!   codec crate; this crate never touches bytes
//! - **Opaque record payloads**: structured records serialize through the
//!   [`Record`] trait and the codec only frames the result
//!
//! ## What This Crate Contains
//! - [`Value`]: the sum type over all supported wire kinds
//! - [`Record`]: the external-record-codec contract (name, to-bytes,
//!   merge-from-bytes)
//! - [`RecordError`]: failures inside a record's own codec
//!
//! ## What This Crate Does NOT Contain
//! - Encoding/decoding logic (belongs in the codec crate)
//! - The record registry (belongs in the codec crate)
//! - Transport or envelope semantics

pub mod record;
pub mod value;

pub use record::{Record, RecordError};
pub use value::Value;
