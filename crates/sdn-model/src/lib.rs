//! Data model for the SDN list mapper.
//!
//! [`SourceEntity`] is what the extractor reads from one `sdnEntry`;
//! [`NormalizedRecord`] is what the assembler emits for it.

pub mod entity;
pub mod kind;
pub mod record;

pub use entity::{Alias, SourceAddress, SourceEntity, SourceIdentifier, VesselInfo};
pub use kind::{EntityKind, RecordType};
pub use record::{
    Address, Attribute, FieldMap, NameEntry, NormalizedRecord, RESERVED_FIELDS, VesselFields,
};
