#![deny(unsafe_code)]
//! Normalized record assembly.

pub mod assemble;

pub use assemble::{
    AssembledRecord, AssemblerOptions, AssemblyOutcome, DEFAULT_ALIAS_TYPE, DEFAULT_DATA_SOURCE,
    IdentifierNote, RecordAssembler, UNMAPPED_ID_CATEGORY, alias_name_type,
};
