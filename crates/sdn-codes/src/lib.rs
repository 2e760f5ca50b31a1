#![deny(unsafe_code)]
//! Code classification table.
//!
//! Maps raw `(type, code)` strings from the source feed onto normalized
//! attributes. Unknown codes are added as pending rows so a curator can map
//! them; the table is saved back sorted, with usage statistics, after a run.

mod csv_utils;
pub mod entry;
pub mod error;
pub mod sample;
pub mod states;
pub mod table;

pub use entry::{
    Classification, CodeEntry, EntryStats, NULL_EXAMPLE, ReviewFlag, TOP_EXAMPLE_COLUMNS,
};
pub use error::CodeTableError;
pub use sample::{ExampleSample, Observation};
pub use states::StateTable;
pub use table::{
    CodeTable, DEFAULT_EXAMPLE_CAP, DEFAULT_SAMPLE_SEED, ID_COUNTRY, ID_TYPE, TableOptions,
    table_headers,
};
