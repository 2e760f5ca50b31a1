#![deny(unsafe_code)]
//! Run statistics and review output.
//!
//! [`StatPack`] gathers observational counters while records are produced;
//! [`write_stats`] and [`save_table`] persist the end-of-run artifacts.

pub mod output;
pub mod stats;

pub use output::{ReportError, WriteOutcome, save_table, try_write_stats, write_stats};
pub use stats::{StatCounter, StatPack};
