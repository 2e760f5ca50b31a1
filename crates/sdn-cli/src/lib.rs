#![deny(unsafe_code)]
//! CLI library components for the SDN list mapper.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
