#![deny(unsafe_code)]
//! SDN list ingestion: XML tree, document access and entity extraction.

pub mod date;
pub mod document;
pub mod error;
pub mod extract;
pub mod xml;

pub use date::{OUTPUT_DATE_FORMAT, format_date};
pub use document::{ENTRY_ELEMENT, PUBLISH_DATE_PATH, ROOT_ELEMENT, SdnDocument};
pub use error::IngestError;
pub use extract::extract_entity;
pub use xml::{XmlNode, parse_xml};
