//! Whole-document loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::IngestError;
use crate::xml::{XmlNode, parse_xml};

/// Expected root element of the published list.
pub const ROOT_ELEMENT: &str = "sdnList";

/// Element holding one sanctioned party.
pub const ENTRY_ELEMENT: &str = "sdnEntry";

/// Publish date path; the misspelling is the publisher's.
pub const PUBLISH_DATE_PATH: &str = "publshInformation/Publish_Date";

/// A parsed SDN list held fully in memory.
#[derive(Debug, Clone)]
pub struct SdnDocument {
    source: PathBuf,
    root: XmlNode,
}

impl SdnDocument {
    /// Reads and parses `path`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not well-formed XML.
    pub fn load(path: &Path) -> Result<Self, IngestError> {
        let source = fs::read_to_string(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::parse_str(&source, path)?;
        info!(
            path = %path.display(),
            entries = document.entry_count(),
            publish_date = %document.publish_date(),
            "SDN list parsed"
        );
        Ok(document)
    }

    /// Parses an in-memory document; `origin` only labels errors.
    pub fn parse_str(source: &str, origin: &Path) -> Result<Self, IngestError> {
        let root = parse_xml(source, origin)?;
        if root.name() != ROOT_ELEMENT {
            warn!(root = root.name(), "unexpected root element");
        }
        debug!(children = root.elements().len(), "document tree built");
        Ok(Self {
            source: origin.to_path_buf(),
            root,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Publish date exactly as published; empty when absent.
    pub fn publish_date(&self) -> &str {
        self.root.value(PUBLISH_DATE_PATH)
    }

    /// `sdnEntry` nodes in document order.
    pub fn entries(&self) -> impl Iterator<Item = &XmlNode> {
        self.root
            .elements()
            .iter()
            .filter(|node| node.name() == ENTRY_ELEMENT)
    }

    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }
}
