//! Namespace-unaware element tree.
//!
//! Element names are stored as local names, so `ofac:sdnEntry` and `sdnEntry`
//! are the same element. Attributes, namespace declarations, comments and
//! processing instructions are dropped. Paths passed to the lookup helpers are
//! slash-separated child names relative to the node, as in `idList/id`.

use std::borrow::Cow;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::Event;

use crate::error::IngestError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Own text content, trimmed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Direct child elements in document order.
    pub fn elements(&self) -> &[XmlNode] {
        &self.children
    }

    /// First node matching `path`, searching every branch in document order.
    pub fn child(&self, path: &str) -> Option<&XmlNode> {
        let steps = split_path(path);
        self.find_first(&steps)
    }

    /// Every node matching `path` in document order.
    pub fn children(&self, path: &str) -> Vec<&XmlNode> {
        let steps = split_path(path);
        let mut found = Vec::new();
        self.collect(&steps, &mut found);
        found
    }

    /// Trimmed text of the first node matching `path`; empty when absent.
    pub fn value(&self, path: &str) -> &str {
        self.child(path).map_or("", XmlNode::text)
    }

    fn find_first(&self, steps: &[&str]) -> Option<&XmlNode> {
        let Some((first, rest)) = steps.split_first() else {
            return Some(self);
        };
        self.children
            .iter()
            .filter(|c| c.name == *first)
            .find_map(|c| c.find_first(rest))
    }

    fn collect<'a>(&'a self, steps: &[&str], found: &mut Vec<&'a XmlNode>) {
        let Some((first, rest)) = steps.split_first() else {
            found.push(self);
            return;
        };
        for child in self.children.iter().filter(|c| c.name == *first) {
            child.collect(rest, found);
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Parses a complete document into its root element.
///
/// `origin` only labels errors.
pub fn parse_xml(source: &str, origin: &Path) -> Result<XmlNode, IngestError> {
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let event = reader.read_event().map_err(|e| IngestError::Xml {
            path: origin.to_path_buf(),
            position: reader.error_position() as u64,
            message: e.to_string(),
        })?;
        match event {
            Event::Start(start) => {
                stack.push(XmlNode::new(lossy(start.local_name().as_ref())));
            }
            Event::Empty(start) => {
                let node = XmlNode::new(lossy(start.local_name().as_ref()));
                attach(&mut stack, &mut root, node);
            }
            Event::End(_) => {
                if let Some(mut node) = stack.pop() {
                    node.text = decode_text(&node.text);
                    attach(&mut stack, &mut root, node);
                }
            }
            Event::Text(text) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&lossy(&text));
                }
            }
            Event::CData(data) => {
                if let Some(node) = stack.last_mut() {
                    // re-escaped so the whole text can be unescaped once at the end tag
                    node.text.push_str(&escape(lossy(&data.into_inner())));
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push('&');
                    node.text.push_str(&lossy(&reference));
                    node.text.push(';');
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(IngestError::Xml {
            path: origin.to_path_buf(),
            position: reader.buffer_position() as u64,
            message: format!("unexpected end of document inside <{}>", open.name),
        });
    }
    root.ok_or_else(|| IngestError::Empty {
        path: origin.to_path_buf(),
    })
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Resolves entity and character references; unknown references are kept.
fn decode_text(raw: &str) -> String {
    match unescape(raw) {
        Ok(text) => text.into_owned(),
        Err(_) => raw.to_string(),
    }
}
