//! Entity kinds as published in the source list and as emitted downstream.
//!
//! The source uses `sdnType` strings (`Entity`, `Individual`, `Vessel`,
//! `Aircraft`); the normalized output uses the upper-case record types that
//! entity-resolution engines understand.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a sanctioned party as read from `sdnType`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Organizations, companies and other legal entities.
    Entity,
    /// Natural persons.
    Individual,
    Vessel,
    Aircraft,
    /// Any value the mapper does not recognize, kept verbatim.
    Other(String),
}

impl EntityKind {
    /// Parses a raw `sdnType` value. Matching is exact after trimming.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Entity" => Self::Entity,
            "Individual" => Self::Individual,
            "Vessel" => Self::Vessel,
            "Aircraft" => Self::Aircraft,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the normalized record type, or `None` for unknown kinds.
    pub fn record_type(&self) -> Option<RecordType> {
        match self {
            Self::Entity => Some(RecordType::Organization),
            Self::Individual => Some(RecordType::Person),
            Self::Vessel => Some(RecordType::Vessel),
            Self::Aircraft => Some(RecordType::Aircraft),
            Self::Other(_) => None,
        }
    }

    /// Returns the raw source spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Entity => "Entity",
            Self::Individual => "Individual",
            Self::Vessel => "Vessel",
            Self::Aircraft => "Aircraft",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_individual(&self) -> bool {
        matches!(self, Self::Individual)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized record type emitted as `RECORD_TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    Person,
    Organization,
    Vessel,
    Aircraft,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORGANIZATION",
            Self::Vessel => "VESSEL",
            Self::Aircraft => "AIRCRAFT",
        }
    }

    /// Person and organization records are the core of the list; vessels and
    /// aircraft are only emitted when the run includes every kind.
    pub fn is_core(&self) -> bool {
        matches!(self, Self::Person | Self::Organization)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
