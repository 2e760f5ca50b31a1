//! Normalized output records.
//!
//! A [`NormalizedRecord`] serializes to one JSON object per line. The schema
//! is sparse: optional scalars and lists are skipped when empty, and every
//! constructor in this module refuses empty values, so no key is ever emitted
//! with an empty value.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::kind::RecordType;

/// Top-level keys that a passthrough field must never shadow.
pub const RESERVED_FIELDS: &[&str] = &[
    "DATA_SOURCE",
    "RECORD_TYPE",
    "RECORD_ID",
    "OFAC_ID",
    "PUBLISH_DATE",
    "SDN_TITLE",
    "SDN_REMARKS",
    "SDN_PROGRAM",
    "NAME_LIST",
    "ATTR_LIST",
    "ADDR_LIST",
    "ID_LIST",
    "CALL_SIGN",
    "VESSEL_TYPE",
    "VESSEL_FLAG",
    "VESSEL_OWNER",
    "VESSEL_TONNAGE",
    "VESSEL_GRT",
];

/// Insertion-ordered string map that drops empty keys and values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`. Returns false when the key or value is blank.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        if key.trim().is_empty() || value.trim().is_empty() {
            return false;
        }
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One `NAME_LIST` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NameEntry {
    pub name_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_org: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_last: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_first: Option<String>,
}

impl NameEntry {
    pub const PRIMARY: &'static str = "PRIMARY";

    /// Organization-style name carried in a single field.
    pub fn organization(name_type: impl Into<String>, name: Option<String>) -> Self {
        Self {
            name_type: name_type.into(),
            name_org: name,
            name_last: None,
            name_first: None,
        }
    }

    /// Person-style name split into last and first parts.
    pub fn person(
        name_type: impl Into<String>,
        last: Option<String>,
        first: Option<String>,
    ) -> Self {
        Self {
            name_type: name_type.into(),
            name_org: None,
            name_last: last,
            name_first: first,
        }
    }
}

/// One `ATTR_LIST` item; serializes as a single-key object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Attribute {
    #[serde(rename = "DATE_OF_BIRTH")]
    DateOfBirth(String),
    #[serde(rename = "PLACE_OF_BIRTH")]
    PlaceOfBirth(String),
    #[serde(rename = "NATIONALITY")]
    Nationality(String),
    #[serde(rename = "CITIZENSHIP")]
    Citizenship(String),
}

impl Attribute {
    pub fn key(&self) -> &'static str {
        match self {
            Self::DateOfBirth(_) => "DATE_OF_BIRTH",
            Self::PlaceOfBirth(_) => "PLACE_OF_BIRTH",
            Self::Nationality(_) => "NATIONALITY",
            Self::Citizenship(_) => "CITIZENSHIP",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::DateOfBirth(v)
            | Self::PlaceOfBirth(v)
            | Self::Nationality(v)
            | Self::Citizenship(v) => v,
        }
    }
}

/// One `ADDR_LIST` item holding only the components that were present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr_line3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr_postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr_country: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.component_count() == 0
    }

    pub fn component_count(&self) -> usize {
        [
            &self.addr_line1,
            &self.addr_line2,
            &self.addr_line3,
            &self.addr_city,
            &self.addr_state,
            &self.addr_postal_code,
            &self.addr_country,
        ]
        .iter()
        .filter(|part| part.is_some())
        .count()
    }

    /// True when the country is the only component.
    pub fn is_country_only(&self) -> bool {
        self.addr_country.is_some() && self.component_count() == 1
    }
}

/// Vessel attributes copied onto VESSEL records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VesselFields {
    #[serde(rename = "CALL_SIGN", skip_serializing_if = "Option::is_none")]
    pub call_sign: Option<String>,
    #[serde(rename = "VESSEL_TYPE", skip_serializing_if = "Option::is_none")]
    pub vessel_type: Option<String>,
    #[serde(rename = "VESSEL_FLAG", skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(rename = "VESSEL_OWNER", skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "VESSEL_TONNAGE", skip_serializing_if = "Option::is_none")]
    pub tonnage: Option<String>,
    #[serde(rename = "VESSEL_GRT", skip_serializing_if = "Option::is_none")]
    pub gross_registered_tonnage: Option<String>,
}

/// The output unit: one flat, sparse record per sanctioned party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NormalizedRecord {
    pub data_source: String,
    pub record_type: RecordType,
    pub record_id: String,
    pub ofac_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub publish_date: String,
    #[serde(rename = "SDN_TITLE", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "SDN_REMARKS", skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(rename = "SDN_PROGRAM", skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name_list: Vec<NameEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attr_list: Vec<Attribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addr_list: Vec<Address>,
    /// Unclassified identifiers keyed by their raw type.
    #[serde(flatten)]
    pub passthrough: FieldMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub id_list: Vec<FieldMap>,
    #[serde(flatten)]
    pub vessel: Option<VesselFields>,
}

impl NormalizedRecord {
    /// Creates a record with only the required fields set.
    pub fn new(
        data_source: impl Into<String>,
        record_type: RecordType,
        record_id: impl Into<String>,
        publish_date: impl Into<String>,
    ) -> Self {
        let record_id = record_id.into();
        Self {
            data_source: data_source.into(),
            record_type,
            ofac_id: record_id.clone(),
            record_id,
            publish_date: publish_date.into(),
            title: None,
            remarks: None,
            program: None,
            name_list: Vec::new(),
            attr_list: Vec::new(),
            addr_list: Vec::new(),
            passthrough: FieldMap::new(),
            id_list: Vec::new(),
            vessel: None,
        }
    }

    /// Adds a passthrough field under `raw_key`, appending `_2`, `_3`, ...
    /// when the key is already taken. Returns the key actually used, or
    /// `None` when the key or value is blank.
    pub fn add_passthrough(&mut self, raw_key: &str, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        let base = raw_key.trim();
        if base.is_empty() || value.trim().is_empty() {
            return None;
        }
        let mut key = base.to_string();
        let mut suffix = 1;
        while self.passthrough.contains_key(&key) || RESERVED_FIELDS.contains(&key.as_str()) {
            suffix += 1;
            key = format!("{base}_{suffix}");
        }
        self.passthrough.insert(key.clone(), value);
        Some(key)
    }

    /// Serializes the record as a single JSON line (without the newline).
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
