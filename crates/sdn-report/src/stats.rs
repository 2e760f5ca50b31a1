//! StatPack: observational field and value counters.
//!
//! Counts are informational only. Each counter keeps a handful of example
//! values so a reviewer can see what a field typically holds.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;

use sdn_codes::ExampleSample;
use sdn_model::{NormalizedRecord, RecordType};
use sdn_transform::AssembledRecord;

pub const RECORD_TYPE: &str = "!RECORD_TYPE";
pub const UNKNOWN_RECORD_TYPE: &str = "!UNKNOWN_RECORD_TYPE";
pub const FILTERED_RECORD_TYPE: &str = "!FILTERED_RECORD_TYPE";
pub const MISSING_UID: &str = "!MISSING_UID";
pub const ADDRESS: &str = "!ADDRESS";
pub const ID_TYPE: &str = "!ID_TYPE";

pub const ADDRESS_COUNTRY_ONLY: &str = "country only";
pub const ADDRESS_UNTYPED: &str = "UNTYPED";

/// Examples kept per counter.
pub const STAT_EXAMPLE_CAP: usize = 5;

/// Leading examples that are never replaced once the counter is full.
pub const STAT_PROTECTED_EXAMPLES: usize = 2;

const STATS_SEED: u64 = 0x0FAC_57A7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCounter {
    pub count: u64,
    pub examples: ExampleSample,
}

impl StatCounter {
    fn new() -> Self {
        Self {
            count: 0,
            examples: ExampleSample::new(STAT_EXAMPLE_CAP).with_protected(STAT_PROTECTED_EXAMPLES),
        }
    }
}

impl Serialize for StatCounter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let with_examples = !self.examples.is_empty();
        let mut map = serializer.serialize_map(Some(1 + usize::from(with_examples)))?;
        map.serialize_entry("count", &self.count)?;
        if with_examples {
            let examples: Vec<&str> = self.examples.iter().map(|(value, _)| value).collect();
            map.serialize_entry("examples", &examples)?;
        }
        map.end()
    }
}

/// Two-level counter tree: category → subcategory → counter.
#[derive(Debug, Clone)]
pub struct StatPack {
    categories: BTreeMap<String, BTreeMap<String, StatCounter>>,
    rng: StdRng,
}

impl Default for StatPack {
    fn default() -> Self {
        Self::new()
    }
}

impl StatPack {
    pub fn new() -> Self {
        Self::with_seed(STATS_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            categories: BTreeMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Counts one occurrence under `category`/`subcategory`.
    pub fn record(&mut self, category: &str, subcategory: &str, example: Option<&str>) {
        let counter = self
            .categories
            .entry(category.to_string())
            .or_default()
            .entry(subcategory.to_string())
            .or_insert_with(StatCounter::new);
        counter.count += 1;
        if let Some(example) = example {
            counter.examples.observe(example, &mut self.rng);
        }
    }

    pub fn counter(&self, category: &str, subcategory: &str) -> Option<&StatCounter> {
        self.categories.get(category)?.get(subcategory)
    }

    pub fn count(&self, category: &str, subcategory: &str) -> u64 {
        self.counter(category, subcategory).map_or(0, |c| c.count)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Records everything observable about an emitted record.
    pub fn observe_assembled(&mut self, assembled: &AssembledRecord) {
        let record = &assembled.record;
        self.record(RECORD_TYPE, record.record_type.as_str(), None);
        for address in &record.addr_list {
            let kind = if address.is_country_only() {
                ADDRESS_COUNTRY_ONLY
            } else {
                ADDRESS_UNTYPED
            };
            self.record(ADDRESS, kind, None);
        }
        for note in &assembled.identifiers {
            self.record(ID_TYPE, &note.category, Some(&note.raw_type));
        }
        self.capture_record(record);
    }

    pub fn observe_unknown_kind(&mut self, raw_kind: &str) {
        self.record(UNKNOWN_RECORD_TYPE, raw_kind, None);
    }

    pub fn observe_filtered(&mut self, record_type: RecordType) {
        self.record(FILTERED_RECORD_TYPE, record_type.as_str(), None);
    }

    pub fn observe_missing_uid(&mut self, raw_kind: &str) {
        self.record(MISSING_UID, raw_kind, None);
    }

    /// Counts every emitted field of `record` under its record type. List
    /// fields are counted per key of their items.
    pub fn capture_record(&mut self, record: &NormalizedRecord) {
        let Ok(Value::Object(fields)) = serde_json::to_value(record) else {
            return;
        };
        let category = record.record_type.as_str();
        for (key, value) in &fields {
            match value {
                Value::Array(items) => {
                    for item in items {
                        if let Value::Object(sub_fields) = item {
                            for (sub_key, sub_value) in sub_fields {
                                self.record(category, sub_key, Some(&display(sub_value)));
                            }
                        }
                    }
                }
                other => self.record(category, key, Some(&display(other))),
            }
        }
    }

    /// JSON with 4-space indentation and sorted keys.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut out = Vec::new();
        self.write_json(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub fn write_json<W: std::io::Write>(&self, sink: W) -> serde_json::Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(sink, formatter);
        self.categories.serialize(&mut serializer)
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
