//! Code table rows.

use std::fmt;

use crate::sample::ExampleSample;

/// Example value excluded from record counts and top-example columns.
pub const NULL_EXAMPLE: &str = "null";

/// Number of `TOPn` columns in the persisted table.
pub const TOP_EXAMPLE_COLUMNS: usize = 10;

/// Curator review state of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewFlag {
    Reviewed,
    Pending,
}

impl ReviewFlag {
    /// `Y` in any case marks a reviewed row; anything else is pending.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("y") {
            Self::Reviewed
        } else {
            Self::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reviewed => "Y",
            Self::Pending => "N",
        }
    }

    pub fn is_reviewed(&self) -> bool {
        matches!(self, Self::Reviewed)
    }
}

impl fmt::Display for ReviewFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(raw_type, raw_code)` row with its mapping and run-scoped usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub reviewed: ReviewFlag,
    pub raw_type: String,
    pub raw_code: String,
    pub raw_modifier: String,
    /// Normalized target attribute (`SENZING_ATTR`); empty means unmapped.
    pub attribute: String,
    /// Normalized default value (`SENZING_DEFAULT`), e.g. an ISO country code.
    pub default_value: String,
    /// Occurrences seen this run, including values evicted from `examples`.
    pub count: u64,
    pub examples: ExampleSample,
    /// True when the entry did not exist in the loaded table.
    pub discovered: bool,
}

impl CodeEntry {
    /// Creates a pending, unmapped entry.
    pub fn new(
        raw_type: impl Into<String>,
        raw_code: impl Into<String>,
        example_cap: usize,
    ) -> Self {
        Self {
            reviewed: ReviewFlag::Pending,
            raw_type: raw_type.into(),
            raw_code: raw_code.into(),
            raw_modifier: String::new(),
            attribute: String::new(),
            default_value: String::new(),
            count: 0,
            examples: ExampleSample::new(example_cap),
            discovered: false,
        }
    }

    #[must_use]
    pub fn with_mapping(
        mut self,
        attribute: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        self.attribute = attribute.into();
        self.default_value = default_value.into();
        self
    }

    #[must_use]
    pub fn with_review(mut self, reviewed: ReviewFlag) -> Self {
        self.reviewed = reviewed;
        self
    }

    pub fn is_mapped(&self) -> bool {
        !self.attribute.is_empty()
    }

    /// Mapping-only view used to compare tables across runs.
    pub fn decision(&self) -> (ReviewFlag, &str, &str, &str) {
        (
            self.reviewed,
            self.raw_modifier.as_str(),
            self.attribute.as_str(),
            self.default_value.as_str(),
        )
    }

    /// Derived columns written by the table serializer.
    pub fn stats(&self) -> EntryStats {
        let unique_count = self.examples.len();
        let record_count = self.examples.total_excluding(NULL_EXAMPLE);
        let unique_percent = if record_count == 0 {
            None
        } else {
            Some(unique_count as f64 / record_count as f64 * 100.0)
        };
        let top = self
            .examples
            .ranked()
            .into_iter()
            .filter(|(value, _)| *value != NULL_EXAMPLE)
            .take(TOP_EXAMPLE_COLUMNS)
            .map(|(value, count)| format!("{value} ({count})"))
            .collect();
        EntryStats {
            record_count,
            unique_count,
            unique_percent,
            top,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryStats {
    pub record_count: u64,
    pub unique_count: usize,
    /// `None` when there were no records to divide by.
    pub unique_percent: Option<f64>,
    /// At most [`TOP_EXAMPLE_COLUMNS`] rendered `"value (count)"` strings.
    pub top: Vec<String>,
}

impl EntryStats {
    pub fn unique_percent_display(&self) -> String {
        match self.unique_percent {
            Some(percent) => format!("{percent:.2}"),
            None => "0".to_string(),
        }
    }

    /// Top examples padded with empty strings to the fixed column width.
    pub fn top_columns(&self) -> Vec<String> {
        let mut columns = self.top.clone();
        columns.resize(TOP_EXAMPLE_COLUMNS, String::new());
        columns
    }
}

/// Result of classifying one raw code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub attribute: Option<String>,
    pub default_value: Option<String>,
    /// True when the lookup created the entry.
    pub created: bool,
}

impl Classification {
    pub(crate) fn from_entry(entry: &CodeEntry, created: bool) -> Self {
        Self {
            attribute: non_empty(&entry.attribute),
            default_value: non_empty(&entry.default_value),
            created,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.attribute.is_some()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
