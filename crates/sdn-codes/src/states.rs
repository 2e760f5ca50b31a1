//! Sub-national jurisdiction lookup for driver's license issuers.
//!
//! Country mappings come from the code table; this table only resolves
//! state and province names that the country namespace cannot.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::csv_utils::{get_field, header_index, reader_from};
use crate::error::CodeTableError;

const BUILTIN_STATES: &[(&str, &str)] = &[
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District of Columbia", "DC"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Puerto Rico", "PR"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
    ("Alberta", "AB"),
    ("British Columbia", "BC"),
    ("Manitoba", "MB"),
    ("New Brunswick", "NB"),
    ("Newfoundland and Labrador", "NL"),
    ("Northwest Territories", "NT"),
    ("Nova Scotia", "NS"),
    ("Nunavut", "NU"),
    ("Ontario", "ON"),
    ("Prince Edward Island", "PE"),
    ("Quebec", "QC"),
    ("Saskatchewan", "SK"),
    ("Yukon", "YT"),
];

/// Case- and whitespace-insensitive map from jurisdiction name (or code) to
/// its postal code.
#[derive(Debug, Clone, Default)]
pub struct StateTable {
    by_key: HashMap<String, String>,
}

impl StateTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// US states, DC, Puerto Rico and Canadian provinces and territories.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (name, code) in BUILTIN_STATES {
            table.insert(name, code);
        }
        table
    }

    /// Adds `name` and `code` itself as lookup keys. Later inserts win.
    pub fn insert(&mut self, name: &str, code: &str) {
        let code = code.trim();
        if code.is_empty() {
            return;
        }
        for key in [name, code] {
            let key = normalize_key(key);
            if !key.is_empty() {
                self.by_key.insert(key, code.to_string());
            }
        }
    }

    /// Extends the table from a CSV file with `NAME` and `CODE` columns.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or either column is missing.
    pub fn extend_from_csv(&mut self, path: &Path) -> Result<usize, CodeTableError> {
        let file = File::open(path).map_err(|e| CodeTableError::io(path, e))?;
        let mut reader = reader_from(file);
        let headers = reader
            .headers()
            .map_err(|e| CodeTableError::csv(path, &e))?
            .clone();
        let idx_name = header_index(&headers, "NAME").ok_or_else(|| {
            CodeTableError::MissingColumn {
                path: path.to_path_buf(),
                column: "NAME",
            }
        })?;
        let idx_code = header_index(&headers, "CODE").ok_or_else(|| {
            CodeTableError::MissingColumn {
                path: path.to_path_buf(),
                column: "CODE",
            }
        })?;
        let mut added = 0;
        for row in reader.records() {
            let row = row.map_err(|e| CodeTableError::csv(path, &e))?;
            let name = get_field(&row, Some(idx_name));
            let code = get_field(&row, Some(idx_code));
            if !name.is_empty() && !code.is_empty() {
                self.insert(&name, &code);
                added += 1;
            }
        }
        info!(path = %path.display(), added, "state codes loaded");
        Ok(added)
    }

    pub fn lookup(&self, raw: &str) -> Option<&str> {
        self.by_key.get(&normalize_key(raw)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}
