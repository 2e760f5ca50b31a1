//! The code classification table.
//!
//! Rows map `(raw_type, raw_code)` to a normalized attribute and default
//! value. `raw_type` partitions the table into independent namespaces such as
//! [`ID_TYPE`] and [`ID_COUNTRY`]. Mapping decisions are persistent; counts and
//! example values are run-scoped and always start empty on load.
//!
//! # File format
//!
//! ```text
//! REVIEWED,RAW_TYPE,RAW_CODE,RAW_MODIFIER,SENZING_ATTR,SENZING_DEFAULT,
//! RECORD_COUNT,UNIQUE_COUNT,UNIQUE_PERCENT,TOP1,...,TOP10
//! ```
//!
//! The statistic and `TOPn` columns are regenerated on every save and ignored
//! on load.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::csv_utils::{get_field, header_index, reader_from};
use crate::entry::{Classification, CodeEntry, ReviewFlag, TOP_EXAMPLE_COLUMNS};
use crate::error::CodeTableError;

/// Namespace for identifier type strings (`idType`).
pub const ID_TYPE: &str = "idType";

/// Namespace for identifier issuing-country strings (`idCountry`).
pub const ID_COUNTRY: &str = "idCountry";

/// Distinct examples kept per entry unless configured otherwise.
pub const DEFAULT_EXAMPLE_CAP: usize = 1_000_000;

/// Seed for example eviction unless configured otherwise.
pub const DEFAULT_SAMPLE_SEED: u64 = 0x5D4E_7AB1_E000_0001;

const COL_REVIEWED: &str = "REVIEWED";
const COL_RAW_TYPE: &str = "RAW_TYPE";
const COL_RAW_CODE: &str = "RAW_CODE";
const COL_RAW_MODIFIER: &str = "RAW_MODIFIER";
const COL_ATTRIBUTE: &str = "SENZING_ATTR";
const COL_DEFAULT: &str = "SENZING_DEFAULT";

/// Header row written by [`CodeTable::save`].
pub fn table_headers() -> Vec<String> {
    let mut headers: Vec<String> = [
        COL_REVIEWED,
        COL_RAW_TYPE,
        COL_RAW_CODE,
        COL_RAW_MODIFIER,
        COL_ATTRIBUTE,
        COL_DEFAULT,
        "RECORD_COUNT",
        "UNIQUE_COUNT",
        "UNIQUE_PERCENT",
    ]
    .iter()
    .map(|h| (*h).to_string())
    .collect();
    headers.extend((1..=TOP_EXAMPLE_COLUMNS).map(|n| format!("TOP{n}")));
    headers
}

/// Sampling settings for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub example_cap: usize,
    pub sample_seed: u64,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            example_cap: DEFAULT_EXAMPLE_CAP,
            sample_seed: DEFAULT_SAMPLE_SEED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CodeTable {
    partitions: BTreeMap<String, BTreeMap<String, CodeEntry>>,
    options: TableOptions,
    rng: StdRng,
    duplicate_rows: usize,
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new(TableOptions::default())
    }
}

impl CodeTable {
    pub fn new(options: TableOptions) -> Self {
        Self {
            partitions: BTreeMap::new(),
            options,
            rng: StdRng::seed_from_u64(options.sample_seed),
            duplicate_rows: 0,
        }
    }

    /// Loads a table from a CSV file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not valid CSV, or lacks one of
    /// the `REVIEWED`, `RAW_TYPE`, `RAW_CODE`, `SENZING_ATTR`,
    /// `SENZING_DEFAULT` columns.
    pub fn load(path: &Path, options: TableOptions) -> Result<Self, CodeTableError> {
        let file = File::open(path).map_err(|e| CodeTableError::io(path, e))?;
        let table = Self::read_from(file, path, options)?;
        info!(
            path = %path.display(),
            entries = table.len(),
            unreviewed = table.unreviewed_count(),
            duplicates = table.duplicate_rows,
            "code table loaded"
        );
        Ok(table)
    }

    /// Loads a table from any reader; `origin` is only used in error messages.
    pub fn read_from<R: Read>(
        source: R,
        origin: &Path,
        options: TableOptions,
    ) -> Result<Self, CodeTableError> {
        let mut reader = reader_from(source);
        let headers = reader
            .headers()
            .map_err(|e| CodeTableError::csv(origin, &e))?
            .clone();
        let require = |column: &'static str| {
            header_index(&headers, column).ok_or_else(|| CodeTableError::MissingColumn {
                path: origin.to_path_buf(),
                column,
            })
        };
        let idx_reviewed = require(COL_REVIEWED)?;
        let idx_raw_type = require(COL_RAW_TYPE)?;
        let idx_raw_code = require(COL_RAW_CODE)?;
        let idx_attribute = require(COL_ATTRIBUTE)?;
        let idx_default = require(COL_DEFAULT)?;
        let idx_modifier = header_index(&headers, COL_RAW_MODIFIER);

        let mut table = Self::new(options);
        for (line, row) in reader.records().enumerate() {
            let row = row.map_err(|e| CodeTableError::csv(origin, &e))?;
            let mut entry = CodeEntry::new(
                get_field(&row, Some(idx_raw_type)),
                get_field(&row, Some(idx_raw_code)),
                options.example_cap,
            )
            .with_review(ReviewFlag::parse(&get_field(&row, Some(idx_reviewed))))
            .with_mapping(
                get_field(&row, Some(idx_attribute)),
                get_field(&row, Some(idx_default)),
            );
            entry.raw_modifier = get_field(&row, idx_modifier);
            if let Some(previous) = table.insert(entry) {
                table.duplicate_rows += 1;
                warn!(
                    line = line + 2,
                    raw_type = %previous.raw_type,
                    raw_code = %previous.raw_code,
                    "duplicate code table row, keeping the later one"
                );
            }
        }
        Ok(table)
    }

    /// Inserts an entry, returning the one it replaced.
    pub fn insert(&mut self, entry: CodeEntry) -> Option<CodeEntry> {
        self.partitions
            .entry(entry.raw_type.clone())
            .or_default()
            .insert(entry.raw_code.clone(), entry)
    }

    pub fn get(&self, raw_type: &str, raw_code: &str) -> Option<&CodeEntry> {
        self.partitions.get(raw_type)?.get(raw_code)
    }

    /// Looks up `(raw_type, raw_code)`, creating an unmapped entry on first
    /// sight, and records one occurrence of `sample`.
    pub fn classify(
        &mut self,
        raw_type: &str,
        raw_code: &str,
        sample: Option<&str>,
    ) -> Classification {
        self.classify_with_suggestion(raw_type, raw_code, sample, None)
    }

    /// Same as [`classify`](Self::classify), but a newly created entry takes
    /// `suggestion` as its target attribute. Existing entries are never
    /// changed by a suggestion.
    pub fn classify_with_suggestion(
        &mut self,
        raw_type: &str,
        raw_code: &str,
        sample: Option<&str>,
        suggestion: Option<&str>,
    ) -> Classification {
        let example_cap = self.options.example_cap;
        let partition = self.partitions.entry(raw_type.to_string()).or_default();
        let mut created = false;
        let entry = partition.entry(raw_code.to_string()).or_insert_with(|| {
            created = true;
            let mut entry = CodeEntry::new(raw_type, raw_code, example_cap);
            entry.discovered = true;
            if let Some(attribute) = suggestion {
                entry.attribute = attribute.to_string();
            }
            entry
        });
        if created {
            debug!(raw_type, raw_code, suggestion, "new code discovered");
        }
        entry.count += 1;
        if let Some(value) = sample {
            entry.examples.observe(value, &mut self.rng);
        }
        Classification::from_entry(entry, created)
    }

    /// All entries sorted by `(raw_type, raw_code)`.
    pub fn entries(&self) -> impl Iterator<Item = &CodeEntry> {
        self.partitions.values().flat_map(BTreeMap::values)
    }

    pub fn len(&self) -> usize {
        self.partitions.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn unreviewed_count(&self) -> usize {
        self.entries().filter(|e| !e.reviewed.is_reviewed()).count()
    }

    /// Entries created during this run.
    pub fn discovered_count(&self) -> usize {
        self.entries().filter(|e| e.discovered).count()
    }

    /// Rows dropped on load because a later row had the same key.
    pub fn duplicate_rows(&self) -> usize {
        self.duplicate_rows
    }

    pub fn options(&self) -> TableOptions {
        self.options
    }

    /// Writes the table to `path` through a sibling temporary file so a
    /// failed write never truncates the previous table.
    ///
    /// # Errors
    ///
    /// Fails when the temporary file cannot be written or renamed.
    pub fn save(&self, path: &Path) -> Result<(), CodeTableError> {
        let temp_path = temp_path_for(path);
        let file = File::create(&temp_path).map_err(|e| CodeTableError::write(&temp_path, e))?;
        let mut writer = BufWriter::new(file);
        let written = self
            .write_to(&mut writer, path)
            .and_then(|()| writer.flush().map_err(|e| CodeTableError::write(path, e)));
        if let Err(error) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(error);
        }
        drop(writer);
        fs::rename(&temp_path, path).map_err(|e| CodeTableError::write(path, e))?;
        info!(
            path = %path.display(),
            entries = self.len(),
            discovered = self.discovered_count(),
            "code table saved"
        );
        Ok(())
    }

    /// Serializes the table as CSV; `origin` is only used in error messages.
    pub fn write_to<W: Write>(&self, sink: W, origin: &Path) -> Result<(), CodeTableError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(sink);
        writer
            .write_record(table_headers())
            .map_err(|e| CodeTableError::csv(origin, &e))?;
        for entry in self.entries() {
            let stats = entry.stats();
            let mut record = vec![
                entry.reviewed.as_str().to_string(),
                entry.raw_type.clone(),
                entry.raw_code.clone(),
                entry.raw_modifier.clone(),
                entry.attribute.clone(),
                entry.default_value.clone(),
                stats.record_count.to_string(),
                stats.unique_count.to_string(),
                stats.unique_percent_display(),
            ];
            record.extend(stats.top_columns());
            writer
                .write_record(&record)
                .map_err(|e| CodeTableError::csv(origin, &e))?;
        }
        writer.flush().map_err(|e| CodeTableError::write(origin, e))
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_else(|| "codes.csv".into());
    name.push(".tmp");
    path.with_file_name(name)
}
