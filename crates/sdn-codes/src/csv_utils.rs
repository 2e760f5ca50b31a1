//! Shared CSV helpers for the code and state tables.

use std::io::Read;

/// Builds a reader that tolerates short rows from hand-edited files.
pub(crate) fn reader_from<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source)
}

/// Position of a header, ignoring a UTF-8 BOM, surrounding whitespace and case.
pub(crate) fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
}

/// Trimmed field value, empty when the column or cell is absent.
pub(crate) fn get_field(row: &csv::StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
