//! Entry-by-entry conversion of a parsed document into NDJSON.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, error, info, info_span};

use sdn_codes::{CodeTable, StateTable};
use sdn_ingest::{SdnDocument, extract_entity};
use sdn_map::{ClassificationEngine, EngineOptions};
use sdn_model::RecordType;
use sdn_report::{StatPack, WriteOutcome, save_table, write_stats};
use sdn_transform::{AssemblerOptions, AssemblyOutcome, RecordAssembler, UNMAPPED_ID_CATEGORY};

use crate::config::{CliOverrides, RunConfig, Settings};
use crate::types::ConvertResult;

/// A failure that stopped the output stream.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to serialize record {record_id}: {source}")]
    Serialize {
        record_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write output after {written} records: {source}")]
    Write {
        written: usize,
        #[source]
        source: io::Error,
    },
}

/// Counts for the run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// `sdnEntry` elements visited.
    pub entries: usize,
    /// Records handed to the writer.
    pub emitted: usize,
    /// Complete lines the sink accepted.
    pub written: usize,
    /// Emitted records per type.
    pub by_type: BTreeMap<RecordType, usize>,
    pub filtered: usize,
    pub unknown_kind: usize,
    pub missing_uid: usize,
    /// Identifiers emitted under a normalized attribute.
    pub mapped_ids: usize,
    /// Identifiers kept verbatim under their raw type.
    pub passthrough_ids: usize,
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub stats: RunStats,
    /// Set when the stream was aborted; buffered lines were flushed first.
    pub error: Option<PipelineError>,
}

impl PipelineOutcome {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Counts the newline-terminated lines the inner sink has accepted.
struct LineCounter<W> {
    inner: W,
    lines: usize,
}

impl<W: Write> Write for LineCounter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let accepted = self.inner.write(buf)?;
        self.lines += buf[..accepted].iter().filter(|&&b| b == b'\n').count();
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Converts every entry of `document` in document order, writing one JSON
/// line per emitted record to `sink`.
///
/// The first serialization or write failure stops the run. Buffered lines
/// are flushed, and the table keeps what was classified so far.
/// [`RunStats::written`] counts only lines the sink actually accepted.
pub fn convert_document<W: Write>(
    document: &SdnDocument,
    engine: &mut ClassificationEngine<'_>,
    assembler: &RecordAssembler,
    stats: &mut StatPack,
    sink: W,
) -> PipelineOutcome {
    let span = info_span!("convert", source = %document.source().display());
    let _guard = span.enter();
    let start = Instant::now();
    let publish_date = document.publish_date().to_string();
    let mut writer = BufWriter::new(LineCounter {
        inner: sink,
        lines: 0,
    });
    let mut run = RunStats::default();
    let mut failure = None;

    for entry in document.entries() {
        run.entries += 1;
        let entity = extract_entity(entry);
        match assembler.assemble(&entity, &publish_date, engine) {
            AssemblyOutcome::Emitted(assembled) => {
                stats.observe_assembled(&assembled);
                for note in &assembled.identifiers {
                    if note.category == UNMAPPED_ID_CATEGORY {
                        run.passthrough_ids += 1;
                    } else {
                        run.mapped_ids += 1;
                    }
                }
                let record = &assembled.record;
                let line = match record.to_json_line() {
                    Ok(line) => line,
                    Err(source) => {
                        failure = Some(PipelineError::Serialize {
                            record_id: record.record_id.clone(),
                            source,
                        });
                        break;
                    }
                };
                if let Err(source) = writeln!(writer, "{line}") {
                    failure = Some(PipelineError::Write {
                        written: writer.get_ref().lines,
                        source,
                    });
                    break;
                }
                run.emitted += 1;
                *run.by_type.entry(record.record_type).or_default() += 1;
            }
            AssemblyOutcome::Filtered(record_type) => {
                debug!(uid = ?entity.uid, record_type = record_type.as_str(), "entry filtered");
                stats.observe_filtered(record_type);
                run.filtered += 1;
            }
            AssemblyOutcome::UnknownKind(raw_kind) => {
                stats.observe_unknown_kind(&raw_kind);
                run.unknown_kind += 1;
            }
            AssemblyOutcome::MissingUid => {
                stats.observe_missing_uid(entity.kind.as_str());
                run.missing_uid += 1;
            }
        }
    }

    if let Err(source) = writer.flush()
        && failure.is_none()
    {
        failure = Some(PipelineError::Write {
            written: writer.get_ref().lines,
            source,
        });
    }
    run.written = writer.get_ref().lines;

    match &failure {
        None => info!(
            entries = run.entries,
            written = run.written,
            filtered = run.filtered,
            unknown_kind = run.unknown_kind,
            missing_uid = run.missing_uid,
            duration_ms = start.elapsed().as_millis(),
            "conversion complete"
        ),
        Some(err) => error!(
            entries = run.entries,
            emitted = run.emitted,
            written = run.written,
            error = %err,
            "conversion aborted"
        ),
    }

    PipelineOutcome {
        stats: run,
        error: failure,
    }
}

/// Inputs of one `convert` run.
#[derive(Debug, Clone, Default)]
pub struct ConvertRequest {
    pub input: PathBuf,
    /// Defaults to [`default_output_path`] of the input.
    pub output: Option<PathBuf>,
    pub stats_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub overrides: CliOverrides,
    /// Value of `OFAC_CODES_FILE`, if set.
    pub env_codes_file: Option<PathBuf>,
    pub save_codes: bool,
}

/// Runs a full conversion: load the table, parse the input, stream the
/// output, then persist the table and statistics.
///
/// # Errors
///
/// Fails, leaving the table file untouched, when the config, the table, the
/// state codes or the input cannot be read, or the output cannot be created.
/// A failure while streaming is reported in [`ConvertResult::error`] after
/// the table has been saved.
pub fn run_convert(request: &ConvertRequest) -> Result<ConvertResult> {
    let span = info_span!("run", input = %request.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let config = match &request.config_file {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let settings = Settings::resolve(&request.overrides, &config, request.env_codes_file.clone());

    // The table must be usable before the input is touched.
    let mut table = CodeTable::load(&settings.codes_file, settings.table)
        .with_context(|| format!("load code table {}", settings.codes_file.display()))?;
    let mut states = StateTable::builtin();
    if let Some(path) = &settings.state_codes_file {
        states
            .extend_from_csv(path)
            .with_context(|| format!("load state codes {}", path.display()))?;
    }

    let document = SdnDocument::load(&request.input)
        .with_context(|| format!("read input {}", request.input.display()))?;

    let output_path = request
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&request.input));
    let output = File::create(&output_path)
        .with_context(|| format!("create output {}", output_path.display()))?;

    let assembler = RecordAssembler::new(AssemblerOptions {
        data_source: settings.data_source.clone(),
        core_only: settings.core_only,
    });
    let mut stats = StatPack::new();
    let outcome = {
        let mut engine = ClassificationEngine::new(
            &mut table,
            &states,
            EngineOptions {
                suggest_new_codes: settings.suggest_new_codes,
            },
        );
        convert_document(&document, &mut engine, &assembler, &mut stats, output)
    };

    let table_outcome = if request.save_codes {
        save_table(&table, &settings.codes_file)
    } else {
        WriteOutcome::Skipped {
            path: settings.codes_file.clone(),
            reason: "--no-save-codes".to_string(),
        }
    };
    let stats_outcome = request
        .stats_file
        .as_deref()
        .map(|path| write_stats(&stats, path));

    info!(
        written = outcome.stats.written,
        discovered = table.discovered_count(),
        unreviewed = table.unreviewed_count(),
        duration_ms = start.elapsed().as_millis(),
        "run finished"
    );

    Ok(ConvertResult {
        input: request.input.clone(),
        output: output_path,
        publish_date: document.publish_date().to_string(),
        stats: outcome.stats,
        table: table_outcome,
        stats_file: stats_outcome,
        table_entries: table.len(),
        unreviewed: table.unreviewed_count(),
        discovered: table.discovered_count(),
        error: outcome.error.map(|err| err.to_string()),
    })
}

/// `<input>` with its extension replaced by `.json`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("json")
}
