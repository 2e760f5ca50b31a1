use std::path::PathBuf;

use sdn_report::WriteOutcome;

use crate::pipeline::RunStats;

/// Everything the run summary reports about one `convert` run.
#[derive(Debug)]
pub struct ConvertResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub publish_date: String,
    pub stats: RunStats,
    pub table: WriteOutcome,
    pub stats_file: Option<WriteOutcome>,
    pub table_entries: usize,
    pub unreviewed: usize,
    pub discovered: usize,
    /// Error that aborted the output stream.
    pub error: Option<String>,
}

impl ConvertResult {
    /// A fatal error occurred. Artifact write failures do not count.
    pub fn has_errors(&self) -> bool {
        self.error.is_some()
    }

    /// Paths of artifacts that could not be written.
    pub fn failed_artifacts(&self) -> Vec<&WriteOutcome> {
        std::iter::once(&self.table)
            .chain(self.stats_file.as_ref())
            .filter(|outcome| outcome.is_failed())
            .collect()
    }
}
