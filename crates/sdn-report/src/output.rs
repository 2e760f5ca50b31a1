//! Best-effort writers for the end-of-run artifacts.
//!
//! A failure here never aborts the run: it is logged and handed back as a
//! [`WriteOutcome`] for the run summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sdn_codes::{CodeTable, CodeTableError};
use tracing::{error, info};

use crate::stats::StatPack;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize statistics to {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Table(#[from] CodeTableError),
}

/// What happened to one end-of-run artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// Not requested, or suppressed by the run.
    Skipped { path: PathBuf, reason: String },
    Failed { path: PathBuf, message: String },
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Written(path) | Self::Skipped { path, .. } | Self::Failed { path, .. } => path,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    fn from_result(path: &Path, result: Result<(), ReportError>, what: &str) -> Self {
        match result {
            Ok(()) => {
                info!(path = %path.display(), "{what} written");
                Self::Written(path.to_path_buf())
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "{what} not written");
                Self::Failed {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Writes the statistics file as pretty, key-sorted JSON.
pub fn try_write_stats(stats: &StatPack, path: &Path) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    stats
        .write_json(&mut writer)
        .map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)
}

pub fn write_stats(stats: &StatPack, path: &Path) -> WriteOutcome {
    WriteOutcome::from_result(path, try_write_stats(stats, path), "statistics")
}

/// Saves the code table back to `path`, sorted and with fresh statistics.
pub fn save_table(table: &CodeTable, path: &Path) -> WriteOutcome {
    let result = table.save(path).map_err(ReportError::from);
    WriteOutcome::from_result(path, result, "code table")
}
