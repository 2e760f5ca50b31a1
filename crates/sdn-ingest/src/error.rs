use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML in {path} near byte {position}: {message}")]
    Xml {
        path: PathBuf,
        position: u64,
        message: String,
    },

    #[error("{path} has no root element")]
    Empty { path: PathBuf },
}
