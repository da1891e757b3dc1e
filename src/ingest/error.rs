use std::path::PathBuf;

use super::time::StampError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),
    #[error("line {line}: invalid {column} value {value:?}")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: {source}")]
    Timestamp {
        line: u64,
        #[source]
        source: StampError,
    },
}
