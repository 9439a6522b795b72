use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("invalid series {codename:?}")]
    InvalidSeries { codename: String },

    #[error("unknown version {version:?}")]
    UnknownVersion { version: String },

    #[error("no released LTS series found")]
    NoLtsRelease,

    #[error("metadata source {path:?} is unavailable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed metadata source at line {line}: {reason}")]
    MalformedSource { line: usize, reason: String },

    #[error("series cache lock poisoned")]
    LockPoisoned,
}

impl SeriesError {
    pub(crate) fn invalid_series(codename: &str) -> Self {
        SeriesError::InvalidSeries {
            codename: codename.to_string(),
        }
    }
}
