//! Access to the distro-info metadata source

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::series::error::SeriesError;

/// Trait for reading the raw distro-info table
#[cfg_attr(test, automock)]
pub trait MetadataSource: Send + Sync {
    /// Reads the whole table as text
    ///
    /// # Returns
    /// * `Ok(String)` - Current content of the source
    /// * `Err(SeriesError::SourceUnavailable)` - If the source cannot be read
    fn read(&self) -> Result<String, SeriesError>;
}

/// Metadata source backed by a local CSV file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataSource for FileSource {
    fn read(&self) -> Result<String, SeriesError> {
        debug!("Reading distro-info from {:?}", self.path);
        std::fs::read_to_string(&self.path).map_err(|source| SeriesError::SourceUnavailable {
            path: self.path.clone(),
            source,
        })
    }
}
