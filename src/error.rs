use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The configured input directory is absent or not a directory
    #[error("input directory not found: {}", path.display())]
    InputDirMissing { path: PathBuf },

    #[error("failed to list input directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single word file stopped reading part-way; the scan carries on
    #[error("could not process file {} fully: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write SQL file {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
