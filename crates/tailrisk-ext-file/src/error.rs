//! Errors raised while loading price files.

use std::path::PathBuf;

use tailrisk_core::CoreError;
use thiserror::Error;

/// Result alias for file loading.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while loading price files.
///
/// Malformed rows are not errors; they are logged and skipped.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be opened or read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV header could not be parsed.
    #[error("invalid CSV in {}: {source}", .path.display())]
    Csv {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// A requested column is not in the header.
    #[error("column {column} not found in {}", .path.display())]
    MissingColumn {
        /// The file involved.
        path: PathBuf,
        /// The requested column, by name or index.
        column: String,
    },

    /// No usable rows were found.
    #[error("no valid price rows in {}", .path.display())]
    NoData {
        /// The file involved.
        path: PathBuf,
    },

    /// The two files share no dates.
    #[error("{} and {} have no dates in common", .path_a.display(), .path_b.display())]
    NoOverlap {
        /// File of asset A.
        path_a: PathBuf,
        /// File of asset B.
        path_b: PathBuf,
    },

    /// The joined series failed data-model validation.
    #[error(transparent)]
    Core(#[from] CoreError),
}
