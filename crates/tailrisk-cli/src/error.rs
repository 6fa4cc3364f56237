//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Refusing to overwrite an existing file.
    #[error("{} already exists. Use --force to overwrite.", .0.display())]
    FileExists(PathBuf),

    /// A configuration file failed validation.
    #[error("{} has {count} invalid setting(s)", .path.display())]
    InvalidConfig {
        /// The checked file.
        path: PathBuf,
        /// Number of violated rules.
        count: usize,
    },
}
