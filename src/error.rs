use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("no source file found in {}", .0.display())]
    MissingSourceFile(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} not found in environment or config file; set it in your .env file")]
    ConfigurationMissing(String),
    #[error("config file invalid or unreadable: {0}")]
    InvalidConfig(String),
}

impl VaultError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailure {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Errors that end a single scenario but are not fatal to the process.
    pub fn is_scenario_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingDirectory(_) | Self::ReadFailure { .. } | Self::WriteFailure { .. }
        )
    }
}

pub type VaultResult<T> = Result<T, VaultError>;
