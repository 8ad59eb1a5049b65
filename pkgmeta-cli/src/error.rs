//! CLI-specific error types and exit code mapping

use std::path::PathBuf;

use pkgmeta_core::error::PkgMetaError;
use pkgmeta_inventory::InventoryError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Missing or invalid command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Logging subscriber could not be installed.
    #[error("logging error: {0}")]
    Logging(String),

    /// License directory passed on the command line does not exist.
    #[error("license directory [{}] is not found", .0.display())]
    LicenseDirNotFound(PathBuf),

    /// Inventory pipeline failure.
    #[error("{0}")]
    Inventory(#[from] InventoryError),

    /// Debian origin check found packages without a source descriptor.
    #[error("found {0} package(s) not built from debian source")]
    Findings(usize),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                        |
    /// |------|------------------------------------------------|
    /// | 0    | Success (including an empty report)            |
    /// | 1    | Usage, missing input, or pipeline failure      |
    /// | 1    | Debian origin check found packages             |
    /// | 2    | Configuration error                            |
    /// | 10   | IO error                                       |
    /// | -1   | Required build tool not in `$PATH`             |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Inventory(InventoryError::ToolNotFound { .. }) => -1,
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::Usage(_)
            | Self::Logging(_)
            | Self::LicenseDirNotFound(_)
            | Self::Inventory(_)
            | Self::Findings(_)
            | Self::JsonSerialize(_) => 1,
        }
    }
}

impl From<PkgMetaError> for CliError {
    fn from(e: PkgMetaError) -> Self {
        match e {
            PkgMetaError::Config(err) => Self::Config(err.to_string()),
            PkgMetaError::Io(err) => Self::Io(err),
        }
    }
}
