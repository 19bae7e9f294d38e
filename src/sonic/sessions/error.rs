use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads inventories, joins them, or renders the session file.
///
/// Data-sparsity conditions (missing lab file, hosts without an address,
/// unknown device names) are not errors; they only shrink the output.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a testbed or lab document is not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Errors bubbled up from the template engine, covering both syntax and
    /// rendering failures.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// Raised when the user provides a testbed path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the requested template file does not exist.
    #[error("template not found: {0}")]
    MissingTemplate(PathBuf),

    /// Raised when the testbed document does not follow the expected shape.
    #[error("invalid testbed file: {0}")]
    InvalidTestbed(String),

    /// Raised when a lab inventory value cannot be interpreted.
    #[error("invalid lab inventory {path}: {reason}")]
    InvalidLab { path: PathBuf, reason: String },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
