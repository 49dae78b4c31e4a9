pub mod adapter;
pub mod cli;
pub mod config;
pub mod context;
pub mod dataset;
pub mod logging;
pub mod matcher;
pub mod resolver;
pub mod ui;
pub mod wrapper;

use miette::Diagnostic;
use std::fmt;
use std::path::PathBuf;

pub use adapter::{AsyncMockMethod, MockMethod};
pub use context::Smock;
pub use dataset::{Dataset, Outcome, Rule};
pub use matcher::{matches, WILDCARD};
pub use resolver::{resolve, Resolved};
pub use wrapper::{wrap, BinaryOp, ItemKey, MockValue, FILE_MARKER};

/// Result type alias for the mocking library
pub type Result<T, E = SmockError> = std::result::Result<T, E>;

/// Why a call could not be answered from the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// No rules are registered under the call name
    UnknownName,
    /// Rules exist but none matched the arguments
    NoMatch,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::UnknownName => f.write_str("method"),
            UnresolvedReason::NoMatch => f.write_str("data"),
        }
    }
}

/// Error types for dataset loading, resolution and wrapped value access
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum SmockError {
    #[error("Failed to read {path:?}: {source}")]
    #[diagnostic(
        code(smock::io),
        help("Check that the dataset path exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {origin}: {message}")]
    #[diagnostic(
        code(smock::parse),
        help("A dataset is a YAML mapping from call name to a list of rules; `.smock.toml` is TOML.")
    )]
    Parse { origin: String, message: String },

    #[error("Invalid rule #{index} for '{name}': {reason}")]
    #[diagnostic(
        code(smock::invalid_rule),
        help("Each rule needs exactly one of `result`, `result:raw` or `error`.")
    )]
    InvalidRule {
        name: String,
        index: usize,
        reason: String,
    },

    #[error("Invalid arguments: {0}")]
    #[diagnostic(
        code(smock::invalid_arguments),
        help("Positional arguments are a JSON array, keyword arguments a JSON object. Example: --args '[\"https://mocked.url\"]'")
    )]
    InvalidArguments(String),

    #[error("unknown {reason} for mocking: {name}: {{ args: {args}, kwargs: {kwargs} }}")]
    #[diagnostic(
        code(smock::unresolved),
        help("Add a rule for this call to the dataset, or use \"*\" to match any argument.")
    )]
    Unresolved {
        reason: UnresolvedReason,
        name: String,
        args: String,
        kwargs: String,
    },

    #[error("{0}")]
    #[diagnostic(code(smock::declared))]
    Declared(String),

    #[error("'{0}' not found")]
    #[diagnostic(code(smock::attribute))]
    Attribute(String),

    #[error("Key not found: {0}")]
    #[diagnostic(code(smock::key))]
    Key(String),

    #[error("Index {index} out of range for sequence of length {len}")]
    #[diagnostic(code(smock::index))]
    Index { index: i64, len: usize },

    #[error("Unsupported operation: {0}")]
    #[diagnostic(code(smock::type_error))]
    Type(String),

    #[error("Failed to read referenced file {path:?}: {source}")]
    #[diagnostic(
        code(smock::file_reference),
        help("`file:` paths are resolved relative to the working directory.")
    )]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SmockError {
    /// True for unknown call names and calls no rule matched
    pub fn is_unresolved(&self) -> bool {
        matches!(self, SmockError::Unresolved { .. })
    }
}
