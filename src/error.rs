use std::path::{Path, PathBuf};

use thiserror::Error;

/// IP filter error types
#[derive(Error, Debug)]
pub enum FilterError {
    /// A range entry is not valid CIDR notation or its prefix length is out of range
    #[error("Invalid CIDR {entry:?}: {reason}")]
    InvalidCidr { entry: String, reason: String },

    /// A range list has an invalid entry; `file` is set when the list came from disk
    #[error("Parse error at {}line {line}: {source}", file_prefix(.file))]
    ParseErrorAtLine {
        file: Option<PathBuf>,
        line: usize,
        #[source]
        source: Box<FilterError>,
    },

    /// A range list is structurally invalid (e.g., circular `file:` includes)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A configuration document could not be decoded
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Reading a range list or configuration file failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

fn file_prefix(file: &Option<PathBuf>) -> String {
    match file {
        Some(path) => format!("{} ", path.display()),
        None => String::new(),
    }
}

impl FilterError {
    pub(crate) fn invalid_cidr(entry: &str, reason: impl ToString) -> Self {
        FilterError::InvalidCidr {
            entry: entry.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Wrap an I/O failure on `path`, keeping its kind and naming the file.
    pub(crate) fn io_at(path: &Path, err: std::io::Error) -> Self {
        let kind = err.kind();
        FilterError::IoError(std::io::Error::new(
            kind,
            format!("{}: {}", path.display(), err),
        ))
    }

    /// The range string that caused the error, if any.
    pub fn entry(&self) -> Option<&str> {
        match self {
            FilterError::InvalidCidr { entry, .. } => Some(entry),
            FilterError::ParseErrorAtLine { source, .. } => source.entry(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
