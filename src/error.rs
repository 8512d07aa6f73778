//! Error types for the winpkg manifest compiler.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while walking the source tree or encoding identifiers
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to read {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported entry (not a regular file or directory): {path:?}")]
    UnsupportedEntry { path: PathBuf },

    #[error("Symbolic link cycle detected at {path:?}")]
    SymlinkCycle { path: PathBuf },
}

impl TreeError {
    pub(crate) fn walk(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TreeError::Walk {
            path: path.into(),
            source,
        }
    }
}

/// Errors surfaced by the package pipeline (assembly, configuration, linking)
#[derive(Debug, Error)]
pub enum PackageError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Manifest assembly failed: {0}")]
    Assembly(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Linker `{program}` failed{}: {stderr}", status_suffix(.status))]
    LinkerInvocation {
        program: String,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_suffix(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!(" with exit status {}", code),
        None => String::new(),
    }
}

impl From<config::ConfigError> for PackageError {
    fn from(err: config::ConfigError) -> Self {
        PackageError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for PackageError {
    fn from(err: toml::de::Error) -> Self {
        PackageError::Config(err.to_string())
    }
}
