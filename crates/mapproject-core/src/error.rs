//! Error types for project persistence

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving a project
#[derive(Error, Debug)]
pub enum ProjectError {
    /// A file could not be opened, read or written
    #[error("Failed to {operation} '{}': {source}", .path.display())]
    Io {
        /// What was being done ("read", "create", "write", "sync")
        operation: &'static str,
        /// File the operation was applied to
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The temporary file could not be moved over the target
    #[error(
        "Failed to replace '{}' with '{}': {source}",
        .target_path.display(),
        .temp_path.display()
    )]
    AtomicWriteFailed {
        /// Fully written temporary file
        temp_path: PathBuf,
        /// File that was to be replaced
        target_path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The file is not well-formed JSON
    #[error("Malformed project document '{}': {source}", .path.display())]
    Parse {
        /// File being loaded
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// A property type entry could not be rebuilt
    #[error("Invalid property type at index {index}: {source}")]
    InvalidPropertyType {
        /// Position of the entry in the document
        index: usize,
        /// Underlying error
        source: serde_json::Error,
    },

    /// A command entry could not be rebuilt
    #[error("Invalid command at index {index}: {source}")]
    InvalidCommand {
        /// Position of the entry in the document
        index: usize,
        /// Underlying error
        source: serde_json::Error,
    },

    /// The document could not be encoded
    #[error("Failed to encode project document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The project was never saved or loaded, so there is nowhere to save to
    #[error("Project has no file name")]
    NoFileName,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ProjectError>;
