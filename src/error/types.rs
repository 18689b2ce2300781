//! Error types
//!
//! Defines domain-specific error types for each layer of the sandbox.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening the sandbox root
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Sandbox path {0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to create sandbox directory {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot expand '~': home directory is unknown")]
    HomeDirUnavailable,

    #[error("Sandbox path is empty")]
    EmptyPath,
}

/// Why a candidate filename was refused by the path policy.
///
/// The messages are meant to be shown to the end user as-is, so a rejected
/// traversal attempt reads differently from a missing file.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("Filename is empty")]
    EmptyName,

    #[error("Hidden files are not allowed")]
    HiddenFile,

    #[error("Invalid filename. Use only letters, numbers, underscore, dash and dot")]
    IllegalCharacters,

    #[error("File type not allowed")]
    ExtensionNotAllowed,

    #[error("Path traversal attempt detected")]
    EscapesRoot,

    #[error("Filename is too long")]
    NameTooLong,
}

/// File store operation errors
#[derive(Debug, Error)]
pub enum OpError {
    #[error("{0}")]
    InvalidName(#[from] RejectionReason),

    #[error("File {0} does not exist")]
    NotFound(String),

    #[error("File {0} already exists")]
    AlreadyExists(String),

    #[error("{0} is not a regular file")]
    NotAFile(String),

    #[error("I/O error on {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl OpError {
    /// Translates an io error raised while operating on `name`.
    ///
    /// `NotFound` and `AlreadyExists` keep their meaning; every other kind is
    /// carried through as `Io`.
    pub fn from_io(name: &str, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => OpError::NotFound(name.to_string()),
            io::ErrorKind::AlreadyExists => OpError::AlreadyExists(name.to_string()),
            _ => OpError::Io {
                name: name.to_string(),
                source,
            },
        }
    }

    /// The policy rejection behind this error, if any
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            OpError::InvalidName(reason) => Some(*reason),
            _ => None,
        }
    }
}
