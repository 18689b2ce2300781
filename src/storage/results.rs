//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::time::{SystemTime, UNIX_EPOCH};

/// One regular file in the sandbox, as reported by a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl FileRecord {
    /// Modification time as seconds since the unix epoch, 0 when unknown
    pub fn modified_secs(&self) -> u64 {
        self.modified
            .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
            .map(|dur| dur.as_secs())
            .unwrap_or(0)
    }
}
