//! Error handlers
//!
//! Logging and user-facing rendering for file store errors.

use log::{Level, log};

use crate::error::types::{OpError, RejectionReason};
use crate::policy::AllowedExtensions;

/// Level an operation error is logged at, if it is logged here at all.
///
/// Rejections are already logged by the store when it validates the name.
pub fn log_level(err: &OpError) -> Option<Level> {
    match err {
        OpError::InvalidName(_) => None,
        OpError::Io { .. } => Some(Level::Error),
        _ => Some(Level::Warn),
    }
}

/// Log an operation error at a level matching its cause.
///
/// Missing files are caller mistakes; io failures are faults.
pub fn handle_error(operation: &str, err: &OpError) {
    if let Some(level) = log_level(err) {
        log!(level, "{operation} failed: {err}");
    }
}

/// Render an error for display, spelling out the allowed types when the
/// extension was the problem.
pub fn user_message(err: &OpError, allowed: &AllowedExtensions) -> String {
    match err.rejection() {
        Some(RejectionReason::ExtensionNotAllowed) => {
            format!("{err}. Allowed types: {}", allowed.display_list())
        }
        _ => err.to_string(),
    }
}
