//! Error handling
//!
//! Defines the error types shared by the sandbox root, the path policy and
//! the file store.

pub mod handlers;
pub mod types;

pub use types::*;
