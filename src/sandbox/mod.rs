//! Sandbox root management
//!
//! Owns the single directory all file operations are confined to.

mod root;

pub use root::{SandboxRoot, expand_home};
