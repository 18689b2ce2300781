//! File storage management
//!
//! The CRUD surface over the sandbox root. Every operation validates its
//! filename arguments before any filesystem access.

pub mod filesystem;
pub mod operations;
pub mod results;

pub use operations::FileStore;
pub use results::FileRecord;
