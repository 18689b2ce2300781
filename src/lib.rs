pub mod config;
pub mod error;
pub mod policy;
pub mod sandbox;
pub mod shell;
pub mod storage;

pub use config::SandboxConfig;
pub use error::{InitError, OpError, RejectionReason};
pub use policy::{AllowedExtensions, ValidatedPath};
pub use sandbox::SandboxRoot;
pub use storage::{FileRecord, FileStore};
