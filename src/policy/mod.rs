//! Path policy
//!
//! Decides whether a caller-supplied filename may be used inside the sandbox
//! and, if so, where it lives on disk.

pub mod extensions;
pub mod validation;

pub use extensions::{AllowedExtensions, DEFAULT_EXTENSIONS};
pub use validation::{MAX_NAME_LEN, ValidatedPath, validate};
