//! Storage operations
//!
//! Handles list, read, write, append, create, delete and rename inside the
//! sandbox root.

use log::{error, info, warn};
use std::fs;
use std::io;

use crate::config::SandboxConfig;
use crate::error::{InitError, OpError};
use crate::policy::{AllowedExtensions, ValidatedPath, validate};
use crate::sandbox::SandboxRoot;
use crate::storage::filesystem::{
    append_all, create_new, read_all, rename_no_replace, write_atomic,
};
use crate::storage::results::FileRecord;

/// File operations confined to one sandbox root.
///
/// Holds only immutable state, so it can be shared across threads freely.
/// Nothing is cached: each call validates its names again and reflects the
/// current state of the disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: SandboxRoot,
    allowed: AllowedExtensions,
}

impl FileStore {
    pub fn new(root: SandboxRoot, allowed: AllowedExtensions) -> Self {
        Self { root, allowed }
    }

    /// Opens the configured root and builds a store over it
    pub fn open(config: &SandboxConfig) -> Result<Self, InitError> {
        let root = SandboxRoot::open(&config.root)?;
        Ok(Self::new(root, config.allowed_extensions()))
    }

    pub fn root(&self) -> &SandboxRoot {
        &self.root
    }

    pub fn allowed_extensions(&self) -> &AllowedExtensions {
        &self.allowed
    }

    /// Runs the path policy for `name` against this store's root
    pub fn validate(&self, name: &str) -> Result<ValidatedPath, OpError> {
        validate(name, self.root.path(), &self.allowed).map_err(|reason| {
            warn!("Rejected filename {name:?}: {reason}");
            OpError::InvalidName(reason)
        })
    }

    /// Lists the regular files directly under the root, sorted by name.
    ///
    /// Only names the policy accepts are reported, so hidden and temporary
    /// files, directories and links leading out of the root never show up.
    /// Enumeration failures are logged and produce an empty list.
    pub fn list(&self) -> Vec<FileRecord> {
        let entries = match fs::read_dir(self.root.path()) {
            Ok(entries) => entries,
            Err(e) => {
                error!(
                    "Failed to list sandbox {}: {}",
                    self.root.path().display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable directory entry: {e}");
                    continue;
                }
            };

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str().map(str::to_string) else {
                warn!("Skipping non UTF-8 filename {file_name:?}");
                continue;
            };
            let Ok(path) = validate(&name, self.root.path(), &self.allowed) else {
                continue;
            };

            match fs::metadata(path.as_path()) {
                Ok(metadata) if metadata.is_file() => records.push(FileRecord {
                    name,
                    size: metadata.len(),
                    modified: metadata.modified().ok(),
                }),
                Ok(_) => {}
                Err(e) => warn!("Skipping {name}: {e}"),
            }
        }

        records.sort_by(|a, b| a.name.cmp(&b.name));
        info!(
            "Listed sandbox {} - {} files",
            self.root.path().display(),
            records.len()
        );
        records
    }

    /// Reads the whole file
    pub fn read(&self, name: &str) -> Result<Vec<u8>, OpError> {
        let path = self.validate(name)?;
        self.ensure_file(name, &path)?;
        read_all(path.as_path()).map_err(|e| OpError::from_io(name, e))
    }

    /// Reads the whole file as UTF-8 text
    pub fn read_to_string(&self, name: &str) -> Result<String, OpError> {
        let bytes = self.read(name)?;
        String::from_utf8(bytes).map_err(|e| OpError::Io {
            name: name.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }

    /// Creates or replaces the file; readers see either the old or the new
    /// content, never a partial write.
    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> Result<(), OpError> {
        let path = self.validate(name)?;
        if let Ok(metadata) = fs::symlink_metadata(path.as_path()) {
            if !metadata.is_file() {
                return Err(OpError::NotAFile(name.to_string()));
            }
        }

        let content = content.as_ref();
        write_atomic(path.as_path(), content).map_err(|e| {
            error!("Failed to write {}: {}", path.as_path().display(), e);
            OpError::from_io(name, e)
        })?;

        info!("Wrote {} bytes to {}", content.len(), path.as_path().display());
        Ok(())
    }

    /// Appends to the file, creating it first when it does not exist.
    pub fn append(&self, name: &str, content: impl AsRef<[u8]>) -> Result<(), OpError> {
        let path = self.validate(name)?;
        if let Ok(metadata) = fs::symlink_metadata(path.as_path()) {
            if !metadata.is_file() {
                return Err(OpError::NotAFile(name.to_string()));
            }
        }

        let content = content.as_ref();
        append_all(path.as_path(), content).map_err(|e| {
            error!("Failed to append to {}: {}", path.as_path().display(), e);
            OpError::from_io(name, e)
        })?;

        info!(
            "Appended {} bytes to {}",
            content.len(),
            path.as_path().display()
        );
        Ok(())
    }

    /// Creates an empty file. Fails with `AlreadyExists` if anything is there.
    pub fn create(&self, name: &str) -> Result<(), OpError> {
        let path = self.validate(name)?;
        create_new(path.as_path()).map_err(|e| OpError::from_io(name, e))?;
        info!("Created {}", path.as_path().display());
        Ok(())
    }

    /// Removes the file. There is no undo.
    pub fn delete(&self, name: &str) -> Result<(), OpError> {
        let path = self.validate(name)?;
        self.ensure_file(name, &path)?;

        fs::remove_file(path.as_path()).map_err(|e| {
            error!("Failed to delete {}: {}", path.as_path().display(), e);
            OpError::from_io(name, e)
        })?;

        info!("Deleted {}", path.as_path().display());
        Ok(())
    }

    /// Renames `old` to `new` without ever overwriting an existing file.
    ///
    /// Renaming a file onto itself succeeds without touching it.
    pub fn rename(&self, old: &str, new: &str) -> Result<(), OpError> {
        let old_path = self.validate(old)?;
        let new_path = self.validate(new)?;
        self.ensure_file(old, &old_path)?;

        if old_path == new_path {
            info!("Rename of {old} onto itself, nothing to do");
            return Ok(());
        }
        if fs::symlink_metadata(new_path.as_path()).is_ok() {
            return Err(OpError::AlreadyExists(new.to_string()));
        }

        // The target may appear after the check; the move itself refuses it.
        rename_no_replace(old_path.as_path(), new_path.as_path()).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                return OpError::AlreadyExists(new.to_string());
            }
            error!(
                "Failed to rename {} to {}: {}",
                old_path.as_path().display(),
                new_path.as_path().display(),
                e
            );
            OpError::from_io(old, e)
        })?;

        info!("Renamed {old} to {new}");
        Ok(())
    }

    fn ensure_file(&self, name: &str, path: &ValidatedPath) -> Result<(), OpError> {
        match fs::metadata(path.as_path()) {
            Ok(metadata) if metadata.is_file() => Ok(()),
            Ok(_) => Err(OpError::NotAFile(name.to_string())),
            Err(e) => Err(OpError::from_io(name, e)),
        }
    }
}
