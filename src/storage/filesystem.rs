//! File system operations
//!
//! Low-level helpers used by the store once a path has been validated.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use tempfile::Builder;

/// Options that refuse to follow a symlink in the final path component.
///
/// Validated paths are already canonical, so a link found there now was
/// swapped in after the check.
pub fn no_follow() -> OpenOptions {
    #[allow(unused_mut)]
    let mut options = OpenOptions::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }
    options
}

/// Read the whole file
pub fn read_all(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = no_follow().read(true).open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Append to a file, creating it if absent
pub fn append_all(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = no_follow().append(true).create(true).open(path)?;
    file.write_all(content)?;
    file.flush()
}

/// Create an empty file, failing if one exists
pub fn create_new(path: &Path) -> io::Result<File> {
    no_follow().write(true).create_new(true).open(path)
}

/// Replace the file at `path` with `content` atomically.
///
/// Content goes to a hidden temporary file next to the target which is
/// synced and then renamed over it. The temporary file is removed on any
/// failure, leaving the target untouched.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;

    let mut temp = Builder::new().prefix(".").suffix(".tmp").tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(path) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    temp.write_all(content)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Move `from` to `to`, failing with `AlreadyExists` if `to` is present.
///
/// Linking refuses an existing target atomically, which a plain rename
/// does not. Both paths live in the same flat directory, so the link never
/// crosses filesystems.
pub fn rename_no_replace(from: &Path, to: &Path) -> io::Result<()> {
    fs::hard_link(from, to)?;
    if let Err(e) = fs::remove_file(from) {
        // Undo the link so the move either happens completely or not at all.
        let _ = fs::remove_file(to);
        return Err(e);
    }
    Ok(())
}
