//! Path validation
//!
//! Handles filename checks and containment of the resolved path in the root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::RejectionReason;
use crate::policy::AllowedExtensions;

/// Longest filename accepted, in bytes (the common filesystem component limit)
pub const MAX_NAME_LEN: usize = 255;

/// A canonical path that was a direct child of the sandbox root when checked.
///
/// Only [`validate`] builds one, and it is never cached: every store
/// operation validates again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPath {
    path: PathBuf,
}

impl ValidatedPath {
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// On-disk filename. Differs from the candidate when a symlink was resolved.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for ValidatedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Checks a single path component against the naming rules.
fn check_name(name: &str, allowed: &AllowedExtensions) -> Result<(), RejectionReason> {
    if name == "." || name == ".." {
        return Err(RejectionReason::EscapesRoot);
    }
    if name.starts_with('.') {
        return Err(RejectionReason::HiddenFile);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(RejectionReason::NameTooLong);
    }
    if !name.chars().all(is_allowed_char) {
        return Err(RejectionReason::IllegalCharacters);
    }

    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && allowed.contains(ext) => Ok(()),
        _ => Err(RejectionReason::ExtensionNotAllowed),
    }
}

/// Resolves `candidate` to its canonical location inside `root`.
///
/// `root` must already be canonical. Names are matched byte for byte; only
/// the extension comparison ignores case.
pub fn validate(
    candidate: &str,
    root: &Path,
    allowed: &AllowedExtensions,
) -> Result<ValidatedPath, RejectionReason> {
    if candidate.chars().all(is_separator) {
        return Err(RejectionReason::EmptyName);
    }
    // Any separator means an absolute or multi-segment path.
    if candidate.contains(is_separator) {
        return Err(RejectionReason::EscapesRoot);
    }
    check_name(candidate, allowed)?;

    let joined = root.join(candidate);
    let resolved = match fs::symlink_metadata(&joined) {
        Ok(metadata) => {
            // Broken or looping links fail here and are refused.
            let canonical = joined
                .canonicalize()
                .map_err(|_| RejectionReason::EscapesRoot)?;
            if metadata.file_type().is_symlink() {
                let target = canonical
                    .file_name()
                    .and_then(|name| name.to_str())
                    .ok_or(RejectionReason::EscapesRoot)?;
                check_name(target, allowed)?;
            }
            canonical
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => root
            .canonicalize()
            .map_err(|_| RejectionReason::EscapesRoot)?
            .join(candidate),
        Err(_) => return Err(RejectionReason::EscapesRoot),
    };

    if resolved.parent() != Some(root) {
        return Err(RejectionReason::EscapesRoot);
    }

    Ok(ValidatedPath { path: resolved })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        (dir, root)
    }

    fn check(candidate: &str, root: &Path) -> Result<ValidatedPath, RejectionReason> {
        validate(candidate, root, &AllowedExtensions::default())
    }

    #[test]
    fn test_accepts_plain_names() {
        let (_dir, root) = setup();
        for name in ["notes.txt", "main.py", "Data_2024-01.CSV", "a..txt", "index.html"] {
            let validated = check(name, &root).unwrap();
            assert_eq!(validated.as_path().parent(), Some(root.as_path()));
            assert_eq!(validated.file_name(), name);
        }
    }

    #[test]
    fn test_empty_names() {
        let (_dir, root) = setup();
        assert_eq!(check("", &root), Err(RejectionReason::EmptyName));
        assert_eq!(check("/", &root), Err(RejectionReason::EmptyName));
        assert_eq!(check("//\\", &root), Err(RejectionReason::EmptyName));
    }

    #[test]
    fn test_traversal_and_separators() {
        let (_dir, root) = setup();
        for name in [
            "../../etc/passwd",
            "../notes.txt",
            "/etc/passwd.txt",
            "sub/notes.txt",
            "..\\notes.txt",
            "C:\\notes.txt",
            "notes.txt/",
            "..",
            ".",
        ] {
            assert_eq!(check(name, &root), Err(RejectionReason::EscapesRoot), "{name}");
        }
    }

    #[test]
    fn test_hidden_files() {
        let (_dir, root) = setup();
        for name in [".bashrc", ".notes.txt", "...txt"] {
            assert_eq!(check(name, &root), Err(RejectionReason::HiddenFile), "{name}");
        }
    }

    #[test]
    fn test_illegal_characters() {
        let (_dir, root) = setup();
        let names = ["my notes.txt", "a\0.txt", "tab\t.md", "caf\u{e9}.txt", "a;b.txt", "x%2e.txt"];
        for name in names {
            assert_eq!(check(name, &root), Err(RejectionReason::IllegalCharacters), "{name:?}");
        }
    }

    #[test]
    fn test_extension_rules() {
        let (_dir, root) = setup();
        for name in ["script.exe", "README", "notes.", "archive.txt.gz"] {
            assert_eq!(check(name, &root), Err(RejectionReason::ExtensionNotAllowed), "{name}");
        }
        assert!(check("NOTES.TXT", &root).is_ok());
    }

    #[test]
    fn test_name_too_long() {
        let (_dir, root) = setup();
        let name = format!("{}.txt", "a".repeat(MAX_NAME_LEN));
        assert_eq!(check(&name, &root), Err(RejectionReason::NameTooLong));
    }

    #[test]
    fn test_existing_file_resolves_inside_root() {
        let (_dir, root) = setup();
        fs::write(root.join("present.md"), "x").unwrap();
        let validated = check("present.md", &root).unwrap();
        assert_eq!(validated.as_path(), root.join("present.md"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escaping_root_is_rejected() {
        use std::os::unix::fs::symlink;

        let (_dir, root) = setup();
        let outside = TempDir::new().unwrap();
        let secret = outside.path().join("secret.txt");
        fs::write(&secret, "secret").unwrap();
        symlink(&secret, root.join("link.txt")).unwrap();

        assert_eq!(check("link.txt", &root), Err(RejectionReason::EscapesRoot));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_rejected() {
        use std::os::unix::fs::symlink;

        let (_dir, root) = setup();
        symlink(root.join("missing.txt"), root.join("dangling.txt")).unwrap();

        assert_eq!(check("dangling.txt", &root), Err(RejectionReason::EscapesRoot));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_within_root() {
        use std::os::unix::fs::symlink;

        let (_dir, root) = setup();
        fs::write(root.join("target.txt"), "x").unwrap();
        fs::write(root.join(".hidden.txt"), "x").unwrap();
        symlink(root.join("target.txt"), root.join("alias.txt")).unwrap();
        symlink(root.join(".hidden.txt"), root.join("peek.txt")).unwrap();

        let validated = check("alias.txt", &root).unwrap();
        assert_eq!(validated.file_name(), "target.txt");
        assert_eq!(check("peek.txt", &root), Err(RejectionReason::HiddenFile));
    }
}
