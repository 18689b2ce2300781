//! Sandbox root directory

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::InitError;

/// Canonical, existing sandbox directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRoot {
    path: PathBuf,
}

impl SandboxRoot {
    /// Opens the sandbox at `path`, creating it and any missing ancestors.
    ///
    /// Accepts `~` and `~/...`. Relative paths are taken from the current
    /// directory. Opening an existing sandbox again is a no-op.
    pub fn open(path: &str) -> Result<Self, InitError> {
        if path.trim().is_empty() {
            return Err(InitError::EmptyPath);
        }
        let expanded = expand_home(path)?;
        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            std::env::current_dir()
                .map_err(|source| InitError::CreateFailed {
                    path: expanded.clone(),
                    source,
                })?
                .join(expanded)
        };

        match fs::metadata(&absolute) {
            Ok(metadata) if metadata.is_dir() => {
                info!("Using existing sandbox at: {}", absolute.display());
            }
            Ok(_) => return Err(InitError::NotADirectory(absolute)),
            Err(_) => {
                fs::create_dir_all(&absolute).map_err(|source| InitError::CreateFailed {
                    path: absolute.clone(),
                    source,
                })?;
                info!("Created sandbox directory at: {}", absolute.display());
            }
        }

        let path = absolute
            .canonicalize()
            .map_err(|source| InitError::CreateFailed {
                path: absolute.clone(),
                source,
            })?;

        Ok(Self { path })
    }

    /// Canonical location of the root
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> Result<PathBuf, InitError> {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => &rest[1..],
        // `~user` forms are left alone.
        _ => return Ok(PathBuf::from(path)),
    };

    let home = dirs::home_dir().ok_or(InitError::HomeDirUnavailable)?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a").join("b").join("sandbox");
        let root = SandboxRoot::open(target.to_str().unwrap()).unwrap();

        assert!(root.path().is_dir());
        assert_eq!(root.path(), target.canonicalize().unwrap());
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("sb");
        let first = SandboxRoot::open(target.to_str().unwrap()).unwrap();
        let second = SandboxRoot::open(target.to_str().unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_open_rejects_regular_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let err = SandboxRoot::open(file.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, InitError::NotADirectory(_)));
    }

    #[test]
    fn test_open_reports_create_failure() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let err = SandboxRoot::open(file.join("sb").to_str().unwrap()).unwrap_err();
        assert!(matches!(err, InitError::CreateFailed { .. }), "{err:?}");
    }

    #[test]
    fn test_open_rejects_blank_path() {
        assert!(matches!(SandboxRoot::open(""), Err(InitError::EmptyPath)));
        assert!(matches!(SandboxRoot::open("   "), Err(InitError::EmptyPath)));
    }

    #[test]
    fn test_open_resolves_dot_segments() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("sb");
        fs::create_dir(&target).unwrap();
        let dotted = dir.path().join("sb").join("..").join("sb");

        let root = SandboxRoot::open(dotted.to_str().unwrap()).unwrap();
        assert_eq!(root.path(), target.canonicalize().unwrap());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/sb").unwrap(), PathBuf::from("/tmp/sb"));
        assert_eq!(expand_home("~user/x").unwrap(), PathBuf::from("~user/x"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~").unwrap(), home);
            assert_eq!(expand_home("~/.my_sandbox").unwrap(), home.join(".my_sandbox"));
        }
    }
}
