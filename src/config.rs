//! Configuration management for the sandbox
//!
//! Settings are read once at startup and never change afterwards. Sources,
//! lowest precedence first: built-in defaults, `sandbox.toml` (or an
//! explicit file), `SANDBOX_*` environment variables, command-line overrides.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::policy::{AllowedExtensions, DEFAULT_EXTENSIONS};

/// Default sandbox location, relative to the user's home
pub const DEFAULT_ROOT: &str = "~/.my_sandbox";

/// Immutable sandbox configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SandboxConfig {
    /// Sandbox root directory, `~` allowed.
    /// Environment: SANDBOX_ROOT
    pub root: String,

    /// File extensions that may be stored, with or without leading dot.
    /// Environment: SANDBOX_ALLOWED_EXTENSIONS (comma separated)
    pub allowed_extensions: Vec<String>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl SandboxConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// Without `config_file`, `sandbox.toml` in the current directory is used
    /// if present. An explicit file must exist. `root_override` wins over
    /// every other source.
    pub fn load(
        config_file: Option<&Path>,
        root_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name("sandbox").required(false),
        };

        let mut builder = Config::builder()
            .set_default("root", DEFAULT_ROOT)?
            .set_default("allowed_extensions", DEFAULT_EXTENSIONS.to_vec())?
            .add_source(file)
            .add_source(
                Environment::with_prefix("SANDBOX")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_extensions"),
            );

        if let Some(root) = root_override {
            builder = builder.set_override("root", root)?;
        }

        let config: SandboxConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Normalized extension set for the path policy
    pub fn allowed_extensions(&self) -> AllowedExtensions {
        AllowedExtensions::new(&self.allowed_extensions)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.root.trim().is_empty() {
            return Err(ConfigError::Message("root cannot be empty".into()));
        }

        let allowed = self.allowed_extensions();
        if allowed.is_empty() {
            return Err(ConfigError::Message(
                "allowed_extensions must name at least one extension".into(),
            ));
        }

        if let Some(bad) = allowed
            .iter()
            .find(|ext| !ext.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(ConfigError::Message(format!(
                "invalid extension '{bad}': use letters and digits only"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sandbox.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_from_file() {
        let (_dir, path) = write_config(
            r#"
root = "/srv/sandbox"
allowed_extensions = [".TXT", "md"]
"#,
        );
        let config = SandboxConfig::load(Some(&path), None).unwrap();
        assert_eq!(config.root, "/srv/sandbox");

        let allowed = config.allowed_extensions();
        assert!(allowed.contains("txt"));
        assert!(allowed.contains("md"));
        assert!(!allowed.contains("py"));
    }

    #[test]
    fn test_file_falls_back_to_defaults() {
        let (_dir, path) = write_config("root = \"/srv/sandbox\"\n");
        let config = SandboxConfig::load(Some(&path), None).unwrap();
        assert_eq!(config.allowed_extensions(), AllowedExtensions::default());
    }

    #[test]
    fn test_root_override_wins() {
        let (_dir, path) = write_config("root = \"/srv/sandbox\"\n");
        let config = SandboxConfig::load(Some(&path), Some("/tmp/sb")).unwrap();
        assert_eq!(config.root, "/tmp/sb");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(SandboxConfig::load(Some(&path), None).is_err());
    }

    #[test]
    fn test_rejects_bad_values() {
        let (_dir, path) = write_config("root = \"/srv\"\nallowed_extensions = []\n");
        assert!(SandboxConfig::load(Some(&path), None).is_err());

        let (_dir, path) = write_config("root = \"/srv\"\nallowed_extensions = [\"t/xt\"]\n");
        assert!(SandboxConfig::load(Some(&path), None).is_err());

        let (_dir, path) = write_config("root = \"  \"\n");
        assert!(SandboxConfig::load(Some(&path), None).is_err());
    }

    #[test]
    fn test_default_matches_policy_defaults() {
        let config = SandboxConfig::default();
        assert_eq!(config.root, DEFAULT_ROOT);
        assert_eq!(config.allowed_extensions(), AllowedExtensions::default());
    }
}
