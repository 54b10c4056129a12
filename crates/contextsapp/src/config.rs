//! # Configuration
//!
//! Configuration is managed by [`confique`], which handles layered loading
//! from TOML files, environment variables, and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `CONTEXTS_EXTENSIONS`, `CONTEXTS_IGNORE` (comma separated).
//! 2. **Vault Config**: `<vault>/.contexts/contexts.toml` — Overrides everything for this vault.
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `extensions` | `[".md"]` | File extensions treated as documents |
//! | `ignore` | `[".obsidian", ".git", ".trash", ".contexts"]` | Directory names never scanned |

use crate::error::{ContextsError, Result};
use crate::vault::{default_extensions, default_ignored, Vault};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "contexts.toml";

/// Configuration for contexts, stored in `contexts.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContextsConfig {
    /// File extensions treated as documents (e.g. ".md", ".markdown")
    #[config(
        default = [".md"],
        env = "CONTEXTS_EXTENSIONS",
        parse_env = confique::env::parse::list_by_comma
    )]
    pub extensions: Vec<String>,

    /// Directory names that are never scanned
    #[config(
        default = [".obsidian", ".git", ".trash", ".contexts"],
        env = "CONTEXTS_IGNORE",
        parse_env = confique::env::parse::list_by_comma
    )]
    pub ignore: Vec<String>,
}

/// Same values as the `#[config(default = ...)]` attributes, which need literals.
impl Default for ContextsConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore: default_ignored(),
        }
    }
}

impl ContextsConfig {
    /// Load configuration from the environment and the given files.
    ///
    /// `files` are in priority order (first wins). Missing files are skipped.
    pub fn load_from(files: &[PathBuf]) -> Result<Self> {
        let mut builder = ContextsConfig::builder().env();
        for file in files {
            builder = builder.file(file);
        }
        builder
            .load()
            .map_err(|e| ContextsError::Config(e.to_string()))
    }

    /// Load from a single file only, ignoring the environment.
    pub fn load_file(path: &Path) -> Result<Self> {
        ContextsConfig::builder()
            .file(path)
            .load()
            .map_err(|e| ContextsError::Config(e.to_string()))
    }

    /// Build a vault scanner for `root` using these settings.
    ///
    /// Extensions are normalized to a leading dot by the vault.
    pub fn vault(&self, root: impl Into<PathBuf>) -> Vault {
        Vault::new(root)
            .with_extensions(&self.extensions)
            .with_ignored(self.ignore.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ContextsConfig::default();
        assert_eq!(config.extensions, vec![".md"]);
        assert!(config.ignore.contains(&".obsidian".to_string()));
    }

    #[test]
    fn test_extension_normalization() {
        let config = ContextsConfig {
            extensions: vec!["md".to_string(), ".markdown".to_string()],
            ..Default::default()
        };
        assert_eq!(config.vault("/vault").extensions(), [".md", ".markdown"]);
    }

    #[test]
    fn test_default_matches_compiled_defaults() {
        let compiled = ContextsConfig::builder().load().unwrap();
        assert_eq!(compiled, ContextsConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ContextsConfig::load_file(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, ContextsConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "extensions = [\".md\", \".txt\"]\n").unwrap();

        let config = ContextsConfig::load_file(&path).unwrap();
        assert_eq!(config.extensions, vec![".md", ".txt"]);
        assert_eq!(config.ignore, default_ignored());
    }

    #[test]
    fn test_first_file_wins() {
        let dir = TempDir::new().unwrap();
        let vault_cfg = dir.path().join("vault.toml");
        let global_cfg = dir.path().join("global.toml");
        fs::write(&vault_cfg, "extensions = [\".markdown\"]\n").unwrap();
        fs::write(&global_cfg, "extensions = [\".txt\"]\nignore = [\"archive\"]\n").unwrap();

        let config = ContextsConfig::builder()
            .file(&vault_cfg)
            .file(&global_cfg)
            .load()
            .unwrap();
        assert_eq!(config.extensions, vec![".markdown"]);
        assert_eq!(config.ignore, vec!["archive"]);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "extensions = 5\n").unwrap();
        assert!(matches!(
            ContextsConfig::load_file(&path),
            Err(ContextsError::Config(_))
        ));
    }
}
