//! # Vault Detection
//!
//! Contexts belong to a vault, and the vault is found the way `git` finds a
//! repository: walk up from the working directory.
//!
//! ## Detection Algorithm
//!
//! [`find_vault_root`]:
//!
//! 1. Start at `CWD`.
//! 2. Check: does this directory contain `.contexts` or `.obsidian`?
//! 3. **Match**: this is the vault root.
//! 4. **No Match**: move to the parent directory.
//! 5. **Stop**: at `HOME` or the filesystem root, return `None`.
//!
//! When nothing is found the working directory itself is the vault.
//!
//! ## Vault Override
//!
//! `vault_override` (the CLI's `--vault`) bypasses detection entirely.
//!
//! ## Data and Config Locations
//!
//! - Contexts live in `<vault>/.contexts/contexts.json`.
//! - Vault config is `<vault>/.contexts/contexts.toml`.
//! - Global config is `contexts.toml` in the OS config directory, or in
//!   `CONTEXTS_CONFIG_DIR` when set (used by tests to isolate global state).

use crate::api::ContextsApi;
use crate::config::{ContextsConfig, CONFIG_FILE};
use crate::error::Result;
use crate::store::fs_backend::FsBackend;
use crate::store::registry::ContextRegistry;
use directories::{BaseDirs, ProjectDirs};
use log::debug;
use std::path::{Path, PathBuf};

pub const DATA_DIR: &str = ".contexts";
const VAULT_MARKERS: [&str; 2] = [DATA_DIR, ".obsidian"];

pub type FsContextStore = ContextRegistry<FsBackend>;

pub struct ContextsContext {
    pub api: ContextsApi<FsContextStore>,
    pub config: ContextsConfig,
    pub vault_root: PathBuf,
    pub data_dir: PathBuf,
    pub config_files: Vec<PathBuf>,
}

/// Walk up from `cwd` looking for a directory holding `.contexts` or
/// `.obsidian`. Returns `None` once home or the filesystem root is passed.
pub fn find_vault_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if VAULT_MARKERS
            .iter()
            .any(|marker| current.join(marker).is_dir())
        {
            return Some(current);
        }

        if home_dir.as_ref() == Some(&current) {
            return None;
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

/// Directory holding the global `contexts.toml`, if one can be determined.
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("CONTEXTS_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "contexts", "contexts").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Resolve the vault, load configuration and open the store.
pub fn initialize(cwd: &Path, vault_override: Option<PathBuf>) -> Result<ContextsContext> {
    let vault_root = match vault_override {
        Some(path) if path.is_absolute() => path,
        Some(path) => cwd.join(path),
        None => find_vault_root(cwd).unwrap_or_else(|| cwd.to_path_buf()),
    };
    let data_dir = vault_root.join(DATA_DIR);

    // Vault config first: it wins over global
    let mut config_files = vec![data_dir.join(CONFIG_FILE)];
    if let Some(dir) = global_config_dir() {
        config_files.push(dir.join(CONFIG_FILE));
    }
    let config = ContextsConfig::load_from(&config_files)?;
    let vault = config.vault(vault_root.clone());
    debug!(
        "vault {} (extensions {:?})",
        vault.root().display(),
        vault.extensions()
    );

    let store = ContextRegistry::with_backend(FsBackend::new(data_dir.clone()));
    let api = ContextsApi::new(store, vault);

    Ok(ContextsContext {
        api,
        config,
        vault_root,
        data_dir,
        config_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_finds_vault_with_contexts_dir() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir(root.join(".contexts")).unwrap();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_vault_root(&nested), Some(root));
    }

    #[test]
    fn test_finds_obsidian_vault() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir(root.join(".obsidian")).unwrap();
        let nested = root.join("Notes");
        fs::create_dir(&nested).unwrap();

        assert_eq!(find_vault_root(&nested), Some(root));
    }

    #[test]
    fn test_innermost_vault_wins() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir(root.join(".obsidian")).unwrap();
        let inner = root.join("inner");
        fs::create_dir_all(inner.join(".contexts")).unwrap();

        assert_eq!(find_vault_root(&inner), Some(inner.clone()));
    }

    #[test]
    fn test_marker_must_be_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let vault = root.join("vault");
        fs::create_dir_all(vault.join(".obsidian")).unwrap();
        let inner = vault.join("inner");
        fs::create_dir(&inner).unwrap();
        fs::write(inner.join(".contexts"), "").unwrap();

        assert_eq!(find_vault_root(&inner), Some(vault));
    }

    #[test]
    fn test_initialize_with_override() {
        let dir = TempDir::new().unwrap();
        let ctx = initialize(Path::new("/"), Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(ctx.vault_root, dir.path());
        assert_eq!(ctx.data_dir, dir.path().join(".contexts"));
        assert_eq!(ctx.config_files[0], dir.path().join(".contexts/contexts.toml"));
    }

    #[test]
    fn test_initialize_relative_override() {
        let dir = TempDir::new().unwrap();
        let ctx = initialize(dir.path(), Some(PathBuf::from("vault"))).unwrap();
        assert_eq!(ctx.vault_root, dir.path().join("vault"));
    }
}
