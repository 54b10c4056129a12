//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., parsing filter kinds from their textual form)
//! - **Scans the vault** when a command needs documents
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over ContextStore
//!
//! `ContextsApi<S: ContextStore>` is generic over the storage backend:
//! - Production: `ContextsApi<ContextRegistry<FsBackend>>`
//! - Testing: `ContextsApi<ContextRegistry<MemBackend>>`

use crate::commands::{self, CmdResult};
use crate::error::{ContextsError, Result};
use crate::model::{ContextFilter, FilterKind};
use crate::store::ContextStore;
use crate::vault::{Vault, VaultIndex};

/// The main API facade.
///
/// All UI clients should interact through this API.
pub struct ContextsApi<S: ContextStore> {
    store: S,
    vault: Vault,
}

impl<S: ContextStore> ContextsApi<S> {
    pub fn new(store: S, vault: Vault) -> Self {
        Self { store, vault }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn list_contexts(&self) -> Result<CmdResult> {
        commands::contexts::list(&self.store)
    }

    pub fn show_context(&self, selector: &str) -> Result<CmdResult> {
        commands::contexts::show(&self.store, selector)
    }

    pub fn create_context(&mut self, name: &str, filters: Vec<ContextFilter>) -> Result<CmdResult> {
        commands::contexts::create(&mut self.store, name, filters)
    }

    pub fn rename_context(&mut self, selector: &str, new_name: &str) -> Result<CmdResult> {
        commands::contexts::rename(&mut self.store, selector, new_name)
    }

    pub fn delete_context(&mut self, selector: &str) -> Result<CmdResult> {
        commands::contexts::delete(&mut self.store, selector)
    }

    pub fn use_context(&mut self, selector: Option<&str>) -> Result<CmdResult> {
        commands::contexts::activate(&mut self.store, selector)
    }

    /// Add a filter given its kind as text (`directory`, `tag`, `key`, ...).
    pub fn add_filter(&mut self, selector: &str, kind: &str, value: &str) -> Result<CmdResult> {
        let kind = kind
            .parse::<FilterKind>()
            .map_err(|e| ContextsError::Api(e.to_string()))?;
        commands::filters::add(&mut self.store, selector, ContextFilter::new(kind, value))
    }

    /// Remove the filter at a 1-based position.
    pub fn remove_filter(&mut self, selector: &str, position: usize) -> Result<CmdResult> {
        commands::filters::remove(&mut self.store, selector, position)
    }

    pub fn clear_filters(&mut self, selector: &str) -> Result<CmdResult> {
        commands::filters::clear(&mut self.store, selector)
    }

    /// Scan the vault and apply a context (or the active one) to it.
    pub fn files(&self, selector: Option<&str>) -> Result<CmdResult> {
        let VaultIndex {
            documents,
            metadata,
        } = self.vault.scan()?;
        commands::files::run(&self.store, selector, &documents, &metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::StorageBackend;
    use crate::store::mem_backend::MemBackend;
    use crate::store::registry::ContextRegistry;
    use std::fs;
    use tempfile::TempDir;

    fn api(root: &std::path::Path) -> ContextsApi<ContextRegistry<MemBackend>> {
        ContextsApi::new(
            ContextRegistry::with_backend(MemBackend::new()),
            Vault::new(root),
        )
    }

    #[test]
    fn test_add_filter_parses_kind() {
        let dir = TempDir::new().unwrap();
        let mut api = api(dir.path());
        api.create_context("Work", vec![]).unwrap();

        let result = api.add_filter("Work", "key", "status").unwrap();
        assert_eq!(
            result.contexts[0].filters,
            vec![ContextFilter::frontmatter_key("status")]
        );
    }

    #[test]
    fn test_exposes_vault_and_settings_location() {
        let dir = TempDir::new().unwrap();
        let api = api(dir.path());
        assert_eq!(api.vault().root(), dir.path());
        assert_eq!(
            api.store().backend().settings_path(),
            std::path::PathBuf::from("memory://contexts.json")
        );
    }

    #[test]
    fn test_add_filter_unknown_kind() {
        let dir = TempDir::new().unwrap();
        let mut api = api(dir.path());
        api.create_context("Work", vec![]).unwrap();

        let err = api.add_filter("Work", "colour", "red").unwrap_err();
        assert!(matches!(err, ContextsError::Api(_)));
        assert!(api.store().find_context("Work").unwrap().filters.is_empty());
    }

    #[test]
    fn test_files_scans_vault() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Work")).unwrap();
        fs::write(dir.path().join("Work/plan.md"), "Ship it #active\n").unwrap();
        fs::write(dir.path().join("Work/old.md"), "Done #archived\n").unwrap();
        fs::write(dir.path().join("home.md"), "#active at home\n").unwrap();

        let mut api = api(dir.path());
        api.create_context(
            "Active work",
            vec![ContextFilter::directory("Work"), ContextFilter::tag("active")],
        )
        .unwrap();

        let result = api.files(Some("Active work")).unwrap();
        let paths: Vec<_> = result.documents.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["Work/plan.md"]);

        let all = api.files(None).unwrap();
        assert_eq!(all.documents.len(), 3);
    }
}
