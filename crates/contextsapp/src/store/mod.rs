//! # Storage Layer
//!
//! Contexts are user data: they are created, renamed, edited and deleted, and
//! they must survive restarts. The [`ContextStore`] trait is the explicit API
//! for all of that. Nothing else writes to the persisted settings, and the
//! filter engine never sees the store at all: it only receives the
//! [`Context`] values the store hands out.
//!
//! ## Layers
//!
//! - [`ContextStore`]: what callers use. Validation, id assignment, lookup by
//!   selector, active-context bookkeeping.
//! - [`backend::StorageBackend`]: raw load/save of [`ContextsSettings`].
//!   - [`fs_backend::FsBackend`]: `contexts.json` in the data directory,
//!     written atomically (temp file + rename).
//!   - [`mem_backend::MemBackend`]: for tests, with write-error simulation.
//! - [`registry::ContextRegistry`]: implements `ContextStore` over any backend.
//!
//! ## Storage Layout
//!
//! ```text
//! <vault>/.contexts/
//! ├── contexts.json      # Contexts and the active context id
//! └── contexts.toml      # Optional configuration overrides
//! ```
//!
//! ## Selectors
//!
//! Commands accept a context *selector*, resolved by [`ContextStore::find_context`]
//! in this order: exact id, exact name, then 1-based position in the list.

use crate::error::Result;
use crate::model::{Context, ContextFilter};
use serde::{Deserialize, Serialize};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod registry;

/// Everything the store persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextsSettings {
    #[serde(default)]
    pub contexts: Vec<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_context: Option<String>,
}

/// Abstract interface for context storage.
pub trait ContextStore {
    /// All contexts, in creation order.
    fn list_contexts(&self) -> Result<Vec<Context>>;

    /// Get a context by id.
    fn get_context(&self, id: &str) -> Result<Context>;

    /// Resolve a user-supplied selector (id, name or 1-based position).
    fn find_context(&self, selector: &str) -> Result<Context>;

    /// Create a context with a fresh id.
    fn create_context(&mut self, name: &str, filters: Vec<ContextFilter>) -> Result<Context>;

    /// Change the display name. The id is unchanged.
    fn rename_context(&mut self, id: &str, name: &str) -> Result<Context>;

    /// Replace the whole filter list.
    fn set_filters(&mut self, id: &str, filters: Vec<ContextFilter>) -> Result<Context>;

    /// Append one filter.
    fn add_filter(&mut self, id: &str, filter: ContextFilter) -> Result<Context>;

    /// Remove the filter at a 0-based position, returning it.
    fn remove_filter(&mut self, id: &str, position: usize) -> Result<(Context, ContextFilter)>;

    /// Delete a context. Clears the active context if it pointed here.
    fn delete_context(&mut self, id: &str) -> Result<Context>;

    /// The active context, if one is set and still exists.
    fn active_context(&self) -> Result<Option<Context>>;

    /// Set or clear the active context.
    fn set_active_context(&mut self, id: Option<&str>) -> Result<()>;
}
