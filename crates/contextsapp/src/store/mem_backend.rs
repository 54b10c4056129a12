use super::backend::StorageBackend;
use super::ContextsSettings;
use crate::error::{ContextsError, Result};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    settings: RefCell<ContextsSettings>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-existing settings, as if loaded from disk.
    pub fn with_settings(settings: ContextsSettings) -> Self {
        Self {
            settings: RefCell::new(settings),
            simulate_write_error: RefCell::new(false),
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl StorageBackend for MemBackend {
    fn load_settings(&self) -> Result<ContextsSettings> {
        Ok(self.settings.borrow().clone())
    }

    fn save_settings(&self, settings: &ContextsSettings) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ContextsError::Store("Simulated write error".to_string()));
        }
        *self.settings.borrow_mut() = settings.clone();
        Ok(())
    }

    fn settings_path(&self) -> PathBuf {
        PathBuf::from("memory://contexts.json")
    }
}
