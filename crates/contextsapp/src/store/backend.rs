use super::ContextsSettings;
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw settings I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while ContextRegistry handles the "what" (validation, ids, active context).
pub trait StorageBackend {
    /// Load the persisted settings. A store that was never written yields defaults.
    fn load_settings(&self) -> Result<ContextsSettings>;

    /// Persist the settings.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_settings(&self, settings: &ContextsSettings) -> Result<()>;

    /// Location of the settings, for display.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn settings_path(&self) -> PathBuf;
}
