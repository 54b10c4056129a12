use super::backend::StorageBackend;
use super::ContextsSettings;
use crate::error::{ContextsError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const SETTINGS_FILE: &str = "contexts.json";

pub struct FsBackend {
    data_dir: PathBuf,
}

impl FsBackend {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).map_err(ContextsError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_settings(&self) -> Result<ContextsSettings> {
        let settings_file = self.settings_path();
        if !settings_file.exists() {
            return Ok(ContextsSettings::default());
        }
        let content = fs::read_to_string(&settings_file).map_err(ContextsError::Io)?;
        if content.trim().is_empty() {
            return Ok(ContextsSettings::default());
        }
        let settings: ContextsSettings =
            serde_json::from_str(&content).map_err(ContextsError::Serialization)?;
        debug!(
            "loaded {} contexts from {}",
            settings.contexts.len(),
            settings_file.display()
        );
        Ok(settings)
    }

    fn save_settings(&self, settings: &ContextsSettings) -> Result<()> {
        self.ensure_dir()?;

        let content =
            serde_json::to_string_pretty(settings).map_err(ContextsError::Serialization)?;

        // Atomic write
        let tmp_file = self
            .data_dir
            .join(format!(".contexts-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(ContextsError::Io)?;
        fs::rename(&tmp_file, self.settings_path()).map_err(ContextsError::Io)?;

        Ok(())
    }

    fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }
}
