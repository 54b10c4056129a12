//! # Vault Scanning
//!
//! A vault is a directory tree of markdown documents. [`Vault::scan`] walks
//! it once and returns a [`VaultIndex`]: the documents (sorted by path, with
//! slash-separated paths relative to the root) and a [`MetadataCache`] with
//! their parsed tags and frontmatter.
//!
//! ## What Gets Skipped
//!
//! - Directories whose name is in the ignore list (`.obsidian`, `.git`,
//!   `.trash`, `.contexts` by default). Their contents are never visited.
//! - Files whose extension is not in the extension list (`.md` by default).
//! - Files that cannot be read as UTF-8. These are logged and left out rather
//!   than failing the whole scan.

use crate::error::{ContextsError, Result};
use crate::metadata::MetadataCache;
use crate::model::Document;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub fn default_extensions() -> Vec<String> {
    vec![".md".to_string()]
}

pub fn default_ignored() -> Vec<String> {
    vec![
        ".obsidian".to_string(),
        ".git".to_string(),
        ".trash".to_string(),
        ".contexts".to_string(),
    ]
}

/// Documents found in a vault, plus their metadata.
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    pub documents: Vec<Document>,
    pub metadata: MetadataCache,
}

#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    extensions: Vec<String>,
    ignored: Vec<String>,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: default_extensions(),
            ignored: default_ignored(),
        }
    }

    /// Set the document extensions. Entries are normalized to start with a dot.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        self
    }

    /// Set the directory names that are never descended into.
    pub fn with_ignored<I, S>(mut self, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored = ignored.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Walk the vault and parse every document.
    pub fn scan(&self) -> Result<VaultIndex> {
        if !self.root.is_dir() {
            return Err(ContextsError::Store(format!(
                "Vault root is not a directory: {}",
                self.root.display()
            )));
        }

        let mut index = VaultIndex::default();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable vault entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.has_document_extension(entry.path()) {
                continue;
            }
            let Some(rel_path) = relative_path(&self.root, entry.path()) else {
                continue;
            };

            match fs::read_to_string(entry.path()) {
                Ok(source) => {
                    index.metadata.insert_source(rel_path.clone(), &source);
                    index.documents.push(Document::new(rel_path));
                }
                Err(e) => warn!("skipping {}: {}", entry.path().display(), e),
            }
        }

        index.documents.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(
            "scanned {} documents under {}",
            index.documents.len(),
            self.root.display()
        );
        Ok(index)
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        // Never filter the root itself, even if it has an ignored name
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.ignored.iter().any(|ignored| ignored == name))
    }

    fn has_document_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let dotted = format!(".{}", ext);
        self.extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&dotted))
    }
}

fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

/// Slash-separated path of `path` relative to `root`.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
    let parts = parts?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
