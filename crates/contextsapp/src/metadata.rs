//! # Document Metadata
//!
//! Filters never read documents themselves. They ask a [`MetadataProvider`]
//! for the tags and frontmatter of a document, which keeps the engine free of
//! any I/O and lets hosts plug in whatever cache they already have.
//!
//! A provider answering `None` means the document has not been parsed (yet);
//! the engine treats that exactly like a document with no tags and no
//! frontmatter.

use crate::frontmatter::{parse_frontmatter, Frontmatter, FrontmatterValue};
use crate::model::Document;
use crate::tags::extract_inline_tags;
use std::collections::HashMap;

/// Parsed metadata for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    /// Inline tags found in the body, each starting with `#`.
    pub tags: Vec<String>,
    /// Frontmatter map, `None` when the document has no frontmatter block.
    pub frontmatter: Option<Frontmatter>,
}

impl DocumentMetadata {
    /// Parse metadata from raw markdown source.
    pub fn from_source(source: &str) -> Self {
        let (frontmatter, body) = parse_frontmatter(source);
        Self {
            tags: extract_inline_tags(body),
            frontmatter,
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set a frontmatter entry, creating the map if needed.
    pub fn with_frontmatter(
        mut self,
        key: impl Into<String>,
        value: impl Into<FrontmatterValue>,
    ) -> Self {
        self.frontmatter
            .get_or_insert_with(Frontmatter::new)
            .insert(key.into(), value.into());
        self
    }

    /// Look up a frontmatter value by key.
    pub fn frontmatter_value(&self, key: &str) -> Option<&FrontmatterValue> {
        self.frontmatter.as_ref()?.get(key)
    }
}

/// Capability: given a document, return its parsed metadata.
pub trait MetadataProvider {
    fn file_metadata(&self, document: &Document) -> Option<&DocumentMetadata>;
}

/// In-memory metadata store keyed by document path.
#[derive(Debug, Clone, Default)]
pub struct MetadataCache {
    entries: HashMap<String, DocumentMetadata>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, metadata: DocumentMetadata) {
        self.entries.insert(path.into(), metadata);
    }

    /// Parse `source` and store the result under `path`.
    pub fn insert_source(&mut self, path: impl Into<String>, source: &str) {
        self.insert(path, DocumentMetadata::from_source(source));
    }

    pub fn remove(&mut self, path: &str) -> Option<DocumentMetadata> {
        self.entries.remove(path)
    }

    pub fn get(&self, path: &str) -> Option<&DocumentMetadata> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataProvider for MetadataCache {
    fn file_metadata(&self, document: &Document) -> Option<&DocumentMetadata> {
        self.get(&document.path)
    }
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn file_metadata(&self, document: &Document) -> Option<&DocumentMetadata> {
        (**self).file_metadata(document)
    }
}
