//! # Domain Model: Contexts, Filters and Documents
//!
//! A [`Context`] is a named slice of a vault. It carries an ordered list of
//! [`ContextFilter`]s, and a [`Document`] belongs to the context when it
//! satisfies every one of them.
//!
//! ## Filter Kinds
//!
//! | Kind | Value | Matches |
//! |------|-------|---------|
//! | `directory` | `Projects/work` | the directory itself and everything nested under it |
//! | `tag` | `active` or `#active` | inline tags and the frontmatter `tags` list |
//! | `frontmatter-key` | `due` | documents whose frontmatter has the key |
//! | `frontmatter-value` | `status=done` | documents whose frontmatter value, as text, equals the right side |
//!
//! ## Persisted Shape
//!
//! Filters serialize as `{ "type": "tag", "value": "active" }`, which keeps
//! settings files written by earlier releases readable. Camel-case kind names
//! (`frontmatterKey`, `frontmatterValue`) are accepted on input.
//!
//! ## Identity
//!
//! Context ids are opaque strings. Contexts created through the store get a
//! UUID v4; the id never changes on rename, so the active context survives
//! renames.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of filter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    Directory,
    Tag,
    #[serde(alias = "frontmatterKey")]
    FrontmatterKey,
    #[serde(alias = "frontmatterValue")]
    FrontmatterValue,
}

impl FilterKind {
    /// Canonical name, as written to settings files.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Directory => "directory",
            FilterKind::Tag => "tag",
            FilterKind::FrontmatterKey => "frontmatter-key",
            FilterKind::FrontmatterValue => "frontmatter-value",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter kind '{0}' (expected directory, tag, frontmatter-key or frontmatter-value)")]
pub struct ParseFilterKindError(pub String);

impl FromStr for FilterKind {
    type Err = ParseFilterKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "directory" | "dir" | "folder" => Ok(FilterKind::Directory),
            "tag" => Ok(FilterKind::Tag),
            "frontmatter-key" | "frontmatterkey" | "key" => Ok(FilterKind::FrontmatterKey),
            "frontmatter-value" | "frontmattervalue" | "value" => {
                Ok(FilterKind::FrontmatterValue)
            }
            _ => Err(ParseFilterKindError(s.to_string())),
        }
    }
}

/// One matching rule. `value` is interpreted according to `kind` and is
/// never validated: malformed values simply fail to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFilter {
    #[serde(rename = "type")]
    pub kind: FilterKind,
    pub value: String,
}

impl ContextFilter {
    pub fn new(kind: FilterKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn directory(value: impl Into<String>) -> Self {
        Self::new(FilterKind::Directory, value)
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Self::new(FilterKind::Tag, value)
    }

    pub fn frontmatter_key(value: impl Into<String>) -> Self {
        Self::new(FilterKind::FrontmatterKey, value)
    }

    pub fn frontmatter_value(value: impl Into<String>) -> Self {
        Self::new(FilterKind::FrontmatterValue, value)
    }
}

impl fmt::Display for ContextFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.value)
    }
}

/// A named, identified collection of filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub filters: Vec<ContextFilter>,
}

impl Context {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: ContextFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_filters(mut self, filters: impl IntoIterator<Item = ContextFilter>) -> Self {
        self.filters.extend(filters);
        self
    }
}

/// A document known to the host. The path is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Document {
    /// Slash-separated location relative to the vault root.
    pub path: String,
    /// Last path segment without its extension. Display only.
    pub basename: String,
}

impl Document {
    /// Build a document from its path, deriving the basename.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let basename = basename_of(&path);
        Self { path, basename }
    }
}

fn basename_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[..idx].to_string(),
        _ => name.to_string(),
    }
}
