//! # Context Filtering
//!
//! This module decides which documents belong to a context. Every filter kind
//! has its own predicate, and a context includes a document only when all of
//! its filters match (AND). A context with no filters includes everything.
//!
//! The engine is pure: it reads the context, the documents and their
//! metadata, and returns references into the input slice in input order. It
//! never fails. Missing metadata counts as "no tags, no frontmatter", and
//! malformed filter values simply do not match.
//!
//! ## Predicates
//!
//! - **directory**: leading and trailing `/` are stripped from the value. The
//!   document path must equal it or start with it plus `/`, so `Notes` never
//!   matches `NotesArchive/x.md`. A value that strips down to nothing matches
//!   no document, since vault paths are never empty.
//! - **tag**: the value gets a leading `#` if it lacks one. Inline tags are
//!   checked first, then a frontmatter `tags` sequence whose string entries are
//!   normalized the same way. Anything else under `tags` is ignored.
//! - **frontmatter-key**: presence of the exact key, whatever its value.
//! - **frontmatter-value**: `key=value`, split on the first `=` only. The
//!   stored value is compared through
//!   [`FrontmatterValue::coerce_to_string`](crate::frontmatter::FrontmatterValue::coerce_to_string),
//!   so `priority=1` matches a numeric `priority: 1`.

use crate::frontmatter::FrontmatterValue;
use crate::metadata::{DocumentMetadata, MetadataProvider};
use crate::model::{Context, ContextFilter, Document, FilterKind};

/// Return the documents that match every filter of `context`, in input order.
pub fn filter_documents<'a, M>(
    context: &Context,
    documents: &'a [Document],
    metadata: &M,
) -> Vec<&'a Document>
where
    M: MetadataProvider + ?Sized,
{
    documents
        .iter()
        .filter(|doc| context.matches(doc, metadata))
        .collect()
}

/// Check a single filter against a single document.
pub fn matches_filter<M>(document: &Document, filter: &ContextFilter, metadata: &M) -> bool
where
    M: MetadataProvider + ?Sized,
{
    let meta = metadata.file_metadata(document);
    match filter.kind {
        FilterKind::Directory => matches_directory(&document.path, &filter.value),
        FilterKind::Tag => matches_tag(meta, &filter.value),
        FilterKind::FrontmatterKey => matches_frontmatter_key(meta, &filter.value),
        FilterKind::FrontmatterValue => matches_frontmatter_value(meta, &filter.value),
    }
}

impl Context {
    /// Check whether a document satisfies every filter of this context.
    pub fn matches<M>(&self, document: &Document, metadata: &M) -> bool
    where
        M: MetadataProvider + ?Sized,
    {
        self.filters
            .iter()
            .all(|filter| matches_filter(document, filter, metadata))
    }
}

impl ContextFilter {
    /// Check whether a document satisfies this filter.
    pub fn matches<M>(&self, document: &Document, metadata: &M) -> bool
    where
        M: MetadataProvider + ?Sized,
    {
        matches_filter(document, self, metadata)
    }
}

/// Strip leading and trailing path separators from a directory filter value.
pub fn normalize_directory(raw: &str) -> &str {
    raw.trim_matches('/')
}

/// Prefix a tag with `#` unless it already has one.
pub fn normalize_tag(raw: &str) -> String {
    if raw.starts_with('#') {
        raw.to_string()
    } else {
        format!("#{}", raw)
    }
}

/// Split a `key=value` operand on its first `=`.
pub fn split_key_value(raw: &str) -> Option<(&str, &str)> {
    raw.split_once('=')
}

fn matches_directory(path: &str, raw: &str) -> bool {
    let dir = normalize_directory(raw);
    match path.strip_prefix(dir) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

fn matches_tag(meta: Option<&DocumentMetadata>, raw: &str) -> bool {
    let Some(meta) = meta else {
        return false;
    };
    let needle = normalize_tag(raw);

    if meta.tags.iter().any(|tag| *tag == needle) {
        return true;
    }

    let Some(fm_tags) = meta
        .frontmatter_value("tags")
        .and_then(FrontmatterValue::as_sequence)
    else {
        return false;
    };

    fm_tags
        .iter()
        .filter_map(FrontmatterValue::as_str)
        .any(|tag| normalize_tag(tag) == needle)
}

fn matches_frontmatter_key(meta: Option<&DocumentMetadata>, key: &str) -> bool {
    meta.and_then(|m| m.frontmatter.as_ref())
        .is_some_and(|fm| fm.contains_key(key))
}

fn matches_frontmatter_value(meta: Option<&DocumentMetadata>, raw: &str) -> bool {
    let Some((key, expected)) = split_key_value(raw) else {
        return false;
    };

    meta.and_then(|m| m.frontmatter_value(key))
        .is_some_and(|value| value.coerce_to_string() == expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataCache;

    fn cache_with(path: &str, meta: DocumentMetadata) -> MetadataCache {
        let mut cache = MetadataCache::new();
        cache.insert(path, meta);
        cache
    }

    fn doc_matches(path: &str, meta: DocumentMetadata, filter: ContextFilter) -> bool {
        let cache = cache_with(path, meta);
        filter.matches(&Document::new(path), &cache)
    }

    #[test]
    fn directory_matches_nested_paths() {
        let empty = MetadataCache::new();
        let filter = ContextFilter::directory("Notes");

        assert!(filter.matches(&Document::new("Notes/x.md"), &empty));
        assert!(filter.matches(&Document::new("Notes/sub/x.md"), &empty));
        assert!(filter.matches(&Document::new("Notes"), &empty));
    }

    #[test]
    fn directory_respects_segment_boundary() {
        let empty = MetadataCache::new();
        for value in ["Notes", "/Notes/"] {
            let filter = ContextFilter::directory(value);
            assert!(!filter.matches(&Document::new("NotesArchive/x.md"), &empty));
            assert!(!filter.matches(&Document::new("Other/Notes/x.md"), &empty));
        }
    }

    #[test]
    fn directory_normalization_is_equivalent() {
        let empty = MetadataCache::new();
        let doc = Document::new("Notes/x.md");
        for value in ["Notes", "/Notes", "Notes/", "/Notes/", "//Notes//"] {
            assert!(
                ContextFilter::directory(value).matches(&doc, &empty),
                "{value} should match"
            );
        }
    }

    #[test]
    fn directory_nested_value() {
        let empty = MetadataCache::new();
        let filter = ContextFilter::directory("Projects/work");
        assert!(filter.matches(&Document::new("Projects/work/a.md"), &empty));
        assert!(!filter.matches(&Document::new("Projects/workshop/a.md"), &empty));
        assert!(!filter.matches(&Document::new("Projects/a.md"), &empty));
    }

    #[test]
    fn directory_empty_or_root_value_matches_nothing() {
        let empty = MetadataCache::new();
        for value in ["", "/", "///"] {
            let filter = ContextFilter::directory(value);
            assert!(!filter.matches(&Document::new("a.md"), &empty));
            assert!(!filter.matches(&Document::new("Notes/a.md"), &empty));
        }
    }

    #[test]
    fn directory_ignores_metadata() {
        // No metadata at all still allows directory matching
        let empty = MetadataCache::new();
        assert!(ContextFilter::directory("A").matches(&Document::new("A/b.md"), &empty));
    }

    #[test]
    fn tag_matches_inline_with_or_without_hash() {
        let meta = DocumentMetadata::default().with_tags(["#work"]);
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::tag("work")));
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::tag("#work")));
        assert!(!doc_matches("a.md", meta, ContextFilter::tag("play")));
    }

    #[test]
    fn tag_is_case_sensitive_and_exact() {
        let meta = DocumentMetadata::default().with_tags(["#work/client"]);
        assert!(!doc_matches("a.md", meta.clone(), ContextFilter::tag("Work/client")));
        assert!(!doc_matches("a.md", meta, ContextFilter::tag("work")));
    }

    #[test]
    fn tag_matches_frontmatter_list() {
        let meta = DocumentMetadata::default().with_frontmatter("tags", vec!["work", "#home"]);
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::tag("#work")));
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::tag("work")));
        assert!(doc_matches("a.md", meta, ContextFilter::tag("home")));
    }

    #[test]
    fn tag_ignores_non_sequence_frontmatter_tags() {
        let number = DocumentMetadata::default().with_frontmatter("tags", 5i64);
        assert!(!doc_matches("a.md", number, ContextFilter::tag("5")));

        let string = DocumentMetadata::default().with_frontmatter("tags", "work");
        assert!(!doc_matches("a.md", string, ContextFilter::tag("work")));
    }

    #[test]
    fn tag_ignores_non_string_entries() {
        let meta = DocumentMetadata::default().with_frontmatter(
            "tags",
            FrontmatterValue::Sequence(vec![
                FrontmatterValue::Integer(5),
                FrontmatterValue::Null,
                FrontmatterValue::Bool(true),
                FrontmatterValue::Sequence(vec!["nested".into()]),
            ]),
        );
        for value in ["5", "null", "true", "nested"] {
            assert!(!doc_matches("a.md", meta.clone(), ContextFilter::tag(value)));
        }
    }

    #[test]
    fn tag_hash_only_value() {
        let meta = DocumentMetadata::default().with_tags(["#work"]);
        assert!(!doc_matches("a.md", meta, ContextFilter::tag("#")));
    }

    #[test]
    fn tag_without_metadata_never_matches() {
        let empty = MetadataCache::new();
        assert!(!ContextFilter::tag("work").matches(&Document::new("a.md"), &empty));
    }

    #[test]
    fn frontmatter_key_is_presence_only() {
        let meta = DocumentMetadata::default()
            .with_frontmatter("due", FrontmatterValue::Null)
            .with_frontmatter("done", false);
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::frontmatter_key("due")));
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::frontmatter_key("done")));
        assert!(!doc_matches("a.md", meta.clone(), ContextFilter::frontmatter_key("Due")));
        assert!(!doc_matches("a.md", meta, ContextFilter::frontmatter_key("")));
    }

    #[test]
    fn frontmatter_key_without_frontmatter() {
        let meta = DocumentMetadata::default().with_tags(["#due"]);
        assert!(!doc_matches("a.md", meta, ContextFilter::frontmatter_key("due")));
    }

    #[test]
    fn frontmatter_value_splits_on_first_equals() {
        let meta = DocumentMetadata::default().with_frontmatter("url", "https://example.com/a=b");
        assert!(doc_matches(
            "a.md",
            meta,
            ContextFilter::frontmatter_value("url=https://example.com/a=b")
        ));

        let partial = DocumentMetadata::default().with_frontmatter("url", "https://example.com/a");
        assert!(!doc_matches(
            "a.md",
            partial,
            ContextFilter::frontmatter_value("url=https://example.com/a=b")
        ));
    }

    #[test]
    fn frontmatter_value_coerces_scalars() {
        let meta = DocumentMetadata::default()
            .with_frontmatter("priority", 1i64)
            .with_frontmatter("weight", 2.0)
            .with_frontmatter("done", true)
            .with_frontmatter("owner", FrontmatterValue::Null);
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::frontmatter_value("priority=1")));
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::frontmatter_value("weight=2")));
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::frontmatter_value("done=true")));
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::frontmatter_value("owner=null")));
        assert!(!doc_matches("a.md", meta, ContextFilter::frontmatter_value("priority=01")));
    }

    #[test]
    fn frontmatter_value_compares_sequences_joined() {
        let meta = DocumentMetadata::default().with_frontmatter("aliases", vec!["a", "b"]);
        assert!(doc_matches("a.md", meta, ContextFilter::frontmatter_value("aliases=a,b")));
    }

    #[test]
    fn frontmatter_value_without_equals_never_matches() {
        let meta = DocumentMetadata::default().with_frontmatter("noequalssign", "");
        assert!(!doc_matches("a.md", meta, ContextFilter::frontmatter_value("noequalssign")));
    }

    #[test]
    fn frontmatter_value_empty_sides() {
        let meta = DocumentMetadata::default()
            .with_frontmatter("status", "")
            .with_frontmatter("", "x");
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::frontmatter_value("status=")));
        assert!(doc_matches("a.md", meta.clone(), ContextFilter::frontmatter_value("=x")));
        assert!(!doc_matches("a.md", meta, ContextFilter::frontmatter_value("missing=")));
    }

    #[test]
    fn empty_context_returns_everything_in_order() {
        let docs = vec![
            Document::new("b.md"),
            Document::new("a.md"),
            Document::new("c/d.md"),
        ];
        let ctx = Context::new("id", "All");
        let result = filter_documents(&ctx, &docs, &MetadataCache::new());
        assert_eq!(result, docs.iter().collect::<Vec<_>>());
    }

    #[test]
    fn context_requires_every_filter() {
        let mut cache = MetadataCache::new();
        cache.insert("Work/a.md", DocumentMetadata::default().with_tags(["#urgent"]));
        cache.insert("Work/b.md", DocumentMetadata::default());
        cache.insert("Home/c.md", DocumentMetadata::default().with_tags(["#urgent"]));
        let docs: Vec<_> = ["Work/a.md", "Work/b.md", "Home/c.md"]
            .into_iter()
            .map(Document::new)
            .collect();

        let ctx = Context::new("id", "Urgent work")
            .with_filter(ContextFilter::directory("Work"))
            .with_filter(ContextFilter::tag("urgent"));

        let paths: Vec<_> = filter_documents(&ctx, &docs, &cache)
            .into_iter()
            .map(|d| d.path.as_str())
            .collect();
        assert_eq!(paths, vec!["Work/a.md"]);
    }

    #[test]
    fn filter_order_does_not_change_result() {
        let mut cache = MetadataCache::new();
        cache.insert("Work/a.md", DocumentMetadata::default().with_tags(["#urgent"]));
        cache.insert("Work/b.md", DocumentMetadata::default().with_frontmatter("due", "x"));
        let docs = vec![Document::new("Work/a.md"), Document::new("Work/b.md")];

        let forward = Context::new("1", "f")
            .with_filter(ContextFilter::directory("Work"))
            .with_filter(ContextFilter::frontmatter_key("due"));
        let reverse = Context::new("2", "r")
            .with_filter(ContextFilter::frontmatter_key("due"))
            .with_filter(ContextFilter::directory("Work"));

        assert_eq!(
            filter_documents(&forward, &docs, &cache),
            filter_documents(&reverse, &docs, &cache)
        );
    }

    #[test]
    fn normalization_helpers() {
        assert_eq!(normalize_directory("/a/b/"), "a/b");
        assert_eq!(normalize_tag("x"), "#x");
        assert_eq!(normalize_tag("#x"), "#x");
        assert_eq!(split_key_value("a=b=c"), Some(("a", "b=c")));
        assert_eq!(split_key_value("abc"), None);
    }
}
