//! Apply a context to the vault's documents.
//!
//! With an explicit selector that context is used. Without one the active
//! context applies, and with no active context every document is returned.

use super::{pluralize, CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::filter_documents;
use crate::metadata::MetadataProvider;
use crate::model::Document;
use crate::store::ContextStore;

pub fn run<S, M>(
    store: &S,
    selector: Option<&str>,
    documents: &[Document],
    metadata: &M,
) -> Result<CmdResult>
where
    S: ContextStore,
    M: MetadataProvider + ?Sized,
{
    let active = store.active_context()?;
    let ctx = match selector {
        Some(selector) => Some(store.find_context(selector)?),
        None => active.clone(),
    };

    let mut result = CmdResult::default().with_active_context(active.map(|c| c.id));

    let Some(ctx) = ctx else {
        result.add_message(CmdMessage::info(format!(
            "No active context, showing all {}",
            pluralize(documents.len(), "document")
        )));
        return Ok(result.with_documents(documents.to_vec()));
    };

    let matched: Vec<Document> = filter_documents(&ctx, documents, metadata)
        .into_iter()
        .cloned()
        .collect();

    if matched.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No documents match context '{}'",
            ctx.name
        )));
    }
    Ok(result.with_documents(matched).with_contexts(vec![ctx]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{DocumentMetadata, MetadataCache};
    use crate::model::ContextFilter;
    use crate::store::mem_backend::MemBackend;
    use crate::store::registry::ContextRegistry;

    fn fixture() -> (Vec<Document>, MetadataCache) {
        let documents = vec![
            Document::new("Work/plan.md"),
            Document::new("Work/notes.md"),
            Document::new("Personal/diary.md"),
        ];
        let mut metadata = MetadataCache::new();
        metadata.insert(
            "Work/plan.md",
            DocumentMetadata::default().with_tags(["#active"]),
        );
        metadata.insert("Work/notes.md", DocumentMetadata::default());
        metadata.insert(
            "Personal/diary.md",
            DocumentMetadata::default().with_tags(["#active"]),
        );
        (documents, metadata)
    }

    fn paths(result: &CmdResult) -> Vec<&str> {
        result.documents.iter().map(|d| d.path.as_str()).collect()
    }

    #[test]
    fn test_no_selector_no_active_returns_everything() {
        let store = ContextRegistry::with_backend(MemBackend::new());
        let (documents, metadata) = fixture();

        let result = run(&store, None, &documents, &metadata).unwrap();
        assert_eq!(result.documents.len(), 3);
        assert!(result.contexts.is_empty());
        assert!(result.messages[0].content.contains("all 3 documents"));
    }

    #[test]
    fn test_no_selector_uses_active_context() {
        let mut store = ContextRegistry::with_backend(MemBackend::new());
        let ctx = store
            .create_context("Work", vec![ContextFilter::directory("Work")])
            .unwrap();
        store.set_active_context(Some(&ctx.id)).unwrap();
        let (documents, metadata) = fixture();

        let result = run(&store, None, &documents, &metadata).unwrap();
        assert_eq!(paths(&result), vec!["Work/plan.md", "Work/notes.md"]);
        assert_eq!(result.active_context, Some(ctx.id));
    }

    #[test]
    fn test_explicit_selector_overrides_active() {
        let mut store = ContextRegistry::with_backend(MemBackend::new());
        let work = store
            .create_context("Work", vec![ContextFilter::directory("Work")])
            .unwrap();
        store
            .create_context(
                "Active work",
                vec![ContextFilter::directory("Work"), ContextFilter::tag("active")],
            )
            .unwrap();
        store.set_active_context(Some(&work.id)).unwrap();
        let (documents, metadata) = fixture();

        let result = run(&store, Some("Active work"), &documents, &metadata).unwrap();
        assert_eq!(paths(&result), vec!["Work/plan.md"]);
        assert_eq!(result.contexts[0].name, "Active work");
    }

    #[test]
    fn test_no_matches_adds_message() {
        let mut store = ContextRegistry::with_backend(MemBackend::new());
        store
            .create_context("Archive", vec![ContextFilter::directory("Archive")])
            .unwrap();
        let (documents, metadata) = fixture();

        let result = run(&store, Some("Archive"), &documents, &metadata).unwrap();
        assert!(result.documents.is_empty());
        assert!(result.messages[0].content.contains("No documents match"));
    }

    #[test]
    fn test_unknown_selector_fails() {
        let store = ContextRegistry::with_backend(MemBackend::new());
        let (documents, metadata) = fixture();
        assert!(run(&store, Some("Nope"), &documents, &metadata).is_err());
    }
}
