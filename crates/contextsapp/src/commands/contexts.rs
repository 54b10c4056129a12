//! Context management commands.
//!
//! CRUD over the context store plus selection of the active context:
//! - `list`: all contexts, marking the active one
//! - `show`: one context and its filters
//! - `create`: new context, optionally with initial filters
//! - `rename`: change the display name (id is stable)
//! - `delete`: remove a context
//! - `activate`: set or clear the active context

use super::filters::lint_filter;
use super::{pluralize, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ContextFilter;
use crate::store::ContextStore;

pub fn list<S: ContextStore>(store: &S) -> Result<CmdResult> {
    let contexts = store.list_contexts()?;
    let active = store.active_context()?.map(|c| c.id);

    let mut result = CmdResult::default();
    if contexts.is_empty() {
        result.add_message(CmdMessage::info(
            "No contexts defined. Create one with `contexts create <name>`",
        ));
    }
    Ok(result.with_contexts(contexts).with_active_context(active))
}

pub fn show<S: ContextStore>(store: &S, selector: &str) -> Result<CmdResult> {
    let ctx = store.find_context(selector)?;
    let active = store.active_context()?.map(|c| c.id);

    let mut result = CmdResult::default();
    if ctx.filters.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Context '{}' has no filters and matches every document",
            ctx.name
        )));
    }
    Ok(result.with_contexts(vec![ctx]).with_active_context(active))
}

pub fn create<S: ContextStore>(
    store: &mut S,
    name: &str,
    filters: Vec<ContextFilter>,
) -> Result<CmdResult> {
    let warnings: Vec<String> = filters.iter().filter_map(lint_filter).collect();
    let ctx = store.create_context(name, filters)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created context '{}' with {}",
        ctx.name,
        pluralize(ctx.filters.len(), "filter")
    )));
    for warning in warnings {
        result.add_message(CmdMessage::warning(warning));
    }
    Ok(result.with_contexts(vec![ctx]))
}

pub fn rename<S: ContextStore>(store: &mut S, selector: &str, new_name: &str) -> Result<CmdResult> {
    let ctx = store.find_context(selector)?;
    let renamed = store.rename_context(&ctx.id, new_name)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Renamed context '{}' to '{}'",
        ctx.name, renamed.name
    )));
    Ok(result.with_contexts(vec![renamed]))
}

pub fn delete<S: ContextStore>(store: &mut S, selector: &str) -> Result<CmdResult> {
    let ctx = store.find_context(selector)?;
    let was_active = store
        .active_context()?
        .is_some_and(|active| active.id == ctx.id);
    let deleted = store.delete_context(&ctx.id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted context '{}'",
        deleted.name
    )));
    if was_active {
        result.add_message(CmdMessage::info("No context is active now"));
    }
    Ok(result.with_contexts(vec![deleted]))
}

/// Set the active context, or clear it when `selector` is `None`.
pub fn activate<S: ContextStore>(store: &mut S, selector: Option<&str>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match selector {
        Some(selector) => {
            let ctx = store.find_context(selector)?;
            store.set_active_context(Some(&ctx.id))?;
            result.add_message(CmdMessage::success(format!(
                "Switched to context '{}'",
                ctx.name
            )));
            Ok(result
                .with_active_context(Some(ctx.id.clone()))
                .with_contexts(vec![ctx]))
        }
        None => {
            store.set_active_context(None)?;
            result.add_message(CmdMessage::success("Cleared the active context"));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;
    use crate::store::registry::ContextRegistry;

    fn store() -> ContextRegistry<MemBackend> {
        ContextRegistry::with_backend(MemBackend::new())
    }

    #[test]
    fn test_list_empty_has_hint() {
        let result = list(&store()).unwrap();
        assert!(result.contexts.is_empty());
        assert!(result.messages[0].content.contains("No contexts defined"));
    }

    #[test]
    fn test_list_marks_active() {
        let mut store = store();
        create(&mut store, "Work", vec![]).unwrap();
        activate(&mut store, Some("Work")).unwrap();

        let result = list(&store).unwrap();
        assert_eq!(result.contexts.len(), 1);
        assert_eq!(result.active_context, Some(result.contexts[0].id.clone()));
    }

    #[test]
    fn test_create_reports_filter_count() {
        let mut store = store();
        let result = create(
            &mut store,
            "Work",
            vec![ContextFilter::directory("Work"), ContextFilter::tag("active")],
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(result.messages[0].content.contains("2 filters"));
        assert_eq!(result.contexts[0].filters.len(), 2);
    }

    #[test]
    fn test_create_warns_on_suspicious_filters() {
        let mut store = store();
        let result = create(
            &mut store,
            "Odd",
            vec![ContextFilter::frontmatter_value("status")],
        )
        .unwrap();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[1].level, MessageLevel::Warning);
        // Stored anyway
        assert_eq!(store.list_contexts().unwrap()[0].filters.len(), 1);
    }

    #[test]
    fn test_show_empty_context_explains_match_all() {
        let mut store = store();
        create(&mut store, "All", vec![]).unwrap();
        let result = show(&store, "All").unwrap();
        assert!(result.messages[0].content.contains("matches every document"));
    }

    #[test]
    fn test_rename_by_position() {
        let mut store = store();
        create(&mut store, "Work", vec![]).unwrap();
        let result = rename(&mut store, "1", "Job").unwrap();
        assert_eq!(result.contexts[0].name, "Job");
        assert!(result.messages[0].content.contains("'Work' to 'Job'"));
    }

    #[test]
    fn test_delete_active_context_notes_it() {
        let mut store = store();
        create(&mut store, "Work", vec![]).unwrap();
        activate(&mut store, Some("Work")).unwrap();

        let result = delete(&mut store, "Work").unwrap();
        assert_eq!(result.messages.len(), 2);
        assert!(store.active_context().unwrap().is_none());
    }

    #[test]
    fn test_activate_unknown_fails() {
        let mut store = store();
        assert!(activate(&mut store, Some("Nope")).is_err());
    }

    #[test]
    fn test_activate_none_clears() {
        let mut store = store();
        create(&mut store, "Work", vec![]).unwrap();
        activate(&mut store, Some("Work")).unwrap();
        activate(&mut store, None).unwrap();
        assert!(store.active_context().unwrap().is_none());
    }
}
