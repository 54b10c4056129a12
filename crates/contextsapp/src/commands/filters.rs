//! Filter editing commands.
//!
//! Filters are accepted as given: the engine treats malformed values as
//! "never matches", so these commands store them but attach a warning the
//! user can act on.

use super::{pluralize, CmdMessage, CmdResult};
use crate::error::{ContextsError, Result};
use crate::filter::{normalize_directory, split_key_value};
use crate::model::{ContextFilter, FilterKind};
use crate::store::ContextStore;

/// Describe why a filter can never match, if it can't.
pub fn lint_filter(filter: &ContextFilter) -> Option<String> {
    match filter.kind {
        FilterKind::Directory if normalize_directory(&filter.value).is_empty() => Some(format!(
            "Directory filter '{}' names no directory and will match nothing",
            filter.value
        )),
        FilterKind::FrontmatterValue if split_key_value(&filter.value).is_none() => {
            Some(format!(
                "Frontmatter value filter '{}' has no '=' and will match nothing (use key=value)",
                filter.value
            ))
        }
        _ => None,
    }
}

pub fn add<S: ContextStore>(
    store: &mut S,
    selector: &str,
    filter: ContextFilter,
) -> Result<CmdResult> {
    let ctx = store.find_context(selector)?;
    let warning = lint_filter(&filter);
    let description = filter.to_string();
    let updated = store.add_filter(&ctx.id, filter)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added filter '{}' to context '{}'",
        description, updated.name
    )));
    if let Some(warning) = warning {
        result.add_message(CmdMessage::warning(warning));
    }
    Ok(result.with_contexts(vec![updated]))
}

/// Remove the filter at a 1-based position, as shown by `show`.
pub fn remove<S: ContextStore>(store: &mut S, selector: &str, position: usize) -> Result<CmdResult> {
    let ctx = store.find_context(selector)?;
    let index = position.checked_sub(1).ok_or_else(|| {
        ContextsError::FilterNotFound("Filter positions start at 1".to_string())
    })?;
    let (updated, removed) = store.remove_filter(&ctx.id, index)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed filter '{}' from context '{}'",
        removed, updated.name
    )));
    Ok(result.with_contexts(vec![updated]))
}

pub fn clear<S: ContextStore>(store: &mut S, selector: &str) -> Result<CmdResult> {
    let ctx = store.find_context(selector)?;
    let count = ctx.filters.len();
    let updated = store.set_filters(&ctx.id, Vec::new())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed {} from context '{}'",
        pluralize(count, "filter"),
        updated.name
    )));
    Ok(result.with_contexts(vec![updated]))
}
