//! # Rendering Module
//!
//! Styled terminal output from minijinja templates plus the `style` filter
//! backed by [`CONTEXTS_THEME`].
//!
//! Layout calculations (width, padding) stay in Rust because they require
//! Unicode-aware processing. Templates only pick styles.

use super::styles::{names, CONTEXTS_THEME};
use super::templates::{CONTEXT_DETAIL_TEMPLATE, CONTEXT_LIST_TEMPLATE, MESSAGES_TEMPLATE};
use console::Term;
use contextsapp::commands::{CmdMessage, MessageLevel};
use contextsapp::model::{Context, Document, FilterKind};
use minijinja::{Environment, Error, Value};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const ACTIVE_MARKER: &str = "*";

#[derive(Serialize)]
struct ContextLineData {
    marker: String,
    index: String,
    name: String,
    name_style: String,
    padding: String,
    summary: String,
}

#[derive(Serialize)]
struct ContextListData {
    contexts: Vec<ContextLineData>,
}

#[derive(Serialize)]
struct FilterLineData {
    index: String,
    kind: String,
    padding: String,
    value: String,
}

#[derive(Serialize)]
struct ContextDetailData {
    name: String,
    active_label: String,
    id_line: String,
    filters: Vec<FilterLineData>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

/// Whether stdout should get ANSI colors.
pub fn stdout_colors() -> bool {
    Term::stdout().features().colors_supported()
}

/// Whether stderr should get ANSI colors.
pub fn stderr_colors() -> bool {
    Term::stderr().features().colors_supported()
}

/// Render `template` with the theme's `style` filter.
fn render_template<T: Serialize>(template: &str, data: &T, use_color: bool) -> Result<String, Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("style", move |value: Value, name: String| -> String {
        CONTEXTS_THEME.apply(&name, &value.to_string(), use_color)
    });
    env.render_str(template, data)
}

/// One line per context: active marker, position, name, filter summary.
pub fn render_context_list(contexts: &[Context], active: Option<&str>, use_color: bool) -> String {
    let index_width = format!("{}.", contexts.len()).width();
    let name_width = contexts
        .iter()
        .map(|ctx| ctx.name.width())
        .max()
        .unwrap_or(0);

    let lines = contexts
        .iter()
        .enumerate()
        .map(|(i, ctx)| {
            let is_active = active == Some(ctx.id.as_str());
            ContextLineData {
                marker: if is_active { ACTIVE_MARKER } else { " " }.to_string(),
                index: format!("{:>width$}", format!("{}.", i + 1), width = index_width),
                name: ctx.name.clone(),
                name_style: if is_active { names::ACTIVE } else { names::NAME }.to_string(),
                padding: " ".repeat(name_width - ctx.name.width()),
                summary: summarize_filters(ctx),
            }
        })
        .collect();

    let data = ContextListData { contexts: lines };
    render_template(CONTEXT_LIST_TEMPLATE, &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// A context's name, id and numbered filters.
pub fn render_context_detail(ctx: &Context, is_active: bool, use_color: bool) -> String {
    let index_width = format!("{}.", ctx.filters.len()).width();
    let kind_width = ctx
        .filters
        .iter()
        .map(|f| f.kind.as_str().width())
        .max()
        .unwrap_or(0);

    let filters = ctx
        .filters
        .iter()
        .enumerate()
        .map(|(i, filter)| FilterLineData {
            index: format!("{:>width$}", format!("{}.", i + 1), width = index_width),
            kind: filter.kind.as_str().to_string(),
            padding: " ".repeat(kind_width - filter.kind.as_str().width()),
            value: filter.value.clone(),
        })
        .collect();

    let data = ContextDetailData {
        name: ctx.name.clone(),
        active_label: if is_active { " (active)" } else { "" }.to_string(),
        id_line: format!("id: {}", ctx.id),
        filters,
    };
    render_template(CONTEXT_DETAIL_TEMPLATE, &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Plain paths, one per line, for piping.
pub fn render_documents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| format!("{}\n", doc.path))
        .collect()
}

/// Renders command messages using the template system with themed styles.
pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: message_style(msg.level).to_string(),
            })
            .collect(),
    };

    render_template(MESSAGES_TEMPLATE, &data, use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

fn message_style(level: MessageLevel) -> &'static str {
    match level {
        MessageLevel::Info => names::INFO,
        MessageLevel::Success => names::SUCCESS,
        MessageLevel::Warning => names::WARNING,
        MessageLevel::Error => names::ERROR,
    }
}

/// "dir Work, tag #active, key=status" style one-liner.
fn summarize_filters(ctx: &Context) -> String {
    if ctx.filters.is_empty() {
        return "all documents".to_string();
    }
    ctx.filters
        .iter()
        .map(|f| match f.kind {
            FilterKind::Directory => format!("dir {}", f.value),
            FilterKind::Tag => format!("tag {}", f.value),
            FilterKind::FrontmatterKey => format!("has {}", f.value),
            FilterKind::FrontmatterValue => f.value.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
