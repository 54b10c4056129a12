//! # Command Layer
//!
//! This module contains the business logic behind every user-facing
//! operation. Each command lives in its own submodule and is a plain function
//! over a [`ContextStore`](crate::store::ContextStore).
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: No stdout, stderr or terminal concerns. Vault scanning is
//!   done by the API layer, commands receive the documents and metadata.
//! - **Argument parsing**: That's the CLI layer's job.
//! - **Exit codes**: Return `Result`, let the caller decide.
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings:
//! - `contexts`: contexts to display (listed or affected)
//! - `documents`: documents to display (for `files`)
//! - `active_context`: id of the active context, so renderers can mark it
//! - `messages`: structured messages with levels (info, success, warning, error)
//!
//! ## Testing Strategy
//!
//! Command tests use `ContextRegistry<MemBackend>` and a hand-built
//! `MetadataCache`, so no filesystem is involved.
//!
//! ## Command Modules
//!
//! - [`contexts`]: list, show, create, rename, delete, activate
//! - [`filters`]: add, remove, clear
//! - [`files`]: apply a context to the vault's documents

use crate::model::{Context, Document};
use serde::Serialize;

pub mod contexts;
pub mod files;
pub mod filters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct CmdResult {
    pub contexts: Vec<Context>,
    pub documents: Vec<Document>,
    pub active_context: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_contexts(mut self, contexts: Vec<Context>) -> Self {
        self.contexts = contexts;
        self
    }

    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_active_context(mut self, id: Option<String>) -> Self {
        self.active_context = id;
        self
    }
}

/// "1 context" / "3 contexts"
pub(crate) fn pluralize(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}
