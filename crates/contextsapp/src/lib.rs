//! # Contexts Architecture
//!
//! Contexts is a **UI-agnostic filter library** for markdown vaults. A context
//! is a named list of filters (directory, inline tag, frontmatter key,
//! frontmatter key/value); applying it to a vault keeps the documents that
//! satisfy every filter. The CLI in the `contexts` crate is one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (contexts crate)                                 │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, scans the vault               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns CmdResult                        │
//! └─────────────────────────────────────────────────────────────┘
//!                   │                          │
//!                   ▼                          ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────┐
//! │  Filter Engine (filter.rs)   │  │  Storage Layer (store/)  │
//! │  - Pure, total, no I/O       │  │  - ContextStore trait    │
//! │  - Reads MetadataProvider    │  │  - Fs / Mem backends     │
//! └──────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! ## Key Principle: The Engine Never Fails
//!
//! [`filter::filter_documents`] takes a context, a document list and a
//! [`metadata::MetadataProvider`] and returns the matching documents in input
//! order. It performs no I/O, raises no errors and treats malformed filter
//! values as "matches nothing". An empty context matches everything.
//!
//! ## Module Overview
//!
//! - [`filter`]: The filter engine
//! - [`model`]: Core data types (`Context`, `ContextFilter`, `Document`)
//! - [`frontmatter`]: YAML frontmatter parsing and value coercion
//! - [`tags`]: Inline `#tag` extraction
//! - [`metadata`]: Per-document metadata and the provider trait
//! - [`vault`]: Walking a vault directory into documents + metadata
//! - [`store`]: Context persistence
//! - [`commands`]: Business logic for each command
//! - [`api`]: The API facade
//! - [`config`]: Configuration management
//! - [`init`]: Vault detection and wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod frontmatter;
pub mod init;
pub mod metadata;
pub mod model;
pub mod store;
pub mod tags;
pub mod vault;

pub use error::{ContextsError, Result};
pub use filter::filter_documents;
pub use metadata::{DocumentMetadata, MetadataCache, MetadataProvider};
pub use model::{Context, ContextFilter, Document, FilterKind};
