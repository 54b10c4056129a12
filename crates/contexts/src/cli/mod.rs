//! # CLI Behavior
//!
//! This is **one possible UI client** for contexts, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Naked Execution (`contexts`)
//!
//! Running `contexts` with no subcommand defaults to `contexts files`: print the
//! documents of the active context, or every document when none is active.
//!
//! ## Piping
//!
//! `files` prints one vault-relative path per line on stdout. Its notes (e.g.
//! "no documents match") go to stderr so the output can be piped as-is.
//!
//! ## Structured Output
//!
//! `--json` prints the command's `CmdResult` as JSON instead of rendered text.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch, per-command handlers that call the API and print
//! - `render`: Output formatting (alignment, template data)
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling
//! - `templates`: Output templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::{print_error, run};
