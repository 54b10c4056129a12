//! # Contexts CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/contextsapp/` — Core library: filter engine, vault scanning, context store
//! - `crates/contexts/` — This CLI tool, depends on `contextsapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/contexts/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering via minijinja templates (render.rs)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/contextsapp/src/api.rs)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/contextsapp/src/commands/*)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rendering
//!
//! Templates live in `src/cli/templates/` and are embedded at compile time via
//! `include_str!()`. `render.rs` turns `CmdResult` values into template data,
//! and templates pick semantic style names that `styles.rs` maps to colors.
//!
//! ## Testing Approach
//!
//! - Argument parsing and rendering are unit tested next to the code.
//! - `tests/cli_e2e.rs` runs the real binary against temporary vaults.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        cli::print_error(&e);
        std::process::exit(1);
    }
}
