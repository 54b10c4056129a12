//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Logging**: Initialize `env_logger` on stderr (`-v` for debug)
//! 3. **Context Setup**: Locate the vault, load config, open the store
//! 4. **API Dispatch**: Call the appropriate `ContextsApi` method
//! 5. **Output Formatting**: Convert `CmdResult` into terminal output or JSON

use super::render::{
    render_context_detail, render_context_list, render_documents, render_messages, stderr_colors,
    stdout_colors,
};
use super::setup::{build_command, Cli, Commands, CompletionShell};
use clap::Parser;
use contextsapp::api::ContextsApi;
use contextsapp::commands::{CmdMessage, CmdResult};
use contextsapp::config::ContextsConfig;
use contextsapp::error::{ContextsError, Result};
use contextsapp::init::{initialize, FsContextStore};
use contextsapp::model::ContextFilter;
use contextsapp::store::backend::StorageBackend;
use log::debug;
use std::path::PathBuf;

struct AppContext {
    api: ContextsApi<FsContextStore>,
    config: ContextsConfig,
    config_files: Vec<PathBuf>,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Completions don't need a vault
    if let Some(Commands::Completions { shell }) = &cli.command {
        return handle_completions(*shell);
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Show { context }) => handle_show(&ctx, &context),
        Some(Commands::Create {
            name,
            dirs,
            tags,
            keys,
            values,
        }) => {
            let filters = dirs
                .into_iter()
                .map(ContextFilter::directory)
                .chain(tags.into_iter().map(ContextFilter::tag))
                .chain(keys.into_iter().map(ContextFilter::frontmatter_key))
                .chain(values.into_iter().map(ContextFilter::frontmatter_value))
                .collect();
            let result = ctx.api.create_context(&name, filters)?;
            print_result(&ctx, &result)
        }
        Some(Commands::Rename { context, name }) => {
            let result = ctx.api.rename_context(&context, &name)?;
            print_result(&ctx, &result)
        }
        Some(Commands::Delete { context }) => {
            let result = ctx.api.delete_context(&context)?;
            print_result(&ctx, &result)
        }
        Some(Commands::Add {
            context,
            kind,
            value,
        }) => {
            let result = ctx.api.add_filter(&context, &kind, &value)?;
            print_result(&ctx, &result)
        }
        Some(Commands::Remove { context, position }) => {
            let result = ctx.api.remove_filter(&context, position)?;
            print_result(&ctx, &result)
        }
        Some(Commands::Clear { context }) => {
            let result = ctx.api.clear_filters(&context)?;
            print_result(&ctx, &result)
        }
        Some(Commands::Use { context, none }) => handle_use(&mut ctx, context, none),
        Some(Commands::Files { context }) => handle_files(&ctx, context.as_deref()),
        Some(Commands::Config) => handle_config(&ctx),
        Some(Commands::Completions { shell }) => handle_completions(shell),
        None => handle_files(&ctx, None),
    }
}

/// Report a failed command on stderr, styled like other messages.
pub fn print_error(error: &ContextsError) {
    let message = CmdMessage::error(format!("Error: {}", error));
    eprint!("{}", render_messages(&[message], stderr_colors()));
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.vault.clone())?;
    debug!("using data dir {}", ctx.data_dir.display());

    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
        config_files: ctx.config_files,
        json: cli.json,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(ContextsError::Serialization)?;
    println!("{}", json);
    Ok(())
}

/// Messages only, for commands whose result is the change itself.
fn print_result(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    if ctx.json {
        return print_json(result);
    }
    print!("{}", render_messages(&result.messages, stdout_colors()));
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_contexts()?;
    if ctx.json {
        return print_json(&result);
    }
    let use_color = stdout_colors();
    print!(
        "{}",
        render_context_list(&result.contexts, result.active_context.as_deref(), use_color)
    );
    print!("{}", render_messages(&result.messages, use_color));
    Ok(())
}

fn handle_show(ctx: &AppContext, selector: &str) -> Result<()> {
    let result = ctx.api.show_context(selector)?;
    if ctx.json {
        return print_json(&result);
    }
    let use_color = stdout_colors();
    for context in &result.contexts {
        let is_active = result.active_context.as_deref() == Some(context.id.as_str());
        print!("{}", render_context_detail(context, is_active, use_color));
    }
    print!("{}", render_messages(&result.messages, use_color));
    Ok(())
}

/// `use <ctx>` activates, `use --none` clears, bare `use` lists with the
/// active context marked.
fn handle_use(ctx: &mut AppContext, selector: Option<String>, none: bool) -> Result<()> {
    match (selector, none) {
        (Some(selector), _) => {
            let result = ctx.api.use_context(Some(&selector))?;
            print_result(ctx, &result)
        }
        (None, true) => {
            let result = ctx.api.use_context(None)?;
            print_result(ctx, &result)
        }
        (None, false) => handle_list(ctx),
    }
}

fn handle_files(ctx: &AppContext, selector: Option<&str>) -> Result<()> {
    let result = ctx.api.files(selector)?;
    if ctx.json {
        return print_json(&result);
    }
    print!("{}", render_documents(&result.documents));
    // Notes go to stderr so stdout stays a clean path list
    eprint!("{}", render_messages(&result.messages, stderr_colors()));
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    let vault_root = ctx.api.vault().root();
    let contexts_file = ctx.api.store().backend().settings_path();
    if ctx.json {
        return print_json(&serde_json::json!({
            "vault": vault_root,
            "contexts_file": contexts_file,
            "config_files": ctx.config_files,
            "config": ctx.config,
        }));
    }

    println!("# vault: {}", vault_root.display());
    println!("# contexts file: {}", contexts_file.display());
    for file in &ctx.config_files {
        let state = if file.exists() { "found" } else { "not found" };
        println!("# config file: {} ({})", file.display(), state);
    }
    let body = toml::to_string(&ctx.config).map_err(|e| ContextsError::Config(e.to_string()))?;
    print!("{}", body);
    Ok(())
}

fn handle_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = build_command();
    clap_complete::generate(
        clap_complete::Shell::from(shell),
        &mut cmd,
        "contexts",
        &mut std::io::stdout(),
    );
    Ok(())
}
