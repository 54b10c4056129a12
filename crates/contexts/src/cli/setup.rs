use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

impl From<CompletionShell> for clap_complete::Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => clap_complete::Shell::Bash,
            CompletionShell::Zsh => clap_complete::Shell::Zsh,
            CompletionShell::Fish => clap_complete::Shell::Fish,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "contexts",
    bin_name = "contexts",
    version,
    disable_help_subcommand = true,
    after_help = "Enable shell completions:\n  eval \"$(contexts completions bash)\"  # add to ~/.bashrc\n  eval \"$(contexts completions zsh)\"   # add to ~/.zshrc"
)]
#[command(about = "Slice a markdown vault into named contexts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Vault root (default: nearest directory with .contexts or .obsidian)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub vault: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Builds the clap Command, used for completions.
pub fn build_command() -> clap::Command {
    Cli::command()
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List all contexts
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Show a context and its filters
    #[command(display_order = 2)]
    Show {
        /// Context id, name or list position
        context: String,
    },

    /// Create a new context
    #[command(alias = "new", display_order = 3)]
    Create {
        /// Name of the context
        name: String,

        /// Keep documents inside this directory (repeatable)
        #[arg(long = "dir", value_name = "DIR")]
        dirs: Vec<String>,

        /// Keep documents carrying this inline tag (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Keep documents whose frontmatter has this key (repeatable)
        #[arg(long = "key", value_name = "KEY")]
        keys: Vec<String>,

        /// Keep documents whose frontmatter key equals a value (repeatable)
        #[arg(long = "value", value_name = "KEY=VALUE")]
        values: Vec<String>,
    },

    /// Rename a context
    #[command(alias = "mv", display_order = 4)]
    Rename {
        /// Context id, name or list position
        context: String,
        /// New name
        name: String,
    },

    /// Delete a context
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Context id, name or list position
        context: String,
    },

    /// Add a filter to a context
    #[command(display_order = 10)]
    Add {
        /// Context id, name or list position
        context: String,
        /// directory, tag, frontmatter-key (key) or frontmatter-value (value)
        kind: String,
        /// Filter operand (key=value for frontmatter-value)
        value: String,
    },

    /// Remove a filter from a context by its position
    #[command(display_order = 11)]
    Remove {
        /// Context id, name or list position
        context: String,
        /// Filter position as shown by `show` (starting at 1)
        position: usize,
    },

    /// Remove every filter from a context
    #[command(display_order = 12)]
    Clear {
        /// Context id, name or list position
        context: String,
    },

    /// Set the active context
    #[command(display_order = 20)]
    Use {
        /// Context id, name or list position
        #[arg(conflicts_with = "none")]
        context: Option<String>,

        /// Clear the active context
        #[arg(long)]
        none: bool,
    },

    /// Print the documents of a context (default: the active one)
    #[command(alias = "f", display_order = 21)]
    Files {
        /// Context id, name or list position
        context: Option<String>,
    },

    /// Show the effective configuration
    #[command(display_order = 30)]
    Config,

    /// Print a shell completion script
    #[command(display_order = 31)]
    Completions {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}
