use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Validate tmux layout flag value
fn validate_layout(s: &str) -> Result<String, String> {
    match s {
        "tiled" | "horizontal" | "vertical" | "even-horizontal" | "even-vertical"
        | "main-horizontal" | "main-vertical" => Ok(s.to_string()),
        _ => Err(
            "must be one of tiled, horizontal, vertical, even-horizontal, even-vertical, \
             main-horizontal, main-vertical"
                .to_string(),
        ),
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "arbor",
    version,
    about = "Git worktree helper CLI",
    long_about = "arbor wraps git worktree with naming conventions and shortcuts.\n\
                  Worktrees are placed automatically next to the repository; unknown\n\
                  subcommands pass straight through to `git worktree`."
)]
pub struct Cli {
    /// Start repository discovery from this path instead of the current directory
    #[arg(long, global = true, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Minimal output (machine-readable paths stay on stdout)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show external command execution
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new worktree
    New {
        /// Branch to check out (created when it does not exist)
        branch: String,
        /// Start point for a newly created branch (defaults to HEAD)
        start_point: Option<String>,
        /// Base directory for worktree placement (defaults to the repository parent)
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,
        /// Print only the worktree path, for the shell function
        #[arg(long)]
        cd: bool,
    },

    /// Navigate between worktrees
    Go {
        /// Narrow candidates by substring match
        query: Option<String>,
        /// Don't use fzf even when it is installed
        #[arg(long)]
        no_fzf: bool,
        /// Non-interactive mode: select by list index
        #[arg(long, value_name = "N")]
        index: Option<usize>,
    },

    /// Remove worktrees
    Clean {
        /// Narrow candidates by substring match
        query: Option<String>,
        /// Force removal even with uncommitted changes (may lose work)
        #[arg(long)]
        force: bool,
        /// Keep the branch after removing the worktree
        #[arg(long)]
        keep_branch: bool,
        /// Skip all confirmations
        #[arg(long)]
        yes: bool,
    },

    /// Open a worktree in an editor
    Open {
        /// Narrow candidates by substring match
        query: Option<String>,
        /// Editor command to use (overrides ARBOR_EDITOR/VISUAL/EDITOR)
        #[arg(long)]
        editor: Option<String>,
    },

    /// Create a worktree for reviewing a GitHub pull request
    Pr {
        /// Pull request number
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,
        /// Local branch name (default: the PR's branch name)
        #[arg(long)]
        branch: Option<String>,
        /// Remote to fetch from (default: auto-detect)
        #[arg(long)]
        remote: Option<String>,
        /// Print only the worktree path, for the shell function
        #[arg(long)]
        cd: bool,
        /// Skip all prompts and reuse existing branches
        #[arg(long)]
        force: bool,
    },

    /// Manage tmux sessions backed by worktrees
    #[command(subcommand)]
    Tmux(TmuxCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Print shell integration scripts (bash, zsh, fish)
    Hook {
        /// Target shell
        shell: String,
    },

    /// Anything else goes straight to `git worktree`
    #[command(external_subcommand)]
    External(Vec<String>),
}

#[derive(Subcommand, Debug)]
pub enum TmuxCommand {
    /// Create worktree(s) and launch a tmux session with one pane each
    New {
        /// Branch prefix; worktrees are created as <branch>-1 .. <branch>-N
        branch: String,
        /// Start point for newly created branches (defaults to HEAD)
        start_point: Option<String>,
        /// Base directory for worktree placement (defaults to the repository parent)
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,
        /// Number of worktrees to create
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// Tmux layout
        #[arg(long, default_value = "tiled", value_parser = validate_layout)]
        layout: String,
        /// Send the same input to all panes
        #[arg(long)]
        sync_panes: bool,
        /// Don't attach to the session after creating it
        #[arg(long)]
        no_attach: bool,
        /// Custom tmux session name
        #[arg(long, value_name = "NAME")]
        session_name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// List all configuration settings
    List,
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// Reset configuration to defaults
    Reset,
}
