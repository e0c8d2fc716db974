//! Command implementations and the helpers they share.

pub mod clean;
pub mod config_cmd;
pub mod go;
pub mod hook;
pub mod new;
pub mod open;
pub mod passthrough;
pub mod pr;
pub mod tmux_new;

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};

use crate::config::{self, Settings};
use crate::git::{Git, Repo, Worktree};
use crate::select::{self, SelectError};

/// Per-invocation state threaded into every command: the git runner, the
/// discovery override from `--repo`, and the output flags.
#[derive(Debug, Clone)]
pub struct Context {
    pub git: Git,
    pub repo_override: Option<PathBuf>,
    pub quiet: bool,
    pub debug: bool,
}

impl Context {
    pub fn discover_repo(&self) -> Result<Repo> {
        Repo::discover(&self.git, self.repo_override.as_deref())
    }
}

/// One display line per worktree: `<branch-or-detached>\t<path>`.
pub(crate) fn display_items(worktrees: &[Worktree]) -> Vec<String> {
    worktrees
        .iter()
        .map(|wt| format!("{}\t{}", format_branch(wt), wt.path.display()))
        .collect()
}

pub(crate) fn format_branch(wt: &Worktree) -> String {
    match &wt.branch {
        Some(branch) if !wt.detached => branch.clone(),
        _ => {
            let short: String = wt.head.chars().take(7).collect();
            format!("(detached: {short})")
        }
    }
}

/// Narrow `items` by `query` (when non-empty) and resolve to a single index
/// into the original list. A single survivor short-circuits selection.
pub(crate) fn choose(
    items: &[String],
    query: &str,
    prompt: &str,
    no_picker: bool,
) -> Result<usize, SelectError> {
    if query.is_empty() {
        return select::select(items, prompt, no_picker);
    }
    let matches = select::filter_by_query(items, query)?;
    if matches.len() == 1 {
        return Ok(matches[0].index);
    }
    let texts: Vec<String> = matches.iter().map(|m| m.text.clone()).collect();
    let picked = select::select(&texts, prompt, no_picker)?;
    Ok(matches[picked].index)
}

/// Yes/no prompt on stderr. Answers no when stdin is not a terminal, so
/// destructive commands never block or misread piped input.
pub(crate) fn confirm(question: &str) -> bool {
    if !atty::is(atty::Stream::Stdin) {
        return false;
    }
    eprint!("{question} (y/N): ");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub(crate) fn validate_branch_name(branch: &str) -> Result<()> {
    if branch.trim().is_empty() {
        bail!("branch name cannot be empty");
    }
    // Patterns git itself refuses; catching them here gives a clean message
    // instead of a git error mid-way.
    if branch.contains("..") || branch.starts_with('-') {
        bail!("invalid branch name: {branch}");
    }
    Ok(())
}

/// The base directory for worktree placement: the repository parent, unless
/// the user supplied one (which must exist and be a directory).
pub(crate) fn resolve_base_dir(custom: Option<&Path>, default: &Path) -> Result<PathBuf> {
    let Some(dir) = custom else {
        return Ok(default.to_path_buf());
    };
    let meta = fs::metadata(dir).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            anyhow!("base directory does not exist: {}", dir.display())
        } else {
            anyhow!("failed to access base directory {}: {err}", dir.display())
        }
    })?;
    if !meta.is_dir() {
        bail!("base directory is not a directory: {}", dir.display());
    }
    Ok(dir.to_path_buf())
}

/// Load layout settings from the default config location.
pub(crate) fn layout_settings() -> Result<Settings> {
    let path = config::default_path()?;
    Ok(Settings::load(&path)?)
}

/// `--cd` only works through the shell function emitted by `arbor hook`;
/// refuse with setup instructions when it is not installed.
pub(crate) fn ensure_shell_function(cd: bool) -> Result<()> {
    if !cd || env::var_os("ARBOR_SHELL_FUNCTION").is_some() {
        return Ok(());
    }
    bail!(
        "cannot change directory: shell integration not configured\n\n\
         To enable the --cd flag, configure your shell:\n\n\
         \x20 Bash:   echo 'eval \"$(arbor hook bash)\"' >> ~/.bashrc\n\
         \x20 Zsh:    echo 'eval \"$(arbor hook zsh)\"' >> ~/.zshrc\n\
         \x20 Fish:   arbor hook fish > ~/.config/fish/functions/arbor.fish\n\n\
         Then restart your shell or run: exec $SHELL"
    )
}
