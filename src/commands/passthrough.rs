use std::process::{Command, ExitCode};

use anyhow::{Context as _, Result};

use super::Context;

/// Forward an unknown subcommand to `git worktree` verbatim, inheriting the
/// terminal and propagating the child's exit code. This keeps the full
/// `git worktree` surface (list, lock, prune, ...) available without
/// wrapping each subcommand.
pub fn run(ctx: &Context, args: &[String]) -> Result<ExitCode> {
    let git_path = which::which("git").context("git command not found")?;

    let mut full_args: Vec<&str> = vec!["worktree"];
    full_args.extend(args.iter().map(String::as_str));
    if ctx.debug {
        eprintln!("[debug] git {}", full_args.join(" "));
    }

    let status = Command::new(git_path)
        .args(&full_args)
        .status()
        .context("failed to run git worktree")?;

    let code = status.code().unwrap_or(1).clamp(0, 255) as u8;
    Ok(ExitCode::from(code))
}
