use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};

use crate::git;
use crate::naming;
use crate::tmux::{self, Pane, Session};

use super::{layout_settings, resolve_base_dir, validate_branch_name, Context};

pub struct TmuxNewOptions {
    pub base_dir: Option<PathBuf>,
    pub count: u32,
    pub layout: String,
    pub sync_panes: bool,
    pub no_attach: bool,
    pub session_name: Option<String>,
}

/// `arbor tmux new <branch> [start-point]`: create numbered worktrees
/// (`<branch>-1` .. `<branch>-N`) and open them as panes of one tmux
/// session.
pub fn run(
    ctx: &Context,
    branch_prefix: &str,
    start_point: Option<&str>,
    opts: &TmuxNewOptions,
) -> Result<()> {
    validate_branch_name(branch_prefix)?;

    if !tmux::is_available() {
        bail!("tmux is not installed. Install with: brew install tmux (macOS) or apt install tmux (Linux)");
    }
    if opts.count < 1 {
        bail!("count must be at least 1");
    }

    let repo = ctx
        .discover_repo()
        .context("failed to get repository information")?;
    let base = resolve_base_dir(opts.base_dir.as_deref(), &repo.parent)?;
    let settings = layout_settings()?;

    if !ctx.quiet {
        println!("Creating worktrees...");
    }
    let mut panes = Vec::with_capacity(opts.count as usize);
    for i in 1..=opts.count {
        let branch = format!("{branch_prefix}-{i}");

        if let Some(existing) = git::find_by_branch(&ctx.git, &branch)? {
            bail!(
                "branch '{branch}' is already in use at {}",
                existing.path.display()
            );
        }

        let label = naming::sanitize(&branch);
        let path = naming::resolve_worktree_path(&base, &repo.name, &label, &settings.worktree)
            .with_context(|| format!("failed to generate worktree path for {branch}"))?;

        let branch_exists = git::branch_exists(&ctx.git, &branch)?;
        git::add_worktree(&ctx.git, &path, &branch, start_point, !branch_exists)
            .with_context(|| format!("failed to create worktree for {branch}"))?;

        if !ctx.quiet {
            println!("  ✓ {branch} -> {}", path.display());
        }
        panes.push(Pane {
            dir: path,
            branch,
        });
    }

    // User-supplied session names are sanitized too: they end up inside
    // tmux target strings.
    let session_name = match &opts.session_name {
        Some(name) => naming::sanitize(name),
        None => format!("arbor-{}-{}", repo.name, naming::sanitize(branch_prefix)),
    };

    let session = Session::new(session_name, ctx.debug);
    if session.exists() {
        session.kill();
    }

    if !ctx.quiet {
        println!();
        println!("Starting tmux session...");
    }
    session
        .create(&panes, &opts.layout, opts.sync_panes)
        .context("failed to create tmux session")?;
    if !ctx.quiet {
        println!("✓ Tmux session created: {}", session.name());
    }

    if opts.no_attach {
        if !ctx.quiet {
            println!();
            println!("Session running in background");
            println!("Attach with: tmux attach -t {}", session.name());
        }
    } else {
        if !ctx.quiet {
            println!();
            println!("Attaching to tmux session (Ctrl-b d to detach)...");
        }
        session.attach()?;
    }
    Ok(())
}
