use anyhow::{bail, Context as _, Result};

use crate::git::{self, Worktree};
use crate::select::SelectError;

use super::{choose, confirm, display_items, Context};

/// `arbor clean [query]`: remove a worktree (never the main one), then
/// offer to delete its branch.
pub fn run(
    ctx: &Context,
    query: Option<&str>,
    force: bool,
    keep_branch: bool,
    yes: bool,
) -> Result<()> {
    let repo = ctx
        .discover_repo()
        .context("failed to get repository information")?;
    let worktrees = git::list_worktrees(&ctx.git).context("failed to get worktrees")?;
    if worktrees.is_empty() {
        bail!("no worktrees found");
    }

    let removable: Vec<Worktree> = worktrees
        .into_iter()
        .filter(|wt| wt.path != repo.root)
        .collect();
    if removable.is_empty() {
        bail!("no removable worktrees found (the main worktree cannot be removed)");
    }

    let items = display_items(&removable);
    let index = choose(
        &items,
        query.unwrap_or(""),
        "Select worktree to remove",
        false,
    )?;
    let selected = &removable[index];

    if !yes {
        eprintln!("The following worktree will be removed:");
        eprintln!("  Path: {}", selected.path.display());
        if let Some(branch) = &selected.branch {
            eprintln!("  Branch: {branch}");
        }
        if !confirm("Are you sure?") {
            return Err(SelectError::Cancelled.into());
        }
    }

    git::remove_worktree(&ctx.git, &selected.path, force).context("failed to remove worktree")?;
    if !ctx.quiet {
        println!("✓ Worktree removed: {}", selected.path.display());
    }

    handle_branch_deletion(ctx, selected, keep_branch, yes)?;

    // Stale administrative files; best-effort.
    let _ = git::prune_worktrees(&ctx.git);
    Ok(())
}

fn handle_branch_deletion(
    ctx: &Context,
    wt: &Worktree,
    keep_branch: bool,
    yes: bool,
) -> Result<()> {
    let Some(branch) = &wt.branch else {
        return Ok(());
    };
    if keep_branch {
        return Ok(());
    }

    if git::branch_in_use(&ctx.git, branch, &wt.path).context("failed to check branch usage")? {
        if !ctx.quiet {
            eprintln!("⚠ branch '{branch}' is in use by another worktree, keeping it");
        }
        return Ok(());
    }

    if !yes && !confirm(&format!("Also delete branch '{branch}'?")) {
        return Ok(());
    }

    let merged = git::is_merged(&ctx.git, branch).unwrap_or_else(|err| {
        if !ctx.quiet {
            eprintln!("warning: failed to check if branch is merged: {err:#}");
        }
        false
    });

    let force_delete = if merged {
        false
    } else {
        eprintln!("⚠ branch '{branch}' is not merged");
        if yes {
            true
        } else if confirm("Force delete? (git branch -D)") {
            true
        } else {
            if !ctx.quiet {
                println!("Branch '{branch}' will be kept");
            }
            return Ok(());
        }
    };

    git::delete_branch(&ctx.git, branch, force_delete).context("failed to delete branch")?;
    if !ctx.quiet {
        println!("✓ Branch deleted: {branch}");
    }
    Ok(())
}
