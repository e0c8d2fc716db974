use anyhow::{bail, Context as _, Result};

use crate::gh::{self, PrInfo};
use crate::git::{self, Worktree};
use crate::naming;
use crate::select::SelectError;

use super::{confirm, ensure_shell_function, layout_settings, Context};

pub struct PrOptions {
    /// Local branch name; defaults to the PR's head ref.
    pub branch: Option<String>,
    /// Remote to fetch from; defaults to auto-detection.
    pub remote: Option<String>,
    pub cd: bool,
    pub force: bool,
}

/// `arbor pr <number>`: create a review worktree for a GitHub pull request,
/// handling fork PRs through a temporary remote.
pub fn run(ctx: &Context, number: u64, opts: &PrOptions) -> Result<()> {
    ensure_shell_function(opts.cd)?;

    if !gh::is_available() {
        bail!(
            "GitHub CLI (gh) not found\n\nInstallation:\n  macOS: brew install gh\n  Linux: https://cli.github.com/\n\nAuthentication: gh auth login"
        );
    }

    let repo = ctx
        .discover_repo()
        .context("failed to get repository information")?;

    // --cd reserves stdout for the destination path, so progress chatter is
    // suppressed in that mode too.
    let chatty = !opts.cd && !ctx.quiet;
    if chatty {
        println!("Fetching PR #{number} info...");
    }
    let info = gh::pr_info(number).context("failed to get PR info")?;
    if chatty {
        println!("  Branch: {}", info.head_ref);
        println!("  Owner: {}", info.head_owner);
    }

    let local_branch = opts
        .branch
        .clone()
        .unwrap_or_else(|| info.head_ref.clone());

    if let Some(existing) = git::find_by_branch(&ctx.git, &local_branch)? {
        return report_existing_worktree(ctx, opts, &local_branch, &existing);
    }

    if git::branch_exists(&ctx.git, &local_branch)? && !opts.force && chatty {
        eprintln!("Branch '{local_branch}' already exists locally.");
        if !confirm("Create new worktree using existing branch?") {
            return Err(SelectError::Cancelled.into());
        }
    }

    let (remote, temp_remote) = determine_remote(ctx, opts.remote.as_deref(), &info, number, chatty)?;

    let outcome = checkout_pr_worktree(ctx, &repo, &info, number, &local_branch, &remote, opts);

    if let Some(name) = temp_remote {
        if chatty {
            println!("Removing temporary remote: {name}");
        }
        // Cleanup is best-effort.
        let _ = gh::remove_remote(&ctx.git, &name);
    }
    outcome
}

fn checkout_pr_worktree(
    ctx: &Context,
    repo: &git::Repo,
    info: &PrInfo,
    number: u64,
    local_branch: &str,
    remote: &str,
    opts: &PrOptions,
) -> Result<()> {
    let chatty = !opts.cd && !ctx.quiet;
    if chatty {
        println!("Fetching branch: {remote}/{} -> {local_branch}", info.head_ref);
    }
    gh::fetch_pr_branch(&ctx.git, remote, &info.head_ref, local_branch)
        .context("failed to fetch PR branch")?;

    let label = naming::sanitize(&format!("pr-{number}-{}", info.head_ref));
    let settings = layout_settings()?;
    let path = naming::resolve_worktree_path(&repo.parent, &repo.name, &label, &settings.worktree)
        .context("failed to generate worktree path")?;

    if chatty {
        println!("Creating worktree: {}", path.display());
    }
    git::add_worktree(&ctx.git, &path, local_branch, None, false)
        .context("failed to create worktree")?;

    if opts.cd {
        println!("{}", path.display());
    } else if !ctx.quiet {
        println!();
        println!("✓ PR review worktree created");
        println!("  PR: #{number}");
        println!("  Branch: {local_branch}");
        println!("  Path: {}", path.display());
        println!();
        println!("Navigate: cd {}", path.display());
        println!("Or: arbor go pr-{number}");
    }
    Ok(())
}

fn report_existing_worktree(
    ctx: &Context,
    opts: &PrOptions,
    branch: &str,
    existing: &Worktree,
) -> Result<()> {
    if opts.cd {
        if opts.force {
            println!("{}", existing.path.display());
            return Ok(());
        }
        if !ctx.quiet {
            eprintln!("Branch '{branch}' is already in use by a worktree.");
        }
        if confirm("Navigate to existing worktree?") {
            println!("{}", existing.path.display());
            return Ok(());
        }
        return Err(SelectError::Cancelled.into());
    }

    println!(
        "Branch '{branch}' is already in use by worktree: {}",
        existing.path.display()
    );
    Ok(())
}

/// Pick the remote to fetch the PR head from. Fork PRs without a matching
/// remote get a temporary one (returned as the second element, for later
/// removal).
fn determine_remote(
    ctx: &Context,
    user_remote: Option<&str>,
    info: &PrInfo,
    number: u64,
    chatty: bool,
) -> Result<(String, Option<String>)> {
    if let Some(remote) = user_remote {
        return Ok((remote.to_string(), None));
    }

    if info.cross_repository {
        if gh::remote_exists(&ctx.git, &info.head_owner) {
            return Ok((info.head_owner.clone(), None));
        }
        let temp = format!("arbor-pr-{number}");
        if chatty {
            println!(
                "Adding temporary remote: {temp} ({}/{})",
                info.head_owner, info.head_repo
            );
        }
        gh::add_remote(&ctx.git, &temp, &info.head_owner, &info.head_repo)
            .context("failed to add temporary remote")?;
        return Ok((temp.clone(), Some(temp)));
    }

    Ok(("origin".to_string(), None))
}
