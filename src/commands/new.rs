use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::git;
use crate::naming;

use super::{
    ensure_shell_function, layout_settings, resolve_base_dir, validate_branch_name, Context,
};

/// `arbor new <branch> [start-point]`: create a worktree for `branch`,
/// creating the branch itself when it does not exist yet.
pub fn run(
    ctx: &Context,
    branch: &str,
    start_point: Option<&str>,
    base_dir: Option<&Path>,
    cd: bool,
) -> Result<()> {
    ensure_shell_function(cd)?;
    validate_branch_name(branch)?;

    let repo = ctx
        .discover_repo()
        .context("failed to get repository information")?;
    let base = resolve_base_dir(base_dir, &repo.parent)?;

    let label = naming::sanitize(branch);
    let settings = layout_settings()?;
    let path = naming::resolve_worktree_path(&base, &repo.name, &label, &settings.worktree)
        .context("failed to generate worktree path")?;

    if let Some(existing) = git::find_by_branch(&ctx.git, branch)? {
        bail!(
            "branch '{branch}' is already in use at {}\nNavigate: arbor go {branch}\nOpen: arbor open {branch}",
            existing.path.display()
        );
    }

    let branch_exists = git::branch_exists(&ctx.git, branch)?;
    git::add_worktree(&ctx.git, &path, branch, start_point, !branch_exists)
        .context("failed to create worktree")?;

    if cd {
        println!("{}", path.display());
    } else if !ctx.quiet {
        println!("✓ Created worktree");
        println!("  Branch: {branch}");
        println!("  Path: {}", path.display());
    }
    Ok(())
}
