use std::path::Path;

use anyhow::Result;

use super::{list_worktrees, Git};

/// Check whether a local branch exists. `show-ref --verify` reports a
/// missing ref as a fatal error, which is "no", not a failure.
pub fn branch_exists(git: &Git, branch: &str) -> Result<bool> {
    let ref_name = format!("refs/heads/{branch}");
    match git.run(&["show-ref", "--verify", &ref_name]) {
        Ok(_) => Ok(true),
        Err(err) => {
            let msg = err.to_string();
            if msg.contains("not a valid ref") || msg.contains("fatal:") {
                Ok(false)
            } else {
                Err(err)
            }
        }
    }
}

pub fn delete_branch(git: &Git, branch: &str, force: bool) -> Result<()> {
    let flag = if force { "-D" } else { "-d" };
    git.run(&["branch", flag, branch])?;
    Ok(())
}

/// Check whether `branch` is merged into the current branch.
pub fn is_merged(git: &Git, branch: &str) -> Result<bool> {
    let output = git.run(&["branch", "--merged"])?;
    Ok(output.lines().any(|line| {
        // Lines look like "  branch" or "* branch".
        line.trim_start_matches('*').trim() == branch
    }))
}

/// Check whether any worktree other than `exclude_path` has `branch`
/// checked out.
pub fn branch_in_use(git: &Git, branch: &str, exclude_path: &Path) -> Result<bool> {
    let worktrees = list_worktrees(git)?;
    Ok(worktrees
        .iter()
        .any(|wt| wt.branch.as_deref() == Some(branch) && wt.path != exclude_path))
}
