use std::path::{Path, PathBuf};

use anyhow::Result;

use super::Git;

/// One entry of `git worktree list --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worktree {
    pub path: PathBuf,
    /// Branch name with the `refs/heads/` prefix stripped; `None` when
    /// detached.
    pub branch: Option<String>,
    pub head: String,
    pub detached: bool,
    pub locked: bool,
    pub prunable: bool,
}

impl Worktree {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            branch: None,
            head: String::new(),
            detached: false,
            locked: false,
            prunable: false,
        }
    }
}

/// List all worktrees of the repository.
pub fn list_worktrees(git: &Git) -> Result<Vec<Worktree>> {
    let output = git.run(&["worktree", "list", "--porcelain"])?;
    Ok(parse_porcelain(&output))
}

/// Parse `git worktree list --porcelain` output. Entries are separated by
/// blank lines; attribute lines like `locked` may carry a reason which we
/// do not need.
fn parse_porcelain(output: &str) -> Vec<Worktree> {
    let mut worktrees = Vec::new();
    let mut current: Option<Worktree> = None;

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            if let Some(done) = current.take() {
                worktrees.push(done);
            }
            continue;
        }

        if let Some(path) = line.strip_prefix("worktree ") {
            if let Some(done) = current.take() {
                worktrees.push(done);
            }
            current = Some(Worktree::new(PathBuf::from(path)));
            continue;
        }

        let Some(wt) = current.as_mut() else { continue };
        if let Some(head) = line.strip_prefix("HEAD ") {
            wt.head = head.to_string();
        } else if let Some(branch) = line.strip_prefix("branch ") {
            wt.branch = Some(branch.trim_start_matches("refs/heads/").to_string());
        } else if line == "detached" {
            wt.detached = true;
        } else if line == "locked" || line.starts_with("locked ") {
            wt.locked = true;
        } else if line == "prunable" || line.starts_with("prunable ") {
            wt.prunable = true;
        }
    }

    if let Some(done) = current.take() {
        worktrees.push(done);
    }
    worktrees
}

/// Create a worktree at `path`. With `create_branch` the branch is created
/// via `-b` (from `start_point` when given); otherwise the existing branch
/// is checked out.
pub fn add_worktree(
    git: &Git,
    path: &Path,
    branch: &str,
    start_point: Option<&str>,
    create_branch: bool,
) -> Result<()> {
    let path_str = path.display().to_string();
    let mut args = vec!["worktree", "add"];
    if create_branch {
        args.extend(["-b", branch, path_str.as_str()]);
        if let Some(start) = start_point {
            args.push(start);
        }
    } else {
        args.extend([path_str.as_str(), branch]);
    }
    git.run(&args)?;
    Ok(())
}

pub fn remove_worktree(git: &Git, path: &Path, force: bool) -> Result<()> {
    let path_str = path.display().to_string();
    let mut args = vec!["worktree", "remove"];
    if force {
        args.push("--force");
    }
    args.push(&path_str);
    git.run(&args)?;
    Ok(())
}

/// Drop administrative entries for worktree directories that no longer
/// exist.
pub fn prune_worktrees(git: &Git) -> Result<()> {
    git.run(&["worktree", "prune"])?;
    Ok(())
}

/// Find the worktree that has `branch` checked out, if any.
pub fn find_by_branch(git: &Git, branch: &str) -> Result<Option<Worktree>> {
    let worktrees = list_worktrees(git)?;
    Ok(worktrees
        .into_iter()
        .find(|wt| wt.branch.as_deref() == Some(branch)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
worktree /home/user/proj
HEAD 1111111111111111111111111111111111111111
branch refs/heads/main

worktree /home/user/.proj-wt/feature-login
HEAD 2222222222222222222222222222222222222222
branch refs/heads/feature/login
locked reason text

worktree /home/user/.proj-wt/spike
HEAD 3333333333333333333333333333333333333333
detached
prunable";

    #[test]
    fn test_parse_porcelain() {
        let worktrees = parse_porcelain(SAMPLE);
        assert_eq!(worktrees.len(), 3);

        assert_eq!(worktrees[0].path, PathBuf::from("/home/user/proj"));
        assert_eq!(worktrees[0].branch.as_deref(), Some("main"));
        assert!(!worktrees[0].detached);

        assert_eq!(
            worktrees[1].branch.as_deref(),
            Some("feature/login"),
            "refs/heads/ prefix must be stripped"
        );
        assert!(worktrees[1].locked);

        assert!(worktrees[2].detached);
        assert!(worktrees[2].prunable);
        assert_eq!(worktrees[2].branch, None);
        assert!(worktrees[2].head.starts_with("333"));
    }

    #[test]
    fn test_parse_porcelain_empty() {
        assert!(parse_porcelain("").is_empty());
    }
}
