use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use super::Git;

/// The repository a command operates on. `root` is always the main
/// worktree's root, even when discovery starts inside a linked worktree.
#[derive(Debug, Clone)]
pub struct Repo {
    pub root: PathBuf,
    pub name: String,
    pub parent: PathBuf,
}

impl Repo {
    /// Discover the repository from `dir` (or the current directory).
    pub fn discover(git: &Git, dir: Option<&Path>) -> Result<Self> {
        git.run_in(dir, &["rev-parse", "--show-toplevel"])
            .context("not in a git repository")?;

        // The first entry of the porcelain listing is the main worktree.
        let output = git
            .run_in(dir, &["worktree", "list", "--porcelain"])
            .context("failed to get worktree list")?;
        let root = output
            .lines()
            .find_map(|line| line.trim().strip_prefix("worktree "))
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("could not find main worktree in git output"))?;

        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("repository root has no directory name: {}", root.display()))?;
        let parent = root
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("repository root has no parent: {}", root.display()))?;

        Ok(Self { root, name, parent })
    }
}
