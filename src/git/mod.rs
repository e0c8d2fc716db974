//! Thin synchronous wrappers around the `git` binary: command execution,
//! repository discovery, and worktree/branch operations.

mod branch;
mod exec;
mod repo;
mod worktree;

pub use branch::{branch_exists, branch_in_use, delete_branch, is_merged};
pub use exec::{ensure_installed, Git};
pub use repo::Repo;
pub use worktree::{
    add_worktree, find_by_branch, list_worktrees, prune_worktrees, remove_worktree, Worktree,
};
