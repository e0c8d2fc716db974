//! arbor: a git worktree helper.
//!
//! The core subsystem is worktree naming and selection — label
//! sanitization, collision-free path resolution under two layout modes,
//! tiered substring filtering, and interactive selection with an fzf
//! delegate plus a numbered fallback. Everything else is thin glue around
//! the `git`, `gh`, and `tmux` binaries.

pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod errors;
pub mod gh;
pub mod git;
pub mod naming;
pub mod select;
pub mod tmux;
