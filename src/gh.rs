//! GitHub CLI integration for pull-request checkout: PR metadata via
//! `gh pr view`, plus the remote/fetch plumbing around fork PRs.

use std::process::Command;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::git::Git;

/// The slice of PR metadata needed to fetch and name a review worktree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrInfo {
    pub head_ref: String,
    pub head_owner: String,
    pub head_repo: String,
    pub cross_repository: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPrInfo {
    head_ref_name: String,
    head_repository_owner: RawOwner,
    head_repository: RawRepo,
    is_cross_repository: bool,
}

#[derive(Deserialize)]
struct RawOwner {
    login: String,
}

#[derive(Deserialize)]
struct RawRepo {
    name: String,
}

pub fn is_available() -> bool {
    which::which("gh").is_ok()
}

/// Fetch PR metadata through `gh pr view`.
pub fn pr_info(number: u64) -> Result<PrInfo> {
    let output = Command::new("gh")
        .args([
            "pr",
            "view",
            &number.to_string(),
            "--json",
            "headRefName,headRepositoryOwner,headRepository,isCrossRepository",
        ])
        .output()
        .context("failed to run gh")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        bail!("gh pr view failed: {stderr}");
    }

    parse_pr_info(&String::from_utf8_lossy(&output.stdout))
}

fn parse_pr_info(json: &str) -> Result<PrInfo> {
    let raw: RawPrInfo = serde_json::from_str(json).context("failed to parse PR info")?;
    Ok(PrInfo {
        head_ref: raw.head_ref_name,
        head_owner: raw.head_repository_owner.login,
        head_repo: raw.head_repository.name,
        cross_repository: raw.is_cross_repository,
    })
}

/// Fetch the PR head into a local branch via `git fetch <remote>
/// <head>:<local>`. When the local branch already exists the refspec fetch
/// is rejected; fall back to a plain fetch plus a forced branch reset
/// (safe because the branch is not checked out anywhere at this point).
pub fn fetch_pr_branch(git: &Git, remote: &str, remote_branch: &str, local_branch: &str) -> Result<()> {
    let refspec = format!("{remote_branch}:{local_branch}");
    match git.run(&["fetch", remote, &refspec]) {
        Ok(_) => Ok(()),
        Err(err) if err.to_string().contains("already exists") => {
            git.run(&["fetch", remote, remote_branch])
                .context("failed to update branch")?;
            let target = format!("{remote}/{remote_branch}");
            git.run(&["branch", "-f", local_branch, &target])
                .context("failed to reset branch")?;
            Ok(())
        }
        Err(err) => Err(err.context("git fetch failed")),
    }
}

pub fn remote_exists(git: &Git, name: &str) -> bool {
    git.run(&["remote", "get-url", name]).is_ok()
}

fn origin_url(git: &Git) -> Result<String> {
    git.run(&["remote", "get-url", "origin"])
        .context("failed to get origin remote URL")
}

fn is_ssh_url(url: &str) -> bool {
    url.starts_with("git@") || url.starts_with("ssh://")
}

/// Add a remote for `owner/repo`, mirroring origin's URL style (SSH when
/// origin is SSH, HTTPS otherwise).
pub fn add_remote(git: &Git, name: &str, owner: &str, repo: &str) -> Result<()> {
    let url = match origin_url(git) {
        Ok(origin) if is_ssh_url(&origin) => format!("git@github.com:{owner}/{repo}.git"),
        _ => format!("https://github.com/{owner}/{repo}.git"),
    };
    git.run(&["remote", "add", name, &url])
        .context("failed to add remote")?;
    Ok(())
}

pub fn remove_remote(git: &Git, name: &str) -> Result<()> {
    git.run(&["remote", "remove", name])?;
    Ok(())
}
