//! tmux session management: one session per branch set, one pane per
//! worktree.

use std::env;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

/// A pane to open: the worktree directory it starts in and the branch it
/// belongs to.
#[derive(Debug, Clone)]
pub struct Pane {
    pub dir: PathBuf,
    pub branch: String,
}

/// Handle to a named tmux session. The name is expected to be sanitized by
/// the caller before it gets here.
#[derive(Debug, Clone)]
pub struct Session {
    name: String,
    debug: bool,
}

pub fn is_available() -> bool {
    which::which("tmux").is_ok()
}

impl Session {
    pub fn new(name: impl Into<String>, debug: bool) -> Self {
        Self {
            name: name.into(),
            debug,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        if self.debug {
            eprintln!("[debug] tmux {}", args.join(" "));
        }
        let output = Command::new("tmux")
            .args(args)
            .stdin(Stdio::null())
            .output()
            .context("failed to run tmux")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            bail!(
                "tmux {} failed: {stderr}",
                args.first().copied().unwrap_or("")
            );
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        Command::new("tmux")
            .args(["has-session", "-t", &self.name])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Kill the session if it exists. Best-effort.
    pub fn kill(&self) {
        let _ = self.run(&["kill-session", "-t", &self.name]);
    }

    /// Create a detached session with one pane per entry of `panes`, apply
    /// the layout, and optionally synchronize pane input.
    pub fn create(&self, panes: &[Pane], layout: &str, sync_panes: bool) -> Result<()> {
        let Some(first) = panes.first() else {
            bail!("no panes to create session for");
        };

        let shell = env::var("SHELL").unwrap_or_else(|_| "/bin/bash".to_string());
        let first_dir = first.dir.display().to_string();
        self.run(&[
            "new-session", "-d", "-s", &self.name, "-c", &first_dir, &shell,
        ])?;

        for (i, pane) in panes.iter().enumerate().skip(1) {
            let dir = pane.dir.display().to_string();
            self.run(&["split-window", "-t", &self.name, "-c", &dir, &shell])
                .with_context(|| format!("failed to split window for pane {i}"))?;
        }

        // Layout is cosmetic; a failure should not tear the session down.
        if !layout.is_empty() {
            let effective = effective_layout(layout);
            if let Err(err) = self.run(&["select-layout", "-t", &self.name, effective]) {
                if self.debug {
                    eprintln!("[debug] ignoring layout failure: {err:#}");
                }
            }
        }

        if sync_panes {
            self.run(&[
                "set-window-option",
                "-t",
                &self.name,
                "synchronize-panes",
                "on",
            ])
            .context("failed to enable synchronize-panes")?;
        }

        Ok(())
    }

    /// Attach the caller's terminal to the session; blocks until detach.
    pub fn attach(&self) -> Result<()> {
        if self.debug {
            eprintln!("[debug] tmux attach-session -t {}", self.name);
        }
        let status = Command::new("tmux")
            .args(["attach-session", "-t", &self.name])
            .status()
            .context("failed to attach to session")?;
        if !status.success() {
            bail!("tmux attach-session exited with {status}");
        }
        Ok(())
    }
}

/// Map the user-facing layout aliases onto tmux's layout names.
fn effective_layout(layout: &str) -> &str {
    match layout {
        "horizontal" => "even-horizontal",
        "vertical" => "even-vertical",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_layout_aliases() {
        assert_eq!(effective_layout("horizontal"), "even-horizontal");
        assert_eq!(effective_layout("vertical"), "even-vertical");
        assert_eq!(effective_layout("tiled"), "tiled");
        assert_eq!(effective_layout("main-vertical"), "main-vertical");
    }
}
