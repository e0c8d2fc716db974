use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};

/// Runs `git` subcommands and captures their output. The debug flag is
/// threaded in from the CLI so command echoing never relies on process-wide
/// state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git {
    pub debug: bool,
}

impl Git {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Run `git <args>` in the current directory and return trimmed stdout.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        self.run_in(None, args)
    }

    /// Run `git <args>` in `dir` (when given) and return trimmed stdout.
    /// On a non-zero exit the error carries the subcommand and trimmed
    /// stderr.
    pub fn run_in(&self, dir: Option<&Path>, args: &[&str]) -> Result<String> {
        if self.debug {
            match dir {
                Some(dir) => eprintln!("[debug] (cd {} && git {})", dir.display(), args.join(" ")),
                None => eprintln!("[debug] git {}", args.join(" ")),
            }
        }

        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }

        let subcommand = args.first().copied().unwrap_or("");
        let output = cmd
            .output()
            .with_context(|| format!("failed to run git {subcommand}"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.is_empty() {
                bail!("git {subcommand} failed with {}", output.status);
            }
            bail!("git {subcommand} failed: {stderr}");
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Fail early when `git` is not on PATH.
pub fn ensure_installed() -> Result<()> {
    which::which("git")
        .map(|_| ())
        .map_err(|_| anyhow!("git command not found: please install git"))
}
