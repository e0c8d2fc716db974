//! Editor discovery and launch for `arbor open`.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Locate an editor binary, trying in order: the explicit preference,
/// `$ARBOR_EDITOR`, `$VISUAL`, `$EDITOR`, a shortlist of common editors,
/// and finally the platform opener.
pub fn find_editor(preferred: Option<&str>) -> Result<PathBuf> {
    let mut candidates: Vec<String> = Vec::new();
    if let Some(name) = preferred {
        candidates.push(name.to_string());
    }
    for var in ["ARBOR_EDITOR", "VISUAL", "EDITOR"] {
        if let Ok(value) = env::var(var) {
            if !value.is_empty() {
                candidates.push(value);
            }
        }
    }
    for fallback in ["code", "idea", "subl", "vim", "vi"] {
        candidates.push(fallback.to_string());
    }
    if cfg!(target_os = "macos") {
        candidates.push("open".to_string());
    } else if cfg!(target_os = "linux") {
        candidates.push("xdg-open".to_string());
    }

    for candidate in &candidates {
        if let Ok(path) = which::which(candidate) {
            return Ok(path);
        }
    }
    bail!("no editor found: set ARBOR_EDITOR, VISUAL, or EDITOR")
}

/// Launch `editor` on `path`, inheriting the terminal.
pub fn open_in_editor(path: &Path, editor: &Path) -> Result<()> {
    let status = Command::new(editor)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor {}", editor.display()))?;
    if !status.success() {
        bail!("editor exited with {status}");
    }
    Ok(())
}
