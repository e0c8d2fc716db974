//! Worktree naming: branch-label sanitization and collision-free path
//! resolution under the configured layout.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::config::{DirectoryFormat, WorktreeSettings};

/// Allowed characters in a sanitized label: `[A-Za-z0-9._-]`.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("static regex"));
static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("static regex"));

/// Conservative cap well under common 255-byte filename limits.
const MAX_LABEL_LEN: usize = 200;

/// Candidate ceiling shared by both layout modes: the plain label plus
/// numbered retries `-2` through `-99`.
const MAX_ATTEMPTS: u32 = 100;

#[derive(Debug, Error)]
pub enum NamingError {
    #[error("could not find a free worktree path after {attempts} attempts")]
    MaxAttemptsExceeded { attempts: u32 },
}

/// Convert a branch name (or any user-supplied label) into a filesystem-
/// and shell-safe directory name.
///
/// Example: `feature/new-ui` becomes `feature-new-ui`.
pub fn sanitize(label: &str) -> String {
    // Branch namespace separators flatten into hyphens first so that
    // "feat/x" and "feat x" land on the same shape.
    let flat = label.replace('/', "-");
    let replaced = DISALLOWED.replace_all(&flat, "-");
    let collapsed = HYPHEN_RUNS.replace_all(&replaced, "-");
    let mut out = collapsed.trim_matches('-').to_string();
    if out.len() > MAX_LABEL_LEN {
        // Everything left is ASCII, so byte truncation cannot split a char.
        out.truncate(MAX_LABEL_LEN);
        let kept = out.trim_end_matches('-').len();
        out.truncate(kept);
    }
    out
}

/// Lowercasing variant of [`sanitize`], for labels that feed case-insensitive
/// consumers such as tmux session names.
pub fn sanitize_lower(label: &str) -> String {
    sanitize(&label.to_lowercase())
}

/// Compute a unique worktree path for `label` under `base_dir`.
///
/// In `subdirectory` mode all worktrees nest under one container directory
/// (`<prefix><repo><suffix>`) and collisions retry on the label component;
/// in `sibling` mode each worktree is a flat `<repo>-<label>` directory next
/// to the repository. Uniqueness is a best-effort existence probe, not an
/// atomic reservation: `git worktree add` fails loudly if the path is taken
/// between check and use.
pub fn resolve_worktree_path(
    base_dir: &Path,
    repo_name: &str,
    label: &str,
    settings: &WorktreeSettings,
) -> Result<PathBuf, NamingError> {
    match settings.directory_format {
        DirectoryFormat::Subdirectory => {
            let container = format!(
                "{}{}{}",
                settings.subdirectory_prefix, repo_name, settings.subdirectory_suffix
            );
            first_free(&base_dir.join(container), label)
        }
        DirectoryFormat::Sibling => first_free(base_dir, &format!("{repo_name}-{label}")),
    }
}

/// Probe `<dir>/<stem>`, then `<dir>/<stem>-2` .. `<dir>/<stem>-99`, and
/// return the first path with no filesystem entry.
fn first_free(dir: &Path, stem: &str) -> Result<PathBuf, NamingError> {
    let candidate = dir.join(stem);
    if !candidate.exists() {
        return Ok(candidate);
    }
    for n in 2..MAX_ATTEMPTS {
        let candidate = dir.join(format!("{stem}-{n}"));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(NamingError::MaxAttemptsExceeded {
        attempts: MAX_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_allowed(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'
    }

    #[test]
    fn test_sanitize_flattens_branch_separators() {
        assert_eq!(sanitize("feature/new-ui"), "feature-new-ui");
        assert_eq!(sanitize("bugfix/issue/1234"), "bugfix-issue-1234");
    }

    #[test]
    fn test_sanitize_strips_shell_metacharacters() {
        assert_eq!(sanitize("evil; rm -rf /"), "evil-rm-rf");
        assert_eq!(sanitize("a b\tc"), "a-b-c");
        assert_eq!(sanitize("héllo wörld"), "h-llo-w-rld");
    }

    #[test]
    fn test_sanitize_collapses_and_trims_hyphens() {
        assert_eq!(sanitize("--a--b--"), "a-b");
        assert_eq!(sanitize("///"), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_sanitize_preserves_dots_and_underscores() {
        assert_eq!(sanitize("release_v1.2.3"), "release_v1.2.3");
    }

    #[test]
    fn test_sanitize_truncates_long_labels() {
        let long = "a".repeat(300);
        assert_eq!(sanitize(&long).len(), 200);

        // A hyphen straddling the cut point must not survive as a trailing
        // separator.
        let mut tricky = "b".repeat(199);
        tricky.push('-');
        tricky.push_str(&"c".repeat(100));
        let out = sanitize(&tricky);
        assert!(out.len() <= 200);
        assert!(!out.ends_with('-'));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let long = "x/".repeat(300);
        for input in [
            "feature/new-ui",
            "evil; rm -rf /",
            "--a--b--",
            "UPPER/Case_1.0",
            "日本語ブランチ",
            long.as_str(),
        ] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_sanitize_charset_invariant() {
        for input in ["a@b#c", "  spaced out  ", "mixed/CASE and space", "~!@#$%^&*()"] {
            let out = sanitize(input);
            assert!(out.chars().all(is_allowed), "bad char in {out:?}");
            assert!(!out.starts_with('-') && !out.ends_with('-'));
            assert!(!out.contains("--"));
            assert!(out.len() <= 200);
        }
    }

    #[test]
    fn test_sanitize_lower() {
        assert_eq!(sanitize_lower("Feature/New-UI"), "feature-new-ui");
    }

    fn subdir_settings() -> WorktreeSettings {
        WorktreeSettings::default()
    }

    fn sibling_settings() -> WorktreeSettings {
        WorktreeSettings {
            directory_format: DirectoryFormat::Sibling,
            ..WorktreeSettings::default()
        }
    }

    #[test]
    fn test_resolve_subdirectory_mode_default() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let base = tmp.path().join("repos");
        let path =
            resolve_worktree_path(&base, "myproject", "feature-login", &subdir_settings())
                .expect("resolve");
        assert_eq!(path, base.join(".myproject-wt").join("feature-login"));
    }

    #[test]
    fn test_resolve_subdirectory_mode_custom_affixes() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let base = tmp.path().to_path_buf();
        let settings = WorktreeSettings {
            directory_format: DirectoryFormat::Subdirectory,
            subdirectory_prefix: String::new(),
            subdirectory_suffix: "-worktrees".to_string(),
        };
        let path = resolve_worktree_path(&base, "proj", "topic", &settings).expect("resolve");
        assert_eq!(path, base.join("proj-worktrees").join("topic"));
    }

    #[test]
    fn test_resolve_subdirectory_mode_numbers_collisions() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let base = tmp.path().to_path_buf();
        let container = base.join(".proj-wt");
        std::fs::create_dir_all(container.join("topic")).expect("occupy");

        let settings = subdir_settings();
        let path = resolve_worktree_path(&base, "proj", "topic", &settings).expect("resolve");
        assert_eq!(path, container.join("topic-2"));

        std::fs::create_dir_all(container.join("topic-2")).expect("occupy");
        let path = resolve_worktree_path(&base, "proj", "topic", &settings).expect("resolve");
        assert_eq!(path, container.join("topic-3"));
    }

    #[test]
    fn test_resolve_sibling_mode() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let base = tmp.path().to_path_buf();
        let settings = sibling_settings();

        let path =
            resolve_worktree_path(&base, "myproject", "feature-login", &settings).expect("resolve");
        assert_eq!(path, base.join("myproject-feature-login"));

        std::fs::create_dir_all(base.join("myproject-feature-login")).expect("occupy");
        let path =
            resolve_worktree_path(&base, "myproject", "feature-login", &settings).expect("resolve");
        assert_eq!(path, base.join("myproject-feature-login-2"));
    }

    #[test]
    fn test_resolve_exhaustion() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let base = tmp.path().to_path_buf();
        let container = base.join(".proj-wt");
        std::fs::create_dir_all(container.join("topic")).expect("occupy");
        for n in 2..100 {
            std::fs::create_dir_all(container.join(format!("topic-{n}"))).expect("occupy");
        }

        let err = resolve_worktree_path(&base, "proj", "topic", &subdir_settings())
            .expect_err("should exhaust");
        assert!(matches!(err, NamingError::MaxAttemptsExceeded { attempts: 100 }));
    }
}
