//! End-to-end behavior of the path resolver against a real filesystem.

use std::fs;

use arbor::config::{DirectoryFormat, WorktreeSettings};
use arbor::naming::{resolve_worktree_path, sanitize, NamingError};

fn sibling() -> WorktreeSettings {
    WorktreeSettings {
        directory_format: DirectoryFormat::Sibling,
        ..WorktreeSettings::default()
    }
}

#[test]
fn resolver_is_deterministic_on_empty_filesystem() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let base = tmp.path().join("work");

    let first = resolve_worktree_path(&base, "myproject", "feature-login", &WorktreeSettings::default())
        .expect("resolve");
    assert_eq!(first, base.join(".myproject-wt").join("feature-login"));

    // Nothing was created, so resolving again yields the same candidate.
    let second = resolve_worktree_path(&base, "myproject", "feature-login", &WorktreeSettings::default())
        .expect("resolve");
    assert_eq!(first, second);
}

#[test]
fn resolver_steps_over_occupied_paths() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let base = tmp.path().to_path_buf();
    let settings = WorktreeSettings::default();

    let first = resolve_worktree_path(&base, "myproject", "feature-login", &settings)
        .expect("resolve");
    fs::create_dir_all(&first).expect("occupy");

    let second = resolve_worktree_path(&base, "myproject", "feature-login", &settings)
        .expect("resolve");
    assert_eq!(second, base.join(".myproject-wt").join("feature-login-2"));
}

#[test]
fn sibling_mode_places_flat_directories() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let base = tmp.path().to_path_buf();

    let path = resolve_worktree_path(&base, "myproject", "feature-login", &sibling())
        .expect("resolve");
    assert_eq!(path, base.join("myproject-feature-login"));

    fs::create_dir_all(&path).expect("occupy");
    let next = resolve_worktree_path(&base, "myproject", "feature-login", &sibling())
        .expect("resolve");
    assert_eq!(next, base.join("myproject-feature-login-2"));
}

#[test]
fn sequential_resolution_yields_distinct_paths() {
    // Simulates the real creation loop: resolve, create, repeat. Every
    // resolved path must be new.
    let tmp = tempfile::tempdir().expect("tmpdir");
    let base = tmp.path().to_path_buf();
    let settings = WorktreeSettings::default();

    let mut seen = Vec::new();
    for _ in 0..10 {
        let path = resolve_worktree_path(&base, "proj", "topic", &settings).expect("resolve");
        assert!(!seen.contains(&path), "duplicate path {path:?}");
        fs::create_dir_all(&path).expect("create");
        seen.push(path);
    }
}

#[test]
fn exhaustion_fails_after_the_numbered_ladder() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let base = tmp.path().to_path_buf();
    let settings = sibling();

    fs::create_dir_all(base.join("proj-topic")).expect("occupy");
    for n in 2..100 {
        fs::create_dir_all(base.join(format!("proj-topic-{n}"))).expect("occupy");
    }

    let err = resolve_worktree_path(&base, "proj", "topic", &settings).expect_err("exhausted");
    assert!(matches!(err, NamingError::MaxAttemptsExceeded { .. }));
}

#[test]
fn sanitized_branches_resolve_to_safe_paths() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let base = tmp.path().to_path_buf();

    let label = sanitize("feature/new-ui");
    assert_eq!(label, "feature-new-ui");

    let path = resolve_worktree_path(&base, "proj", &label, &WorktreeSettings::default())
        .expect("resolve");
    assert_eq!(path, base.join(".proj-wt").join("feature-new-ui"));
}
