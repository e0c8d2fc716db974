//! Settings persistence: defaults, round-trips, and validation failures.

use std::fs;

use arbor::config::{ConfigError, DirectoryFormat, Settings};

#[test]
fn missing_file_yields_defaults() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("config.yaml");

    let settings = Settings::load(&path).expect("load");
    assert_eq!(
        settings.worktree.directory_format,
        DirectoryFormat::Subdirectory
    );
    assert_eq!(settings.worktree.subdirectory_prefix, ".");
    assert_eq!(settings.worktree.subdirectory_suffix, "-wt");
    assert!(!path.exists(), "load must not create the file");
}

#[test]
fn save_and_reload_round_trip() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    // Parent directories are created on save.
    let path = tmp.path().join("nested").join("config.yaml");

    let mut settings = Settings::default();
    settings
        .set("worktree.directory_format", "sibling")
        .expect("set format");
    settings
        .set("worktree.subdirectory_suffix", "-trees")
        .expect("set suffix");
    settings.save(&path).expect("save");

    let reloaded = Settings::load(&path).expect("reload");
    assert_eq!(reloaded.worktree.directory_format, DirectoryFormat::Sibling);
    assert_eq!(reloaded.worktree.subdirectory_suffix, "-trees");
    // Untouched fields keep their defaults.
    assert_eq!(reloaded.worktree.subdirectory_prefix, ".");
}

#[test]
fn partial_files_fill_in_defaults() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("config.yaml");
    fs::write(&path, "worktree:\n  directory_format: sibling\n").expect("write");

    let settings = Settings::load(&path).expect("load");
    assert_eq!(settings.worktree.directory_format, DirectoryFormat::Sibling);
    assert_eq!(settings.worktree.subdirectory_suffix, "-wt");
}

#[test]
fn invalid_directory_format_fails_to_load() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("config.yaml");
    fs::write(&path, "worktree:\n  directory_format: flat\n").expect("write");

    assert!(matches!(
        Settings::load(&path),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn suffix_without_leading_dash_fails_to_load() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("config.yaml");
    fs::write(&path, "worktree:\n  subdirectory_suffix: wt\n").expect("write");

    assert!(matches!(
        Settings::load(&path),
        Err(ConfigError::InvalidSuffix(_))
    ));
}

#[test]
fn reset_removes_the_file_and_tolerates_absence() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("config.yaml");

    Settings::default().save(&path).expect("save");
    assert!(path.exists());

    Settings::reset(&path).expect("reset");
    assert!(!path.exists());

    // Resetting again is a no-op, not an error.
    Settings::reset(&path).expect("reset twice");
}
