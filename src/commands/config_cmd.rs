use anyhow::{Context as _, Result};

use crate::config::{self, Settings};

/// `arbor config list`
pub fn run_list() -> Result<()> {
    let path = config::default_path()?;
    let settings = Settings::load(&path).context("failed to load config")?;

    let status = if path.exists() {
        "found"
    } else {
        "not found (using defaults)"
    };
    println!("Configuration file: {} ({status})", path.display());
    println!();
    println!("Settings:");
    println!(
        "  worktree.directory_format     = {}",
        settings.worktree.directory_format.as_str()
    );
    println!(
        "  worktree.subdirectory_suffix  = {}",
        settings.worktree.subdirectory_suffix
    );
    Ok(())
}

/// `arbor config get <key>`
pub fn run_get(key: &str) -> Result<()> {
    let path = config::default_path()?;
    let settings = Settings::load(&path).context("failed to load config")?;
    println!("{}", settings.get(key)?);
    Ok(())
}

/// `arbor config set <key> <value>`
pub fn run_set(key: &str, value: &str) -> Result<()> {
    let path = config::default_path()?;
    let mut settings = Settings::load(&path).context("failed to load config")?;
    settings.set(key, value)?;
    settings.save(&path).context("failed to save config")?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

/// `arbor config reset`
pub fn run_reset() -> Result<()> {
    let path = config::default_path()?;
    Settings::reset(&path).context("failed to reset config")?;
    println!("✓ Configuration reset to defaults");
    Ok(())
}
