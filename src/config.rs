//! Persisted settings for worktree placement, stored as YAML under the
//! user's config directory.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid directory_format: {0:?} (must be \"subdirectory\" or \"sibling\")")]
    InvalidFormat(String),
    #[error("subdirectory_suffix must start with '-', got {0:?}")]
    InvalidSuffix(String),
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("could not determine a home directory")]
    NoHome,
    #[error("failed to read or write config file")]
    Io(#[from] io::Error),
    #[error("failed to parse config file")]
    Yaml(#[from] serde_yaml::Error),
}

/// Layout strategy for new worktrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryFormat {
    /// All worktrees nest under one `<prefix><repo><suffix>` container.
    Subdirectory,
    /// Each worktree is a flat `<repo>-<branch>` directory next to the repo.
    Sibling,
}

impl DirectoryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectoryFormat::Subdirectory => "subdirectory",
            DirectoryFormat::Sibling => "sibling",
        }
    }
}

impl FromStr for DirectoryFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subdirectory" => Ok(DirectoryFormat::Subdirectory),
            "sibling" => Ok(DirectoryFormat::Sibling),
            other => Err(ConfigError::InvalidFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorktreeSettings {
    pub directory_format: DirectoryFormat,
    pub subdirectory_prefix: String,
    pub subdirectory_suffix: String,
}

impl Default for WorktreeSettings {
    fn default() -> Self {
        Self {
            directory_format: DirectoryFormat::Subdirectory,
            subdirectory_prefix: ".".to_string(),
            subdirectory_suffix: "-wt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub worktree: WorktreeSettings,
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file does
    /// not exist. A file that exists but fails to parse or validate is an
    /// error, not a silent fallback.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        let settings: Settings = serde_yaml::from_str(&data)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write settings to `path` as YAML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Remove the settings file if present.
    pub fn reset(path: &Path) -> Result<(), ConfigError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let suffix = &self.worktree.subdirectory_suffix;
        if !suffix.is_empty() && !suffix.starts_with('-') {
            return Err(ConfigError::InvalidSuffix(suffix.clone()));
        }
        Ok(())
    }

    /// Look up a value by its dotted key, as printed by `arbor config list`.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "worktree.directory_format" => Ok(self.worktree.directory_format.as_str().to_string()),
            "worktree.subdirectory_suffix" => Ok(self.worktree.subdirectory_suffix.clone()),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }

    /// Set a value by its dotted key, validating before any mutation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "worktree.directory_format" => {
                self.worktree.directory_format = value.parse()?;
                Ok(())
            }
            "worktree.subdirectory_suffix" => {
                if !value.is_empty() && !value.starts_with('-') {
                    return Err(ConfigError::InvalidSuffix(value.to_string()));
                }
                self.worktree.subdirectory_suffix = value.to_string();
                Ok(())
            }
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }
}

/// Default config file location: `$XDG_CONFIG_HOME/arbor/config.yaml`,
/// falling back to `~/.config/arbor/config.yaml`.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    let config_home = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home::home_dir().ok_or(ConfigError::NoHome)?.join(".config"),
    };
    Ok(config_home.join("arbor").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(
            settings.worktree.directory_format,
            DirectoryFormat::Subdirectory
        );
        assert_eq!(settings.worktree.subdirectory_prefix, ".");
        assert_eq!(settings.worktree.subdirectory_suffix, "-wt");
    }

    #[test]
    fn test_directory_format_from_str() {
        assert_eq!(
            "subdirectory".parse::<DirectoryFormat>().expect("parse"),
            DirectoryFormat::Subdirectory
        );
        assert_eq!(
            "sibling".parse::<DirectoryFormat>().expect("parse"),
            DirectoryFormat::Sibling
        );
        assert!(matches!(
            "flat".parse::<DirectoryFormat>(),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_set_validates_before_mutation() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("worktree.subdirectory_suffix", "wt"),
            Err(ConfigError::InvalidSuffix(_))
        ));
        assert_eq!(settings.worktree.subdirectory_suffix, "-wt");

        settings
            .set("worktree.subdirectory_suffix", "-trees")
            .expect("set suffix");
        assert_eq!(settings.worktree.subdirectory_suffix, "-trees");

        // Empty suffix is allowed.
        settings
            .set("worktree.subdirectory_suffix", "")
            .expect("set empty suffix");
    }

    #[test]
    fn test_unknown_key() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.get("worktree.nope"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            settings.set("nope", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
    }
}
