use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_DIR: &str = ".batchname";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default preview format: "table", "summary", "json", or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether a rollback log is written after renaming
    #[serde(default = "default_true")]
    pub write_rollback_log: bool,

    /// Whether dotfiles are left alone
    #[serde(default)]
    pub skip_hidden: bool,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            write_rollback_log: true,
            skip_hidden: false,
            use_color: None,
        }
    }
}

fn default_preview() -> String {
    "summary".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from `.batchname/config.toml` in the working directory,
    /// falling back to the user config directory.
    pub fn load() -> Result<Self> {
        for path in Self::candidate_paths() {
            if path.exists() {
                debug!(path = %path.display(), "loading config");
                return Self::load_from_path(&path);
            }
        }

        Ok(Self::default())
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(CONFIG_DIR).join(CONFIG_FILE));
        }
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("batchname").join(CONFIG_FILE));
        }
        paths
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.preview_format, "summary");
        assert!(config.defaults.write_rollback_log);
        assert!(!config.defaults.skip_hidden);
        assert_eq!(config.defaults.use_color, None);
    }

    #[test]
    fn test_load_save_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".batchname").join("config.toml");

        let mut config = Config::default();
        config.defaults.preview_format = "table".to_string();
        config.defaults.write_rollback_log = false;
        config.defaults.skip_hidden = true;
        config.defaults.use_color = Some(false);

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded.defaults.preview_format, "table");
        assert!(!loaded.defaults.write_rollback_log);
        assert!(loaded.defaults.skip_hidden);
        assert_eq!(loaded.defaults.use_color, Some(false));
    }

    #[test]
    fn test_partial_config() {
        let toml_content = r#"
[defaults]
preview_format = "json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.defaults.preview_format, "json");
        assert!(config.defaults.write_rollback_log);
        assert!(!config.defaults.skip_hidden);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.defaults.preview_format, "summary");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[defaults\npreview_format = ").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }
}
