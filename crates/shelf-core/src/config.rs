//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/shelf/config.toml)
//! 3. Environment variables (SHELF_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
const ENV_PREFIX: &str = "SHELF";

/// Keys accepted by [`Config::set`]
pub const SETTABLE_KEYS: &[&str] = &[
    "data_dir",
    "library_file",
    "export_file",
    "animate",
    "animation_delay_ms",
    "log_level",
    "log_file",
];

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Directory holding the library and export files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Backing file name, relative to `data_dir`
    #[serde(default = "default_library_file")]
    pub library_file: String,

    /// Export file name, relative to `data_dir`
    #[serde(default = "default_export_file")]
    pub export_file: String,

    /// Animate confirmation messages in the interactive menu
    #[serde(default = "default_animate")]
    pub animate: bool,

    /// Delay between animated characters
    #[serde(default = "default_animation_delay_ms")]
    pub animation_delay_ms: u64,

    /// Log level (trace, debug, info, warn, error). Logging is off when unset.
    #[serde(default)]
    pub log_level: Option<String>,

    /// Log file path (defaults to `<data_dir>/shelf.log`)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            library_file: default_library_file(),
            export_file: default_export_file(),
            animate: default_animate(),
            animation_delay_ms: default_animation_delay_ms(),
            log_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (SHELF_DATA_DIR, SHELF_ANIMATE, SHELF_LOG_LEVEL)
    /// 2. Config file (~/.config/shelf/config.toml or SHELF_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(config_path: Option<&PathBuf>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load only what the config file itself says
    ///
    /// No environment overrides, so the result can be written back without
    /// baking them into the file.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_ANIMATE", ENV_PREFIX)) {
            self.animate =
                parse_bool(&val).with_context(|| format!("Invalid {}_ANIMATE", ENV_PREFIX))?;
        }

        // Empty string turns logging off
        if let Ok(val) = std::env::var(format!("{}_LOG_LEVEL", ENV_PREFIX)) {
            self.log_level = if val.is_empty() { None } else { Some(val) };
        }

        Ok(())
    }

    /// Check that the settings work together
    ///
    /// The export file must not resolve to the backing file.
    pub fn validate(&self) -> Result<()> {
        if self.export_path() == self.library_path() {
            bail!(
                "export_file and library_file must be different files (both are {:?})",
                self.library_path()
            );
        }
        Ok(())
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Set a single value by key, validating it
    ///
    /// On error the configuration is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        updated.assign(key, value)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn assign(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "library_file" => self.library_file = non_empty(key, value)?,
            "export_file" => self.export_file = non_empty(key, value)?,
            "animate" => {
                self.animate =
                    parse_bool(value).with_context(|| format!("Invalid value for {}", key))?
            }
            "animation_delay_ms" => {
                self.animation_delay_ms = value
                    .parse()
                    .with_context(|| format!("Invalid value for {}: {}", key, value))?
            }
            "log_level" => self.log_level = optional(value),
            "log_file" => self.log_file = optional(value).map(PathBuf::from),
            _ => bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                SETTABLE_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Save configuration to the given file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with SHELF_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shelf")
            .join("config.toml")
    }

    /// Get the path to the JSON backing file
    pub fn library_path(&self) -> PathBuf {
        self.data_dir.join(&self.library_file)
    }

    /// Get the path to the plain-text export file
    pub fn export_path(&self) -> PathBuf {
        self.data_dir.join(&self.export_file)
    }

    /// Get the path logs are written to
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("shelf.log"))
    }
}

/// The library lives next to where the program is run
fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_library_file() -> String {
    "library.json".to_string()
}

fn default_export_file() -> String {
    "library_export.txt".to_string()
}

fn default_animate() -> bool {
    true
}

fn default_animation_delay_ms() -> u64 {
    30
}

fn parse_bool(val: &str) -> Result<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => bail!("expected true, false, 1 or 0, got '{}'", val),
    }
}

fn optional(val: &str) -> Option<String> {
    if val.is_empty() {
        None
    } else {
        Some(val.to_string())
    }
}

fn non_empty(key: &str, val: &str) -> Result<String> {
    if val.trim().is_empty() {
        bail!("{} cannot be empty", key);
    }
    Ok(val.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &["SHELF_DATA_DIR", "SHELF_ANIMATE", "SHELF_LOG_LEVEL"];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.animate);
        assert_eq!(config.animation_delay_ms, 30);
        assert!(config.log_level.is_none());
        assert_eq!(config.data_dir, PathBuf::from("."));
    }

    #[test]
    fn test_file_paths() {
        let config = Config::default();

        assert!(config.library_path().ends_with("library.json"));
        assert!(config.export_path().ends_with("library_export.txt"));
        assert!(config.log_path().ends_with("shelf.log"));
        assert_ne!(config.library_path(), config.export_path());
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("SHELF_DATA_DIR", "/tmp/shelf-test");
        config.apply_env_overrides().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/shelf-test"));
        assert_eq!(
            config.library_path(),
            PathBuf::from("/tmp/shelf-test/library.json")
        );
    }

    #[test]
    fn test_env_override_animate() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        assert!(config.animate);

        env::set_var("SHELF_ANIMATE", "false");
        config.apply_env_overrides().unwrap();
        assert!(!config.animate);

        env::set_var("SHELF_ANIMATE", "1");
        config.apply_env_overrides().unwrap();
        assert!(config.animate);
    }

    #[test]
    fn test_env_override_animate_rejects_unknown_words() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("SHELF_ANIMATE", "on");
        assert!(config.apply_env_overrides().is_err());
        assert!(config.animate);
    }

    #[test]
    fn test_env_override_log_level() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("SHELF_LOG_LEVEL", "debug");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.log_level, Some("debug".to_string()));

        // Empty string clears it
        env::set_var("SHELF_LOG_LEVEL", "");
        config.apply_env_overrides().unwrap();
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            library_file = "books.json"
            animate = false
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.library_path(), PathBuf::from("/custom/data/books.json"));
        assert!(!config.animate);
        // Unspecified keys keep their defaults
        assert_eq!(config.export_file, "library_export.txt");
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.data_dir = temp_dir.path().join("data");
        config.set("log_level", "info").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.data_dir.exists());
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();

        config.set("animate", "false").unwrap();
        assert!(!config.animate);

        config.set("animation_delay_ms", "5").unwrap();
        assert_eq!(config.animation_delay_ms, 5);

        config.set("log_file", "/tmp/shelf.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/shelf.log")));

        config.set("log_file", "").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();

        assert!(config.set("colour", "blue").is_err());
        assert!(config.set("animation_delay_ms", "soon").is_err());
        assert!(config.set("library_file", "  ").is_err());
        assert!(config.set("animate", "yes").is_err());
        assert!(config.set("animate", "off").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_rejects_export_onto_library_file() {
        let mut config = Config::default();

        assert!(config.set("export_file", "library.json").is_err());
        assert_eq!(config.export_file, "library_export.txt");

        config.set("library_file", "books.json").unwrap();
        assert!(config.set("library_file", "library_export.txt").is_err());
        assert_eq!(config.library_file, "books.json");
    }

    #[test]
    fn test_load_rejects_export_onto_library_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "library_file = \"books.json\"\nexport_file = \"books.json\"\n",
        )
        .unwrap();

        assert!(Config::load_from_path(&path).is_err());
        assert!(Config::load_from_str("export_file = \"library.json\"").is_err());
    }

    #[test]
    fn test_load_file_ignores_env_overrides() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.set("animation_delay_ms", "5").unwrap();
        config.save_to(&path).unwrap();

        env::set_var("SHELF_DATA_DIR", "/tmp/shelf-env-dir");
        env::set_var("SHELF_LOG_LEVEL", "trace");

        let mut from_file = Config::load_file(&path).unwrap();
        assert_eq!(from_file, config);

        from_file.set("animate", "false").unwrap();
        from_file.save_to(&path).unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(!saved.contains("shelf-env-dir"));
        assert!(!saved.contains("trace"));
    }
}
