//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub advice: AdviceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the entry snapshot lives
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

fn default_snapshot_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("loreweaver")
                .join("entries.json")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./loreweaver_data/entries.json".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl StorageConfig {
    /// Snapshot path with a leading `~/` expanded to the home directory
    pub fn resolved_snapshot_path(&self) -> PathBuf {
        match (self.snapshot_path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.snapshot_path),
        }
    }
}

/// Advice synthesizer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AdviceConfig {
    #[serde(default = "default_latency")]
    pub latency_ms: u64,

    /// Fixed seed for general-advice selection
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_latency() -> u64 {
    1500
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency(),
            seed: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let discovered = Self::discover(&Self::default_paths());
        discovered.log();
        discovered.config
    }

    /// Standard config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("loreweaver").join("config.toml")),
            Some(PathBuf::from("./loreweaver.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first readable file among `paths`, falling back to defaults.
    ///
    /// Nothing is logged here; call [`Discovered::log`] once a subscriber is
    /// installed.
    pub fn discover(paths: &[PathBuf]) -> Discovered {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return Discovered {
                        config,
                        source: Some(path.clone()),
                        skipped,
                    }
                }
                Err(e) => skipped.push(e),
            }
        }

        Discovered {
            config: Self::from_env(),
            source: None,
            skipped,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("LOREWEAVER_SNAPSHOT_PATH") {
            self.storage.snapshot_path = path;
        }

        if let Some(latency) = lookup("LOREWEAVER_ADVICE_LATENCY_MS") {
            if let Ok(ms) = latency.parse() {
                self.advice.latency_ms = ms;
            }
        }
        if let Some(seed) = lookup("LOREWEAVER_ADVICE_SEED") {
            if let Ok(s) = seed.parse() {
                self.advice.seed = Some(s);
            }
        }

        if let Some(level) = lookup("LOREWEAVER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOREWEAVER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Result of searching the default config locations
#[derive(Debug)]
pub struct Discovered {
    pub config: Config,
    /// File the config came from, `None` for defaults
    pub source: Option<PathBuf>,
    /// Files that exist but failed to load
    pub skipped: Vec<ConfigError>,
}

impl Discovered {
    pub fn log(&self) {
        for e in &self.skipped {
            tracing::warn!("Skipping config file: {}", e);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Loreweaver Configuration
#
# Environment variables override these settings:
# - LOREWEAVER_SNAPSHOT_PATH
# - LOREWEAVER_ADVICE_LATENCY_MS
# - LOREWEAVER_ADVICE_SEED
# - LOREWEAVER_LOG_LEVEL
# - LOREWEAVER_LOG_FORMAT

[storage]
# JSON file holding every world and character entry
snapshot_path = "~/.local/share/loreweaver/entries.json"

[advice]
# Artificial thinking time before advice is shown (ms)
latency_ms = 1500

# Fix the choice of general advice (omit for random)
# seed = 42

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.advice.latency_ms, 1500);
        assert!(config.advice.seed.is_none());
        assert_eq!(config.logging.format, "pretty");
        assert!(config.storage.snapshot_path.ends_with("entries.json"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[advice]\nseed = 7\n").unwrap();
        assert_eq!(config.advice.seed, Some(7));
        assert_eq!(config.advice.latency_ms, 1500);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.advice.latency_ms, 1500);
        assert_eq!(
            config.storage.snapshot_path,
            "~/.local/share/loreweaver/entries.json"
        );
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("LOREWEAVER_SNAPSHOT_PATH", "/tmp/project.json"),
            ("LOREWEAVER_ADVICE_LATENCY_MS", "0"),
            ("LOREWEAVER_ADVICE_SEED", "not-a-number"),
            ("LOREWEAVER_LOG_FORMAT", "json"),
        ]);

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.snapshot_path, "/tmp/project.json");
        assert_eq!(config.advice.latency_ms, 0);
        assert!(config.advice.seed.is_none());
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_snapshot_path_expansion() {
        let storage = StorageConfig {
            snapshot_path: "/srv/codex/entries.json".to_string(),
        };
        assert_eq!(
            storage.resolved_snapshot_path(),
            PathBuf::from("/srv/codex/entries.json")
        );

        let storage = StorageConfig {
            snapshot_path: "~/codex.json".to_string(),
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(storage.resolved_snapshot_path(), home.join("codex.json"));
        }
    }

    #[test]
    fn test_discover_skips_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let valid = dir.path().join("loreweaver.toml");
        std::fs::write(&broken, "[advice\nseed = ").unwrap();
        std::fs::write(&valid, "[advice]\nlatency_ms = 0\n").unwrap();

        let discovered = Config::discover(&[dir.path().join("absent.toml"), broken, valid.clone()]);
        assert_eq!(discovered.source, Some(valid));
        assert_eq!(discovered.skipped.len(), 1);
        assert!(matches!(discovered.skipped[0], ConfigError::Parse { .. }));
        assert_eq!(discovered.config.advice.latency_ms, 0);

        let discovered = Config::discover(&[dir.path().join("absent.toml")]);
        assert!(discovered.source.is_none());
        assert!(discovered.skipped.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
