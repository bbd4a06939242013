//! Configuration loading for loglint.
//!
//! Configuration comes from a YAML file (default `.loglint.yaml`) and is
//! merged on top of the built-in defaults. A missing file is not an error;
//! an unreadable or malformed file is, but callers that just need *a*
//! configuration use [`Config::load_or_default`] which falls back to the
//! defaults instead of aborting analysis.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Default configuration file name.
pub const DEFAULT_CONFIG_NAME: &str = ".loglint.yaml";

/// Errors from reading or parsing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config {path:?}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Top-level configuration for one analysis run.
///
/// Immutable for the duration of a run; the engine takes it by reference
/// and never mutates it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Per-rule enable/disable flags. Unknown rule names default to
    /// enabled so new rules are active even with a stale config file.
    pub rules: HashMap<String, bool>,
    /// Ordered case-insensitive keywords for the sensitive-data rule.
    /// Defaults first, user extensions appended.
    pub sensitive_keywords: Vec<String>,
    /// Characters removed from the special-character rule's default
    /// forbidden set.
    pub allowed_special_chars: String,
    /// Glob patterns for paths to skip during file collection.
    pub exclude: Vec<String>,
}

/// On-disk shape. Kept separate from `Config` so only fields actually
/// present in the file are merged over the defaults.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    rules: Option<HashMap<String, bool>>,
    #[serde(default)]
    sensitive_keywords: Vec<String>,
    #[serde(default)]
    allowed_special_chars: Option<String>,
    #[serde(default)]
    exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut rules = HashMap::new();
        for kind in crate::diagnostics::RuleKind::ALL {
            rules.insert(kind.as_str().to_string(), true);
        }
        Self {
            rules,
            sensitive_keywords: default_sensitive_keywords(),
            allowed_special_chars: String::new(),
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Reports whether the named rule should run.
    /// Unknown rule names default to enabled.
    pub fn is_rule_enabled(&self, name: &str) -> bool {
        self.rules.get(name).copied().unwrap_or(true)
    }

    /// Read a YAML config file and merge it on top of the defaults.
    /// A missing file yields the default configuration without error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut cfg = Config::default();

        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(cfg),
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        let file: ConfigFile = serde_yaml::from_str(&data).map_err(|e| ConfigError::Yaml {
            path: path.display().to_string(),
            source: e,
        })?;

        if let Some(rules) = file.rules {
            for (name, enabled) in rules {
                cfg.rules.insert(name, enabled);
            }
        }
        // Extend defaults rather than replace, matching the keyword
        // list's "defaults plus caller extensions" contract.
        cfg.sensitive_keywords.extend(file.sensitive_keywords);
        if let Some(allowed) = file.allowed_special_chars {
            if !allowed.is_empty() {
                cfg.allowed_special_chars = allowed;
            }
        }
        cfg.exclude = file.exclude;
        cfg.validate()?;

        Ok(cfg)
    }

    /// Load a config file, falling back to the defaults on any error so
    /// a caller can always obtain a configuration.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("config load failed, using defaults: {e}");
                Config::default()
            }
        }
    }

    /// Check that all exclude patterns compile.
    fn validate(&self) -> Result<(), ConfigError> {
        for pattern in &self.exclude {
            globset::Glob::new(pattern).map_err(|e| ConfigError::Glob {
                pattern: pattern.clone(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Check if a path matches one of the exclude patterns.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let path_str = path.to_string_lossy();
        for pattern in &self.exclude {
            if let Ok(glob) = globset::Glob::new(pattern) {
                if glob.compile_matcher().is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

/// Built-in keywords that indicate potentially sensitive information in
/// a log message.
fn default_sensitive_keywords() -> Vec<String> {
    [
        "password",
        "passwd",
        "secret",
        "token",
        "api_key",
        "apikey",
        "auth",
        "credential",
        "private_key",
        "access_key",
        "session",
        "jwt",
        "bearer",
        "ssn",
        "credit_card",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
