//! Shared configuration for the campus CLI.
//!
//! TOML profiles (one per administration server), merged with `CAMPUS_*`
//! environment variables, and translation to
//! `campus_core::PortalConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use campus_core::PortalConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}' (available: {available})")]
    UnknownProfile { profile: String, available: String },

    #[error("profile '{profile}' has no server URL configured")]
    NoServer { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration for the CLI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named server profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Administration server base URL (e.g. "http://school.local:8080").
    pub server: String,

    /// Override the default request timeout, in seconds.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "campus-hq", "campus").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("campus");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full [`Config`] from the default path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit path. Environment variables (`CAMPUS_*`,
/// nested with `__`) override file values.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CAMPUS_").split("__"));
    Ok(figment.extract()?)
}

/// Load, falling back to defaults when no file exists or parsing fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Write the config to the default path, creating parent directories.
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let rendered = toml::to_string_pretty(config)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

/// The profile to use: an explicit override, the configured default, or
/// the literal name "default".
pub fn active_profile_name(config: &Config, override_name: Option<&str>) -> String {
    override_name
        .map(ToOwned::to_owned)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate a named profile into a `PortalConfig`.
pub fn resolve_portal_config(
    config: &Config,
    profile_name: &str,
) -> Result<PortalConfig, ConfigError> {
    let profile = config.profiles.get(profile_name).ok_or_else(|| {
        let mut available: Vec<&str> =
            config.profiles.keys().map(String::as_str).collect();
        available.sort_unstable();
        ConfigError::UnknownProfile {
            profile: profile_name.into(),
            available: if available.is_empty() {
                "none".into()
            } else {
                available.join(", ")
            },
        }
    })?;

    if profile.server.trim().is_empty() {
        return Err(ConfigError::NoServer {
            profile: profile_name.into(),
        });
    }

    let server_url: url::Url =
        profile
            .server
            .parse()
            .map_err(|e| ConfigError::Validation {
                field: "server".into(),
                reason: format!("invalid URL '{}': {e}", profile.server),
            })?;

    let timeout = profile.timeout.unwrap_or(config.defaults.timeout);
    Ok(PortalConfig::new(server_url).with_timeout(Duration::from_secs(timeout)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_profiles_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
                default_profile = "main"

                [defaults]
                timeout = 10

                [profiles.main]
                server = "http://school.local:8080"

                [profiles.branch]
                server = "http://branch.school.local"
                timeout = 5
            "#,
        );

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("main"));
        assert_eq!(config.profiles.len(), 2);
        assert_eq!(config.defaults.timeout, 10);
    }

    #[test]
    fn resolve_applies_profile_timeout_over_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
                [defaults]
                timeout = 10

                [profiles.branch]
                server = "http://branch.school.local"
                timeout = 5
            "#,
        );
        let config = load_config_from(&path).unwrap();

        let portal = resolve_portal_config(&config, "branch").unwrap();
        assert_eq!(portal.timeout, Duration::from_secs(5));
        assert_eq!(portal.server_url.as_str(), "http://branch.school.local/");
    }

    #[test]
    fn unknown_profile_lists_alternatives() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
                [profiles.main]
                server = "http://school.local"
            "#,
        );
        let config = load_config_from(&path).unwrap();

        let err = resolve_portal_config(&config, "missing").unwrap_err();
        assert!(err.to_string().contains("main"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.profiles.insert(
            "main".into(),
            Profile {
                server: "http://school.local".into(),
                timeout: None,
            },
        );
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert!(loaded.profiles.contains_key("main"));
    }
}
