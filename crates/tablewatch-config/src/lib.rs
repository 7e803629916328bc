//! Run configuration for the tablewatch CLI.
//!
//! TOML file + environment merging, API-key resolution, and the built-in
//! venue directory. The CLI layers flag overrides on top of what this
//! crate resolves.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveTime;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tablewatch_api::{TransportConfig, Venue};

/// Web client key the platform ships publicly. Works out of the box;
/// override via config or the `RESY_API_KEY` environment variable.
pub const DEFAULT_API_KEY: &str = "VbWk7s3L4KiK5fzlO7JD3Q5EYolJI7n5";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

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

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub defaults: Defaults,

    /// Venue directory, in query order.
    #[serde(default = "default_venues")]
    pub venues: Vec<VenueEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            defaults: Defaults::default(),
            venues: default_venues(),
        }
    }
}

/// Connection settings for the reservation service.
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (plaintext — prefer the env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_key_env: None,
            timeout: default_timeout(),
        }
    }
}

/// Query defaults applied when the CLI flags are absent.
#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_party_size")]
    pub party_size: u8,

    /// Earliest acceptable time, `HH:MM`.
    #[serde(default = "default_window_start")]
    pub window_start: String,

    /// Latest acceptable time, `HH:MM`.
    #[serde(default = "default_window_end")]
    pub window_end: String,

    /// Venues queried concurrently during a sweep.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            party_size: default_party_size(),
            window_start: default_window_start(),
            window_end: default_window_end(),
            concurrency: default_concurrency(),
        }
    }
}

/// One venue in the directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VenueEntry {
    pub name: String,
    pub id: u64,
}

impl From<VenueEntry> for Venue {
    fn from(entry: VenueEntry) -> Self {
        Venue::new(entry.name, entry.id)
    }
}

fn default_base_url() -> String {
    tablewatch_api::DEFAULT_BASE_URL.to_owned()
}
fn default_timeout() -> u64 {
    30
}
fn default_party_size() -> u8 {
    2
}
fn default_window_start() -> String {
    "17:30".to_owned()
}
fn default_window_end() -> String {
    "19:00".to_owned()
}
fn default_concurrency() -> usize {
    4
}

/// The Charleston venue directory the project started with.
fn default_venues() -> Vec<VenueEntry> {
    [
        ("FIG", 551),
        ("SHIKI", 8038),
        ("VERN'S", 60323),
        ("CHEZ NOUS", 753),
        ("SORGHUM & SALT", 998),
        ("HONEYSUCKLE ROSE", 77435),
        ("CIRCA 1866", 7382),
        ("ZERO GEORGE", 5672),
    ]
    .into_iter()
    .map(|(name, id)| VenueEntry {
        name: name.to_owned(),
        id,
    })
    .collect()
}

// ── Accessors ───────────────────────────────────────────────────────

impl Config {
    /// Venue directory converted to API types, declaration order kept.
    pub fn venues(&self) -> Vec<Venue> {
        self.venues.iter().cloned().map(Venue::from).collect()
    }

    /// Transport settings for the HTTP client.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: Duration::from_secs(self.api.timeout),
        }
    }
}

impl Defaults {
    pub fn window_start_time(&self) -> Result<NaiveTime, ConfigError> {
        parse_time(&self.window_start, "defaults.window_start")
    }

    pub fn window_end_time(&self) -> Result<NaiveTime, ConfigError> {
        parse_time(&self.window_end, "defaults.window_end")
    }
}

/// Parse an `HH:MM` time-of-day value.
pub fn parse_time(value: &str, field: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ConfigError::Validation {
        field: field.to_owned(),
        reason: format!("expected HH:MM, got {value:?}"),
    })
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API key: named env var, `RESY_API_KEY`, config value,
/// then the built-in public key.
pub fn resolve_api_key(api: &ApiSettings) -> SecretString {
    if let Some(ref env_name) = api.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return SecretString::from(val);
        }
    }

    if let Ok(val) = std::env::var("RESY_API_KEY") {
        return SecretString::from(val);
    }

    if let Some(ref key) = api.api_key {
        return SecretString::from(key.clone());
    }

    SecretString::from(DEFAULT_API_KEY)
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tablewatch", "tablewatch").map_or_else(
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
    p.push("tablewatch");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from defaults + file + environment.
///
/// Environment keys use `__` as the section separator, e.g.
/// `TABLEWATCH_DEFAULTS__PARTY_SIZE=4`.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("TABLEWATCH_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write it to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_venue_directory_is_ordered() {
        let cfg = Config::default();
        assert_eq!(cfg.venues.len(), 8);
        assert_eq!(cfg.venues[0].name, "FIG");
        assert_eq!(cfg.venues[0].id, 551);
        assert_eq!(cfg.venues[7].name, "ZERO GEORGE");
    }

    #[test]
    fn default_window_parses() {
        let defaults = Defaults::default();
        let start = defaults.window_start_time().unwrap();
        let end = defaults.window_end_time().unwrap();
        assert_eq!(start, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
        assert_eq!(end, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
    }

    #[test]
    fn bad_time_string_is_a_validation_error() {
        let err = parse_time("quarter past six", "defaults.window_start").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn toml_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    [defaults]
                    party_size = 4

                    [[venues]]
                    name = "HUSK"
                    id = 1234
                "#,
            )?;

            let figment = Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file("config.toml"));
            let cfg: Config = figment.extract()?;

            assert_eq!(cfg.defaults.party_size, 4);
            assert_eq!(cfg.venues.len(), 1);
            assert_eq!(cfg.venues[0].name, "HUSK");
            // untouched sections keep their defaults
            assert_eq!(cfg.api.base_url, tablewatch_api::DEFAULT_BASE_URL);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file_and_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TABLEWATCH_DEFAULTS__PARTY_SIZE", "6");
            jail.set_env("TABLEWATCH_API__TIMEOUT", "5");

            let figment = Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Env::prefixed("TABLEWATCH_").split("__"));
            let cfg: Config = figment.extract()?;

            assert_eq!(cfg.defaults.party_size, 6);
            assert_eq!(cfg.api.timeout, 5);
            Ok(())
        });
    }

    #[test]
    fn api_key_resolution_prefers_explicit_config() {
        let api = ApiSettings {
            api_key: Some("my-own-key".into()),
            ..ApiSettings::default()
        };
        let key = resolve_api_key(&api);
        assert_eq!(secrecy::ExposeSecret::expose_secret(&key), "my-own-key");

        let key = resolve_api_key(&ApiSettings::default());
        assert_eq!(secrecy::ExposeSecret::expose_secret(&key), DEFAULT_API_KEY);
    }
}
