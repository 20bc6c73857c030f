use crate::aggregator::SearchLimits;
use crate::api::DEFAULT_BASE_URL;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable that overrides `api.access_key`.
pub const ACCESS_KEY_VAR: &str = "AVIATIONSTACK_KEY";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub ui: UiConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_key: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub default_country: String, // ISO2 code preselected on startup
    pub airport_limit: usize,    // Clamped into [1, 10]
    pub per_airport_limit: usize,
    pub global_cap: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    pub dark_mode: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_key: None,
            timeout_seconds: 10,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            default_country: "CL".to_string(),
            airport_limit: 10,
            per_airport_limit: 10,
            global_cap: 10,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            tick_rate_ms: 150,
            dark_mode: true,
        }
    }
}

impl Config {
    /// Loads config.toml from the working directory, then applies `.env` and
    /// environment overrides. If the file doesn't exist, creates a default one.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::load_from(Path::new("config.toml"));
        config.apply_env(std::env::var(ACCESS_KEY_VAR).ok());
        config
    }

    /// Reads `path`, filling absent sections and fields with defaults.
    ///
    /// A default file is written only when none exists. An unreadable or
    /// malformed file is left untouched and the defaults are used for this run.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    Config::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let default_config = Config::default();

                // Save default config to disk for the user to edit later
                match toml::to_string_pretty(&default_config) {
                    Ok(toml_string) => {
                        if fs::write(path, toml_string).is_err() {
                            warn!("Could not write default {} to disk.", path.display());
                        }
                    }
                    Err(e) => warn!("Could not serialize default config: {}", e),
                }

                info!("Loaded default configuration.");
                default_config
            }
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path.display(), e);
                Config::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// A non-blank environment value wins over the file.
    pub fn apply_env(&mut self, access_key: Option<String>) {
        if let Some(key) = access_key.filter(|k| !k.trim().is_empty()) {
            self.api.access_key = Some(key);
        }
    }

    pub fn access_key(&self) -> Result<&str, ConfigError> {
        self.api
            .access_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingAccessKey)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            airport_limit: self.search.airport_limit,
            per_airport_limit: self.search.per_airport_limit,
            global_cap: self.search.global_cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[api]
base_url = "http://localhost:8080/v1"
access_key = "abc123"
timeout_seconds = 5

[search]
default_country = "AR"
airport_limit = 5
per_airport_limit = 3
global_cap = 8

[ui]
tick_rate_ms = 200
dark_mode = false
"#;

    #[test]
    fn parses_every_section() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.access_key(), Ok("abc123"));
        assert_eq!(config.search.default_country, "AR");
        assert_eq!(
            config.limits(),
            SearchLimits {
                airport_limit: 5,
                per_airport_limit: 3,
                global_cap: 8
            }
        );
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(!config.ui.dark_mode);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut config = Config::default();
        assert_eq!(config.access_key(), Err(ConfigError::MissingAccessKey));

        config.api.access_key = Some("   ".into());
        assert_eq!(config.access_key(), Err(ConfigError::MissingAccessKey));
    }

    #[test]
    fn environment_overrides_file_unless_blank() {
        let mut config = Config::from_toml_str(SAMPLE).unwrap();
        config.apply_env(Some(String::new()));
        assert_eq!(config.access_key(), Ok("abc123"));

        config.apply_env(Some("from-env".into()));
        assert_eq!(config.access_key(), Ok("from-env"));
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), Config::default());
    }

    fn scratch_path(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("airboard-{}-{}", name, std::process::id()));
        let _ = fs::create_dir_all(&dir);
        dir.join("config.toml")
    }

    #[test]
    fn api_only_file_keeps_key_and_is_not_rewritten() {
        let path = scratch_path("api-only");
        let content = "[api]\naccess_key = \"MYKEY\"\n";
        fs::write(&path, content).unwrap();

        let config = Config::load_from(&path);

        assert_eq!(config.access_key(), Ok("MYKEY"));
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.search, SearchConfig::default());
        assert_eq!(config.ui, UiConfig::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_is_left_untouched() {
        let path = scratch_path("malformed");
        let content = "[api]\naccess_key = \"MYKEY\"\ntimeout_seconds = \"ten\"\n";
        fs::write(&path, content).unwrap();

        let config = Config::load_from(&path);

        assert_eq!(config, Config::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_gets_a_default_written() {
        let path = scratch_path("missing");
        let _ = fs::remove_file(&path);

        let config = Config::load_from(&path);

        assert_eq!(config, Config::default());
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(Config::from_toml_str(&written).unwrap(), Config::default());
        let _ = fs::remove_file(&path);
    }
}
