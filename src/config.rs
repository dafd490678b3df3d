use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub eventbrite: EventbriteSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventbriteSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EventbriteSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base() -> String { "https://www.eventbriteapi.com/v3".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_different_city_proximity")]
    pub different_city_proximity: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            different_city_proximity: default_different_city_proximity(),
        }
    }
}

fn default_different_city_proximity() -> f64 { 85.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interest_overlap_weight")]
    pub interest_overlap: f64,
    #[serde(default = "default_event_alignment_weight")]
    pub event_alignment: f64,
    #[serde(default = "default_proximity_weight")]
    pub proximity: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interest_overlap: default_interest_overlap_weight(),
            event_alignment: default_event_alignment_weight(),
            proximity: default_proximity_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            interest_overlap: config.interest_overlap,
            event_alignment: config.event_alignment,
            proximity: config.proximity,
        }
    }
}

fn default_interest_overlap_weight() -> f64 { 0.50 }
fn default_event_alignment_weight() -> f64 { 0.25 }
fn default_proximity_weight() -> f64 { 0.25 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with EVENTMATCH_)
    /// 4. `EVENTBRITE_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., EVENTMATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("EVENTMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("EVENTMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

/// The API key keeps the name the hosting platform exposes it under
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = std::env::var("EVENTBRITE_API_KEY") {
        builder = builder.set_override("eventbrite.api_key", api_key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.interest_overlap, 0.50);
        assert_eq!(weights.event_alignment, 0.25);
        assert_eq!(weights.proximity, 0.25);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "compact");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 3001

[eventbrite]
api_base = "http://localhost:9999"

[scoring]
different_city_proximity = 60.0

[scoring.weights]
interest_overlap = 0.6
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.server.port, 3001);
        assert_eq!(settings.eventbrite.api_base, "http://localhost:9999");
        assert_eq!(settings.eventbrite.timeout_secs, 30);
        assert_eq!(settings.scoring.different_city_proximity, 60.0);

        let weights = settings.scoring_weights();
        assert_eq!(weights.interest_overlap, 0.6);
        assert_eq!(weights.event_alignment, 0.25);
        assert_eq!(settings.logging.level, "info");
    }
}
