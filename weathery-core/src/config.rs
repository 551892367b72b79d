use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::{Coordinate, Place};

pub const DEFAULT_USER_AGENT: &str = concat!("weathery/", env!("CARGO_PKG_VERSION"));
pub const NWS_BASE_URL: &str = "https://api.weather.gov";
pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// weather.gov endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self { base_url: NWS_BASE_URL.to_string() }
    }
}

/// Geocoder endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    /// Appended to every query so lookups stay inside the country.
    pub country_qualifier: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: NOMINATIM_BASE_URL.to_string(),
            country_qualifier: "USA".to_string(),
        }
    }
}

/// Location used when the user submits an empty postal code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultLocation {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for DefaultLocation {
    fn default() -> Self {
        Self {
            label: "Seguin, Texas".to_string(),
            latitude: 29.500749,
            longitude: -98.128094,
        }
    }
}

impl DefaultLocation {
    pub fn place(&self) -> Place {
        Place {
            label: self.label.clone(),
            coordinate: Coordinate::new(self.latitude, self.longitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: "127.0.0.1:8501".to_string() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// user_agent = "weathery/0.1 (me@example.com)"
///
/// [default_location]
/// label = "Seguin, Texas"
/// latitude = 29.500749
/// longitude = -98.128094
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sent with every outbound request; both providers require one.
    pub user_agent: String,
    pub weather: WeatherConfig,
    pub geocoder: GeocoderConfig,
    pub default_location: DefaultLocation,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            weather: WeatherConfig::default(),
            geocoder: GeocoderConfig::default(),
            default_location: DefaultLocation::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weathery", "weathery")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_default_location(&mut self, label: String, coordinate: Coordinate) {
        self.default_location = DefaultLocation {
            label,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_seguin() {
        let cfg = Config::default();
        let place = cfg.default_location.place();

        assert_eq!(place.label, "Seguin, Texas");
        assert_eq!(place.coordinate, Coordinate::new(29.500749, -98.128094));
        assert_eq!(cfg.weather.base_url, "https://api.weather.gov");
        assert_eq!(cfg.geocoder.country_qualifier, "USA");
    }

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = Config::from_toml("").expect("empty config must parse");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::from_toml(
            r#"
            user_agent = "weathery-test (ops@example.com)"

            [default_location]
            label = "Austin, Texas"
            "#,
        )
        .expect("partial config must parse");

        assert_eq!(cfg.user_agent, "weathery-test (ops@example.com)");
        assert_eq!(cfg.default_location.label, "Austin, Texas");
        assert_eq!(cfg.default_location.latitude, 29.500749);
        assert_eq!(cfg.server.bind, "127.0.0.1:8501");
    }

    #[test]
    fn set_default_location_overrides_label_and_coordinate() {
        let mut cfg = Config::default();
        cfg.set_default_location("Denver, Colorado".into(), Coordinate::new(39.74, -104.99));

        let place = cfg.default_location.place();
        assert_eq!(place.label, "Denver, Colorado");
        assert_eq!(place.coordinate, Coordinate::new(39.74, -104.99));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut cfg = Config::default();
        cfg.server.bind = "0.0.0.0:9000".into();

        let text = toml::to_string_pretty(&cfg).expect("config should serialize");
        let parsed = Config::from_toml(&text).expect("serialized config should parse");

        assert_eq!(parsed, cfg);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml("user_agent = ").is_err());
    }
}
