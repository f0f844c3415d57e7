//! Site configuration
//!
//! Read once at startup from an optional `<script type="application/json"
//! id="site-config">` element. Every field has a default, so a partial or
//! missing config still yields a usable value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config element contained invalid JSON
    #[error("Invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Weather widget settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    /// OpenWeatherMap credential (`appid`)
    pub api_key: Option<String>,
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Units selector passed to the API
    pub units: String,
    /// Location name used when geolocation is unavailable
    pub fallback_city: String,
    /// Bounded wait for the geolocation service
    pub geolocation_timeout_ms: u32,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: option_env!("OPENWEATHER_API_KEY").map(str::to_string),
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            units: DEFAULT_UNITS.to_string(),
            fallback_city: DEFAULT_FALLBACK_CITY.to_string(),
            geolocation_timeout_ms: DEFAULT_GEOLOCATION_TIMEOUT_MS,
        }
    }
}

impl WeatherSettings {
    /// Usable API key, ignoring blanks and the template placeholder
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
    }
}

/// Navigation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSettings {
    /// IntersectionObserver root margin for section highlighting
    pub root_margin: String,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            root_margin: DEFAULT_NAV_ROOT_MARGIN.to_string(),
        }
    }
}

/// Top-level site configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub weather: WeatherSettings,
    pub nav: NavSettings,
}

impl SiteConfig {
    /// Id of the JSON config element
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "site-config";

    /// Parse config JSON, filling gaps with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load config from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded site config");
                    config
                }
                Err(e) => {
                    log::warn!("{e}; using defaults");
                    Self::default()
                }
            },
            None => {
                log::info!("No site config element, using defaults");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
