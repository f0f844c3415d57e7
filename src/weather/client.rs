//! OpenWeatherMap HTTP client
//!
//! One GET per lookup, no retries. On `wasm32` reqwest goes through the
//! browser's `fetch`, so no client-side timeout is applied.

use std::fmt;

use reqwest::Client;

use super::{WeatherError, WeatherQuery, WeatherReading};
use crate::config::WeatherSettings;

/// Client for the current-conditions endpoint
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    units: String,
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}

/// Transport error text without the request URL, which carries `appid`
fn transport_error(e: reqwest::Error) -> WeatherError {
    WeatherError::Transport(e.without_url().to_string())
}

impl OpenWeatherClient {
    /// Create a client; fails without a usable API key
    pub fn new(settings: &WeatherSettings) -> Result<Self, WeatherError> {
        let api_key = settings.api_key().ok_or(WeatherError::MissingApiKey)?;
        let client = Client::builder()
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            units: settings.units.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.base_url)
    }

    /// Fetch current conditions for a query
    pub async fn current(&self, query: &WeatherQuery) -> Result<WeatherReading, WeatherError> {
        let mut params = query.params();
        params.push(("units", self.units.clone()));
        params.push(("appid", self.api_key.clone()));

        log::debug!("Requesting weather for {query}");

        let response = self
            .client
            .get(self.endpoint())
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(transport_error)?;

        WeatherReading::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_rejected() {
        let settings = WeatherSettings {
            api_key: None,
            ..WeatherSettings::default()
        };
        assert!(matches!(
            OpenWeatherClient::new(&settings),
            Err(WeatherError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let settings = WeatherSettings {
            api_key: Some("k".to_string()),
            base_url: "http://localhost:8080/data/2.5/".to_string(),
            ..WeatherSettings::default()
        };
        let client = OpenWeatherClient::new(&settings).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/data/2.5/weather");
    }

    #[test]
    fn test_debug_hides_key() {
        let settings = WeatherSettings {
            api_key: Some("secret-key".to_string()),
            ..WeatherSettings::default()
        };
        let client = OpenWeatherClient::new(&settings).unwrap();
        assert!(!format!("{client:?}").contains("secret-key"));
    }
}
