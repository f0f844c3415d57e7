//! OpenWeatherMap response shapes and the reading shown in the widget

use serde::{Deserialize, Serialize};

use super::WeatherError;

/// Raw `/weather` response. Only `main.temp` is required.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    main: Option<MainBlock>,
    weather: Option<Vec<ConditionBlock>>,
    sys: Option<SysBlock>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    country: Option<String>,
}

/// Current conditions, ready to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Whole degrees Celsius
    pub temperature: i32,
    /// Condition text, empty if the API gave none
    pub description: String,
    /// "City" or "City, CC", empty if unknown
    pub location: String,
}

impl WeatherReading {
    /// Parse a response body; bodies without `main.temp` are `NoData`
    pub fn from_json(body: &str) -> Result<Self, WeatherError> {
        let response: ApiResponse = serde_json::from_str(body).map_err(|e| {
            log::warn!("Unreadable weather response: {e}");
            WeatherError::NoData
        })?;
        Self::from_response(response)
    }

    pub(crate) fn from_response(response: ApiResponse) -> Result<Self, WeatherError> {
        let main = response.main.ok_or(WeatherError::NoData)?;

        let description = response
            .weather
            .and_then(|w| w.into_iter().next())
            .and_then(|c| c.description)
            .unwrap_or_default();

        let country = response.sys.and_then(|s| s.country);
        let location = [response.name, country]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            temperature: round_half_up(main.temp),
            description,
            location,
        })
    }

    /// Temperature with unit, e.g. `16°C`
    pub fn temperature_label(&self) -> String {
        format!("{}°C", self.temperature)
    }
}

/// Round to nearest, halves toward positive infinity (browser `Math.round`)
fn round_half_up(value: f64) -> i32 {
    // `value + 0.5` can round up in f64; the fractional part is exact
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i32 + 1
    } else {
        floor as i32
    }
}
