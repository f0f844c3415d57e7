//! Weather widget
//!
//! Shows current conditions for the visitor's position, or for the
//! configured fallback city when geolocation is unavailable.

mod client;
mod model;
mod widget;

pub use client::OpenWeatherClient;
pub use model::WeatherReading;
pub use widget::{WeatherView, WeatherWidget};

use std::fmt;

use thiserror::Error;

/// Weather lookup errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API credential configured
    #[error("Weather API key not set")]
    MissingApiKey,

    /// Network failure before a response arrived
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("Weather service returned status {0}")]
    Status(u16),

    /// Response lacked the conditions block
    #[error("No weather data")]
    NoData,
}

/// Geographic position from the location service
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What to look up
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    /// Visitor's position
    Coordinates(Coordinates),
    /// Free-text place name (`q=`)
    City(String),
}

impl WeatherQuery {
    /// Location-specific query parameters
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            WeatherQuery::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
            WeatherQuery::City(city) => vec![("q", city.clone())],
        }
    }

    /// Place name to mention in error messages
    pub fn place_name(&self) -> Option<&str> {
        match self {
            WeatherQuery::Coordinates(_) => None,
            WeatherQuery::City(city) => Some(city),
        }
    }
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherQuery::Coordinates(c) => write!(f, "({:.2}, {:.2})", c.latitude, c.longitude),
            WeatherQuery::City(city) => f.write_str(city),
        }
    }
}
