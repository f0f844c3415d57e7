//! GreenEarth Initiative site enhancements
//!
//! Core modules:
//! - `nav`: Menu toggle and scroll-driven active link tracking
//! - `weather`: Current conditions widget (OpenWeatherMap)
//! - `goals`: Personal goal list persisted to LocalStorage
//! - `contact`: Contact form validation
//! - `persistence`: Key/value store abstraction for saved state
//! - `platform`: Browser adapters (LocalStorage, geolocation, prompts)
//! - `config`: Site configuration

pub mod config;
pub mod contact;
pub mod goals;
pub mod html;
pub mod nav;
pub mod persistence;
pub mod platform;
pub mod weather;

pub use config::SiteConfig;
pub use contact::{ContactForm, FormErrors};
pub use goals::{Goal, GoalError, GoalList};
pub use weather::{WeatherReading, WeatherWidget};

/// Site-wide constants
pub mod consts {
    /// LocalStorage key for the goal list
    pub const GOALS_STORAGE_KEY: &str = "greenGoals_v1";
    /// Longest goal accepted, in characters after trimming
    pub const MAX_GOAL_CHARS: usize = 120;

    /// Contact form minimums (characters after trimming)
    pub const MIN_NAME_CHARS: usize = 2;
    pub const MIN_MESSAGE_CHARS: usize = 10;

    /// Weather defaults
    pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
    pub const DEFAULT_FALLBACK_CITY: &str = "Stockholm,SE";
    pub const DEFAULT_GEOLOCATION_TIMEOUT_MS: u32 = 7000;
    pub const DEFAULT_UNITS: &str = "metric";
    /// Key value shipped in the page template before a real one is configured
    pub const PLACEHOLDER_API_KEY: &str = "YOUR_OPENWEATHERMAP_API_KEY";

    /// Viewport margin for section highlighting (bottom 40% ignored)
    pub const DEFAULT_NAV_ROOT_MARGIN: &str = "0px 0px -40% 0px";
}
