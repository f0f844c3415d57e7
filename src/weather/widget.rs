//! Widget state machine: `Loading` then `Ready` or `Failed`

use std::future::Future;

use super::{Coordinates, OpenWeatherClient, WeatherError, WeatherQuery, WeatherReading};
use crate::config::WeatherSettings;
use crate::html;

pub const LOADING_TEXT: &str = "Detecting local weather…";
pub const MISSING_KEY_TEXT: &str =
    "Weather API key not set. Please add your OpenWeatherMap API key to the site configuration.";
pub const NO_DATA_TEXT: &str = "No weather data.";
pub const POSITION_FAILED_TEXT: &str = "Unable to load weather. Try refreshing.";

/// What the widget currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherView {
    Loading,
    Ready(WeatherReading),
    Failed(String),
}

/// Weather widget controller
#[derive(Debug)]
pub struct WeatherWidget {
    settings: WeatherSettings,
    view: WeatherView,
}

impl WeatherWidget {
    pub fn new(settings: WeatherSettings) -> Self {
        Self {
            settings,
            view: WeatherView::Loading,
        }
    }

    pub fn view(&self) -> &WeatherView {
        &self.view
    }

    pub fn geolocation_timeout_ms(&self) -> u32 {
        self.settings.geolocation_timeout_ms
    }

    /// Enter `Loading`, or fail straight away without a usable API key
    pub fn start(&mut self) -> Option<OpenWeatherClient> {
        match OpenWeatherClient::new(&self.settings) {
            Ok(client) => {
                self.view = WeatherView::Loading;
                Some(client)
            }
            Err(e) => {
                log::warn!("Weather disabled: {e}");
                self.view = WeatherView::Failed(Self::failure_text(None, &e));
                None
            }
        }
    }

    /// Pick the lookup for a geolocation outcome
    pub fn query_for(&self, position: Option<Coordinates>) -> WeatherQuery {
        match position {
            Some(coords) => WeatherQuery::Coordinates(coords),
            None => {
                log::info!(
                    "No position, using fallback city {}",
                    self.settings.fallback_city
                );
                WeatherQuery::City(self.settings.fallback_city.clone())
            }
        }
    }

    /// Apply a fetch result, replacing whatever was shown
    pub fn finish(&mut self, query: &WeatherQuery, result: Result<WeatherReading, WeatherError>) {
        self.view = match result {
            Ok(reading) => {
                log::info!("Weather for {query}: {}", reading.temperature_label());
                WeatherView::Ready(reading)
            }
            Err(e) => {
                log::error!("Weather for {query} failed: {e}");
                WeatherView::Failed(Self::failure_text(query.place_name(), &e))
            }
        };
    }

    fn failure_text(place: Option<&str>, error: &WeatherError) -> String {
        match (error, place) {
            (WeatherError::MissingApiKey, _) => MISSING_KEY_TEXT.to_string(),
            (WeatherError::NoData, _) => NO_DATA_TEXT.to_string(),
            (_, Some(place)) => format!("Unable to load weather for {place}."),
            (_, None) => POSITION_FAILED_TEXT.to_string(),
        }
    }

    /// Full lookup: start, locate, fetch, finish.
    ///
    /// `locate` receives the geolocation timeout and resolves to `None` on
    /// denial, expiry, or when no location service exists. It is not called
    /// when the API key is missing.
    pub async fn run<F, Fut>(&mut self, locate: F) -> &WeatherView
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Option<Coordinates>>,
    {
        let Some(client) = self.start() else {
            return &self.view;
        };

        let position = locate(self.settings.geolocation_timeout_ms).await;
        let query = self.query_for(position);
        let result = client.current(&query).await;
        self.finish(&query, result);
        &self.view
    }

    /// Markup for the widget container; always a full replacement
    pub fn render(&self) -> String {
        match &self.view {
            WeatherView::Loading => format!(r#"<p class="weather-loading">{LOADING_TEXT}</p>"#),
            WeatherView::Failed(message) => {
                format!(r#"<p class="weather-error">{}</p>"#, html::escape(message))
            }
            WeatherView::Ready(reading) => format!(
                concat!(
                    r#"<div class="weather">"#,
                    r#"<div class="temp" aria-hidden="false">{}</div>"#,
                    r#"<div class="desc">{}</div>"#,
                    r#"<div class="city" style="font-size:0.9rem;opacity:0.9">{}</div>"#,
                    r#"</div>"#,
                ),
                reading.temperature_label(),
                html::escape(&reading.description),
                html::escape(&reading.location),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: Option<&str>) -> WeatherSettings {
        WeatherSettings {
            api_key: api_key.map(str::to_string),
            ..WeatherSettings::default()
        }
    }

    fn oslo() -> WeatherReading {
        WeatherReading::from_json(
            r#"{"main":{"temp":15.6},"weather":[{"description":"clear sky"}],"name":"Oslo","sys":{"country":"NO"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_initial_view_is_loading() {
        let widget = WeatherWidget::new(settings(Some("k")));
        assert_eq!(widget.view(), &WeatherView::Loading);
        assert!(widget.render().contains("Detecting local weather"));
    }

    #[test]
    fn test_missing_key_fails_immediately() {
        let mut widget = WeatherWidget::new(settings(None));
        assert!(widget.start().is_none());
        assert_eq!(widget.view(), &WeatherView::Failed(MISSING_KEY_TEXT.to_string()));
        assert!(widget.render().starts_with(r#"<p class="weather-error">"#));
    }

    #[test]
    fn test_query_falls_back_to_city() {
        let widget = WeatherWidget::new(settings(Some("k")));
        assert_eq!(
            widget.query_for(None),
            WeatherQuery::City("Stockholm,SE".to_string())
        );

        let here = Coordinates {
            latitude: 59.91,
            longitude: 10.75,
        };
        assert_eq!(widget.query_for(Some(here)), WeatherQuery::Coordinates(here));
    }

    #[test]
    fn test_render_ready() {
        let mut widget = WeatherWidget::new(settings(Some("k")));
        widget.finish(&WeatherQuery::City("Oslo".into()), Ok(oslo()));
        let markup = widget.render();
        assert!(markup.contains(">16°C<"));
        assert!(markup.contains(r#"<div class="desc">clear sky</div>"#));
        assert!(markup.contains(">Oslo, NO<"));
    }

    #[test]
    fn test_failure_names_city() {
        let mut widget = WeatherWidget::new(settings(Some("k")));
        let query = WeatherQuery::City("Stockholm,SE".into());
        widget.finish(&query, Err(WeatherError::Status(404)));
        assert_eq!(
            widget.view(),
            &WeatherView::Failed("Unable to load weather for Stockholm,SE.".to_string())
        );
    }

    #[test]
    fn test_failure_by_position() {
        let mut widget = WeatherWidget::new(settings(Some("k")));
        let query = WeatherQuery::Coordinates(Coordinates {
            latitude: 1.0,
            longitude: 2.0,
        });
        widget.finish(&query, Err(WeatherError::Transport("offline".into())));
        assert_eq!(
            widget.view(),
            &WeatherView::Failed(POSITION_FAILED_TEXT.to_string())
        );
    }

    #[test]
    fn test_no_data_path() {
        let mut widget = WeatherWidget::new(settings(Some("k")));
        let result = WeatherReading::from_json(r#"{"name":"Oslo"}"#);
        widget.finish(&WeatherQuery::City("Oslo".into()), result);
        assert_eq!(widget.render(), r#"<p class="weather-error">No weather data.</p>"#);
    }

    #[test]
    fn test_each_finish_replaces_view() {
        let mut widget = WeatherWidget::new(settings(Some("k")));
        let query = WeatherQuery::City("Oslo".into());
        widget.finish(&query, Err(WeatherError::NoData));
        widget.finish(&query, Ok(oslo()));
        assert_eq!(widget.view(), &WeatherView::Ready(oslo()));
    }

    #[test]
    fn test_api_text_escaped() {
        let mut widget = WeatherWidget::new(settings(Some("k")));
        let reading = WeatherReading {
            temperature: 1,
            description: "<b>hot</b>".to_string(),
            location: "A & B".to_string(),
        };
        widget.finish(&WeatherQuery::City("x".into()), Ok(reading));
        let markup = widget.render();
        assert!(markup.contains("&lt;b&gt;hot&lt;/b&gt;"));
        assert!(markup.contains("A &amp; B"));
    }
}
