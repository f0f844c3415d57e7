//! Weather widget flow against a mock OpenWeatherMap server

use std::cell::Cell;

use greenearth_site::config::WeatherSettings;
use greenearth_site::weather::{
    Coordinates, OpenWeatherClient, WeatherError, WeatherQuery, WeatherView, WeatherWidget,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_response() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 10.75, "lat": 59.91 },
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
        "main": { "temp": 15.6, "feels_like": 14.9, "pressure": 1013, "humidity": 60 },
        "sys": { "country": "NO" },
        "name": "Oslo",
        "cod": 200
    })
}

fn settings_for(server: &MockServer) -> WeatherSettings {
    WeatherSettings {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
        ..WeatherSettings::default()
    }
}

#[tokio::test]
async fn test_lookup_by_position() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "59.91"))
        .and(query_param("lon", "10.75"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = WeatherWidget::new(settings_for(&server));
    let view = widget
        .run(|_| async {
            Some(Coordinates {
                latitude: 59.91,
                longitude: 10.75,
            })
        })
        .await;

    let WeatherView::Ready(reading) = view else {
        panic!("expected reading, got {view:?}");
    };
    assert_eq!(reading.temperature_label(), "16°C");
    assert_eq!(reading.description, "clear sky");
    assert_eq!(reading.location, "Oslo, NO");
}

#[tokio::test]
async fn test_falls_back_to_city_without_position() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Stockholm,SE"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": { "temp": -2.5 },
            "name": "Stockholm",
            "sys": { "country": "SE" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let timeout = Cell::new(0);
    let mut widget = WeatherWidget::new(settings_for(&server));
    let view = widget
        .run(|ms| {
            timeout.set(ms);
            async { None }
        })
        .await;

    assert_eq!(timeout.get(), 7000);
    let WeatherView::Ready(reading) = view else {
        panic!("expected reading, got {view:?}");
    };
    assert_eq!(reading.temperature, -2);
    assert_eq!(reading.location, "Stockholm, SE");
}

#[tokio::test]
async fn test_server_error_names_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut widget = WeatherWidget::new(settings_for(&server));
    let view = widget.run(|_| async { None }).await;

    assert_eq!(
        view,
        &WeatherView::Failed("Unable to load weather for Stockholm,SE.".to_string())
    );
}

#[tokio::test]
async fn test_missing_main_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "Oslo" })),
        )
        .mount(&server)
        .await;

    let mut widget = WeatherWidget::new(settings_for(&server));
    let view = widget.run(|_| async { None }).await;
    assert_eq!(view, &WeatherView::Failed("No weather data.".to_string()));
}

#[tokio::test]
async fn test_missing_key_skips_network_and_location() {
    let server = MockServer::start().await;
    let settings = WeatherSettings {
        api_key: Some(String::new()),
        ..settings_for(&server)
    };

    let located = Cell::new(false);
    let mut widget = WeatherWidget::new(settings);
    let view = widget
        .run(|_| {
            located.set(true);
            async { None }
        })
        .await;

    assert!(matches!(view, WeatherView::Failed(msg) if msg.contains("API key not set")));
    assert!(!located.get());
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_client_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&settings_for(&server)).unwrap();
    let result = client
        .current(&WeatherQuery::City("Nowhere".to_string()))
        .await;
    assert!(matches!(result, Err(WeatherError::Status(401))));
}

#[tokio::test]
async fn test_client_reports_transport_failure() {
    // Nothing listens on port 1
    let settings = WeatherSettings {
        api_key: Some("test-key".to_string()),
        base_url: "http://127.0.0.1:1".to_string(),
        ..WeatherSettings::default()
    };

    let client = OpenWeatherClient::new(&settings).unwrap();
    let result = client
        .current(&WeatherQuery::City("Oslo".to_string()))
        .await;
    assert!(matches!(result, Err(WeatherError::Transport(_))));
}

#[tokio::test]
async fn test_transport_error_hides_api_key() {
    let settings = WeatherSettings {
        api_key: Some("SECRETKEY".to_string()),
        base_url: "http://127.0.0.1:1".to_string(),
        ..WeatherSettings::default()
    };

    let client = OpenWeatherClient::new(&settings).unwrap();
    let err = client
        .current(&WeatherQuery::City("Oslo".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Transport(_)));
    assert!(!err.to_string().contains("SECRETKEY"));
    assert!(!format!("{err:?}").contains("SECRETKEY"));
}
