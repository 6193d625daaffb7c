//! End-to-end tests of `WeatherService` against a stubbed OpenWeather.

use chrono::{Duration, Utc};
use weather_core::{Config, Coordinates, ProviderKind, WeatherError, WeatherIcon, WeatherService};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, kind: ProviderKind) -> Config {
    let mut cfg = Config::default();
    cfg.set_api_key("TEST_KEY".to_string());
    cfg.set_provider_kind(kind);
    cfg.provider.data_base_url = server.uri();
    cfg.provider.geo_base_url = server.uri();
    cfg.provider.timeout_secs = 5;
    cfg
}

fn one_call_body(temp: f64, days: i64) -> serde_json::Value {
    let today = Utc::now().timestamp();
    let daily: Vec<_> = (0..days)
        .map(|i| {
            serde_json::json!({
                "dt": today + i * 86_400,
                "temp": {"min": 10.0 + i as f64, "max": 20.0 + i as f64},
                "weather": [{"description": "scattered clouds", "icon": "03d"}],
                "pop": 0.25
            })
        })
        .collect();

    serde_json::json!({
        "current": {
            "dt": today, "temp": temp, "feels_like": temp - 1.0,
            "humidity": 64, "wind_speed": 4.6, "uvi": 5.1,
            "weather": [{"description": "broken clouds", "icon": "04d"}],
            "rain": {"1h": 0.3}
        },
        "daily": daily
    })
}

async fn mount_city(server: &MockServer, city: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": city, "lat": 40.7128, "lon": -74.006, "country": "US"}
        ])))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn city_lookup_is_cached() {
    let server = MockServer::start().await;
    mount_city(&server, "New York", 1).await;

    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_call_body(21.7, 8)))
        .expect(1)
        .mount(&server)
        .await;

    let service = WeatherService::from_config(&config_for(&server, ProviderKind::OneCall)).unwrap();

    let first = service.by_city("New York").await.unwrap();
    let second = service.by_city("new york").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.location.name, "New York");
    assert_eq!(first.current.temp_c, 22);
    assert_eq!(first.current.temp_f, (21.7_f64 * 9.0 / 5.0 + 32.0).round() as i32);
    assert_eq!(first.current.uv_index, 5.1);
    assert_eq!(first.current.precipitation, 0.3);
    assert_eq!(first.forecast.len(), 3);
    assert!(first.forecast.iter().all(|d| d.icon == WeatherIcon::Cloud));
}

#[tokio::test]
async fn forecast_is_bounded_by_available_days() {
    let server = MockServer::start().await;
    mount_city(&server, "Reykjavik", 1).await;

    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_call_body(-3.0, 3)))
        .mount(&server)
        .await;

    let service = WeatherService::from_config(&config_for(&server, ProviderKind::OneCall)).unwrap();
    let weather = service.by_city("Reykjavik").await.unwrap();

    assert_eq!(weather.forecast.len(), 2);
}

#[tokio::test]
async fn unknown_city_is_not_found_and_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let service = WeatherService::from_config(&config_for(&server, ProviderKind::OneCall)).unwrap();

    for _ in 0..2 {
        let err = service.by_city("InvalidCityXYZ123").await.unwrap_err();
        assert!(matches!(err, WeatherError::NotFound));
    }
    assert!(service.cache().is_empty().await);
}

#[tokio::test]
async fn coordinates_survive_reverse_geocoding_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .and(query_param("lat", "40.71"))
        .and(query_param("lon", "-74"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_call_body(15.0, 8)))
        .expect(1)
        .mount(&server)
        .await;

    let service = WeatherService::from_config(&config_for(&server, ProviderKind::OneCall)).unwrap();
    let coords = Coordinates::new(40.71, -74.00).unwrap();

    let weather = service.by_coordinates(coords).await.unwrap();
    assert_eq!(weather.location.name, "Unknown Location");
    assert_eq!(weather.location.coordinates, coords);

    // Same point written differently hits the cache.
    let again = service.by_coordinates(Coordinates::new(40.7100, -74.0).unwrap()).await.unwrap();
    assert_eq!(again, weather);
}

#[tokio::test]
async fn nearby_points_share_entry_and_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .and(query_param("lat", "40.7128"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "New York", "lat": 40.7143, "lon": -74.006, "country": "US"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .and(query_param("lat", "40.7128"))
        .and(query_param("lon", "-74.006"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_call_body(12.0, 8)))
        .expect(1)
        .mount(&server)
        .await;

    let service = WeatherService::from_config(&config_for(&server, ProviderKind::OneCall)).unwrap();

    let first = service
        .by_coordinates(Coordinates::new(40.71276, -74.00601).unwrap())
        .await
        .unwrap();
    let second = service
        .by_coordinates(Coordinates::new(40.71284, -74.00596).unwrap())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.location.name, "New York");
    assert_eq!(first.location.coordinates, Coordinates::new(40.7128, -74.006).unwrap());
}

#[tokio::test]
async fn split_provider_end_to_end() {
    let server = MockServer::start().await;
    mount_city(&server, "Boston", 1).await;

    let midnight = Utc::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    let list: Vec<_> = (0..40)
        .map(|i| {
            let at = midnight + Duration::hours(3 * i);
            serde_json::json!({
                "dt": at.timestamp(),
                "main": {"temp": 5.0, "feels_like": 3.0, "humidity": 80,
                         "temp_min": 4.4, "temp_max": 6.6},
                "weather": [{"description": "light snow", "icon": "13d"}],
                "pop": 0.9
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "dt": midnight.timestamp(),
            "main": {"temp": 1.5, "feels_like": -1.2, "humidity": 90},
            "weather": [{"description": "snow", "icon": "13n"}],
            "wind": {"speed": 7.5}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "list": list })))
        .mount(&server)
        .await;

    let service = WeatherService::from_config(&config_for(&server, ProviderKind::Split)).unwrap();
    let weather = service.by_city("Boston").await.unwrap();

    assert_eq!(weather.current.temp_c, 2);
    assert_eq!(weather.current.temp_f, 35);
    assert_eq!(weather.current.uv_index, 0.0);
    assert_eq!(weather.current.icon, WeatherIcon::Snow);
    assert_eq!(weather.forecast.len(), 3);

    let expected: Vec<String> = (1..=3)
        .map(|d| (midnight + Duration::days(d)).format("%Y-%m-%d").to_string())
        .collect();
    let dates: Vec<String> = weather.forecast.iter().map(|d| d.date.clone()).collect();
    assert_eq!(dates, expected);
    assert!(weather.forecast.iter().all(|d| d.precipitation_chance == 90));
    assert!(weather.forecast.iter().all(|d| d.temp_min_c == 4 && d.temp_max_c == 7));
}

#[tokio::test]
async fn weather_upstream_failure_propagates_status() {
    let server = MockServer::start().await;
    mount_city(&server, "Lima", 1).await;

    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"cod\":401}"))
        .mount(&server)
        .await;

    let service = WeatherService::from_config(&config_for(&server, ProviderKind::OneCall)).unwrap();
    let err = service.by_city("Lima").await.unwrap_err();

    assert_eq!(err.status_code(), 401);
    assert!(service.cache().is_empty().await);
}

#[test]
fn missing_api_key_fails_construction() {
    let err = WeatherService::from_config(&Config::default()).unwrap_err();
    assert!(err.to_string().contains("No OpenWeather API key configured"));
}
