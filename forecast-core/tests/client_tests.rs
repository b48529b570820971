//! Integration tests for the forecast client using WireMock
//!
//! These tests mock the provider's forecast endpoint to verify client
//! behavior without making actual API calls.

use chrono::NaiveDate;
use forecast_core::{Coordinate, ForecastClient, ForecastError, Units};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BOSTON: Coordinate = Coordinate {
    latitude: 42.3601,
    longitude: 71.0589,
};

fn client_for(server: &MockServer) -> ForecastClient {
    ForecastClient::with_base_url("test-key".to_string(), server.uri())
}

/// One provider entry with the groupings the flattening consumes.
fn entry(dt: i64, dt_txt: &str, temp: f64) -> serde_json::Value {
    json!({
        "dt": dt,
        "dt_txt": dt_txt,
        "main": {
            "temp": temp,
            "feels_like": temp - 1.0,
            "temp_min": temp - 2.0,
            "temp_max": temp + 2.0,
            "pressure": 1015,
            "humidity": 69
        },
        "sys": { "pod": "d" },
        "wind": { "speed": 4.61, "deg": 349, "gust": 7.2 },
        "clouds": { "all": 100 },
        "weather": [
            { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }
        ]
    })
}

fn forecast_body(entries: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "cod": "200",
        "message": 0,
        "cnt": entries.len(),
        "list": entries
    })
}

async fn mount_forecast(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn day(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

// =============================================================================
// Successful fetches
// =============================================================================

#[tokio::test]
async fn row_count_matches_provider_entry_count() {
    let server = MockServer::start().await;
    mount_forecast(
        &server,
        forecast_body(vec![
            entry(1714532400, "2024-05-01 03:00:00", 57.2),
            entry(1714543200, "2024-05-01 06:00:00", 58.1),
            entry(1714554000, "2024-05-01 09:00:00", 61.7),
        ]),
    )
    .await;

    let table = client_for(&server)
        .fetch_forecast(BOSTON, Units::Imperial)
        .await
        .unwrap();

    assert_eq!(table.len(), 3);
}

#[tokio::test]
async fn flattening_is_lossless_for_grouped_fields() {
    let server = MockServer::start().await;
    let e = json!({
        "dt": 1714532400,
        "dt_txt": "2024-05-01 03:00:00",
        "main": {
            "temp": 57.2,
            "feels_like": 56.3,
            "temp_min": 55.4,
            "temp_max": 59.0,
            "pressure": 1015,
            "humidity": 69
        },
        "sys": { "pod": "d" },
        "wind": { "speed": 4.61, "deg": 349, "gust": 7.2 },
        "clouds": { "all": 100 },
        "weather": [
            { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }
        ]
    });
    mount_forecast(&server, forecast_body(vec![e])).await;

    let table = client_for(&server)
        .fetch_forecast(BOSTON, Units::Imperial)
        .await
        .unwrap();

    let row = &table.rows[0];
    assert_eq!(row.timestamp, "2024-05-01 03:00:00");
    assert_eq!(row.temp, 57.2);
    assert_eq!(row.feels_like, 56.3);
    assert_eq!(row.temp_min, 55.4);
    assert_eq!(row.temp_max, 59.0);
    assert_eq!(row.wind_gust, Some(7.2));
    assert_eq!(row.pressure, 1015.0);
    assert_eq!(row.humidity, 69);
    assert_eq!(row.part_of_day, "d");
    assert_eq!(row.wind_speed, 4.61);
    assert_eq!(row.wind_deg, 349);
    assert_eq!(row.cloud_cover, 100);
    assert_eq!(row.condition.as_deref(), Some("Rain"));
    assert_eq!(row.description.as_deref(), Some("light rain"));
}

#[tokio::test]
async fn fetch_then_distinct_hours_round_trip() {
    let server = MockServer::start().await;
    mount_forecast(
        &server,
        forecast_body(vec![
            entry(1714532400, "2024-05-01 03:00:00", 57.2),
            entry(1714543200, "2024-05-01 06:00:00", 58.1),
            entry(1714608000, "2024-05-02 00:00:00", 52.0),
        ]),
    )
    .await;

    let table = client_for(&server)
        .fetch_forecast(BOSTON, Units::Imperial)
        .await
        .unwrap();

    let hours = table.distinct_hours(day("2024-05-01")).unwrap();
    assert_eq!(hours, vec![3, 6]);

    let empty = table.distinct_hours(day("2024-06-15")).unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn zero_provider_entries_yield_empty_table() {
    let server = MockServer::start().await;
    mount_forecast(&server, forecast_body(vec![])).await;

    let table = client_for(&server)
        .fetch_forecast(BOSTON, Units::Imperial)
        .await
        .unwrap();

    assert!(table.is_empty());
}

#[tokio::test]
async fn empty_weather_list_is_tolerated() {
    let server = MockServer::start().await;
    let mut e = entry(1714532400, "2024-05-01 03:00:00", 57.2);
    e["weather"] = json!([]);
    mount_forecast(&server, forecast_body(vec![e])).await;

    let table = client_for(&server)
        .fetch_forecast(BOSTON, Units::Imperial)
        .await
        .unwrap();

    assert_eq!(table.len(), 1);
    assert!(table.rows[0].condition.is_none());
    assert!(table.rows[0].description.is_none());
}

#[tokio::test]
async fn requested_units_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("units", "metric"))
        .and(query_param("lat", "42.3601"))
        .and(query_param("lon", "71.0589"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .fetch_forecast(BOSTON, Units::Metric)
        .await
        .unwrap();
}

// =============================================================================
// Failure taxonomy
// =============================================================================

#[tokio::test]
async fn provider_rejection_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "cod": 401, "message": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_forecast(BOSTON, Units::Imperial)
        .await
        .unwrap_err();

    match err {
        ForecastError::Api { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_forecast(BOSTON, Units::Imperial)
        .await
        .unwrap_err();

    assert!(matches!(err, ForecastError::Parse(_)));
}

#[tokio::test]
async fn missing_grouping_is_a_schema_error() {
    let server = MockServer::start().await;
    let mut e = entry(1714532400, "2024-05-01 03:00:00", 57.2);
    e.as_object_mut().unwrap().remove("wind");
    mount_forecast(&server, forecast_body(vec![e])).await;

    let err = client_for(&server)
        .fetch_forecast(BOSTON, Units::Imperial)
        .await
        .unwrap_err();

    assert!(matches!(err, ForecastError::Schema(_)));
}

#[tokio::test]
async fn missing_list_key_is_a_schema_error() {
    let server = MockServer::start().await;
    mount_forecast(&server, json!({ "cod": "200" })).await;

    let err = client_for(&server)
        .fetch_forecast(BOSTON, Units::Imperial)
        .await
        .unwrap_err();

    assert!(matches!(err, ForecastError::Schema(_)));
}

#[tokio::test]
async fn unreachable_provider_is_a_network_error() {
    // Nothing listens on the discard port; the connection is refused.
    let client =
        ForecastClient::with_base_url("test-key".to_string(), "http://127.0.0.1:9".to_string());

    let err = client
        .fetch_forecast(BOSTON, Units::Imperial)
        .await
        .unwrap_err();

    assert!(matches!(err, ForecastError::Network(_)));
}
