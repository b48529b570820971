use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ForecastError, truncate_body};
use crate::model::{Coordinate, ForecastRow, ForecastTable, Units};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Client for the provider's 5-day / 3-hour forecast endpoint.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host. Tests use this to talk to a
    /// local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url,
        }
    }

    /// Fetch the forecast for one coordinate and flatten it into rows.
    ///
    /// One GET per call, no retries, no caching. The output holds one row
    /// per provider entry, in provider order; coordinates are passed
    /// through unvalidated, an out-of-range pair is the provider's to
    /// reject.
    pub async fn fetch_forecast(
        &self,
        coordinate: Coordinate,
        units: Units,
    ) -> Result<ForecastTable, ForecastError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);

        debug!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            units = %units,
            "requesting forecast"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
                ("units", units.as_str().to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ForecastError::Api {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwForecastResponse =
            serde_json::from_str(&body).map_err(ForecastError::from_json)?;

        debug!(entries = parsed.list.len(), "forecast received");

        let rows = parsed.list.into_iter().map(project_entry).collect();
        Ok(ForecastTable { rows })
    }
}

/// Flatten one provider entry into the fixed row schema.
///
/// The nested `main`, `sys`, `wind` and `clouds` groupings and the first
/// `weather` descriptor are projected field by field; the groupings
/// themselves do not survive. An empty `weather` list leaves the condition
/// fields unset.
fn project_entry(entry: OwEntry) -> ForecastRow {
    let (condition, description) = match entry.weather.into_iter().next() {
        Some(w) => (Some(w.main), Some(w.description)),
        None => (None, None),
    };

    ForecastRow {
        dt: entry.dt,
        timestamp: entry.dt_txt,
        temp: entry.main.temp,
        feels_like: entry.main.feels_like,
        temp_min: entry.main.temp_min,
        temp_max: entry.main.temp_max,
        pressure: entry.main.pressure,
        humidity: entry.main.humidity,
        part_of_day: entry.sys.pod,
        wind_speed: entry.wind.speed,
        wind_deg: entry.wind.deg,
        wind_gust: entry.wind.gust,
        cloud_cover: entry.clouds.all,
        condition,
        description,
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    pod: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: u16,
    gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    sys: OwSys,
    wind: OwWind,
    clouds: OwClouds,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwEntry>,
}
