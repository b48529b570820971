use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// A latitude/longitude pair in signed degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Unit systems recognized by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    #[default]
    Imperial,
    Metric,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
            Units::Standard => "standard",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Imperial, Units::Metric, Units::Standard]
    }

    /// Label for the temperature axis.
    pub fn temperature_label(&self) -> &'static str {
        match self {
            Units::Imperial => "°F",
            Units::Metric => "°C",
            Units::Standard => "K",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "imperial" => Ok(Units::Imperial),
            "metric" => Ok(Units::Metric),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: imperial, metric, standard."
            )),
        }
    }
}

/// One 3-hour forecast point, flattened from the provider's nested entry.
///
/// The provider nests temperature/pressure/humidity under `main`, the
/// part-of-day marker under `sys`, wind under `wind` and cloud cover under
/// `clouds`; the condition label comes from the first element of the
/// `weather` list. Each of those is projected field by field into this
/// struct and the nested groupings are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRow {
    /// Forecast point as epoch seconds.
    pub dt: i64,
    /// Forecast point as provider text, e.g. `2024-05-01 03:00:00`.
    pub timestamp: String,
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Pressure in hPa.
    pub pressure: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Part of day marker, `d` or `n`.
    pub part_of_day: String,
    pub wind_speed: f64,
    /// Wind direction in degrees.
    pub wind_deg: u16,
    pub wind_gust: Option<f64>,
    /// Cloud cover in percent.
    pub cloud_cover: u8,
    /// Condition group, e.g. "Rain". `None` when the provider sent an
    /// empty `weather` list.
    pub condition: Option<String>,
    /// Condition detail, e.g. "light rain".
    pub description: Option<String>,
}

/// Forecast rows in the order the provider returned them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastTable {
    pub rows: Vec<ForecastRow>,
}

impl ForecastTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose timestamp falls on `day`, paired with their hour of day,
    /// in provider order.
    pub fn rows_for_day(&self, day: NaiveDate) -> Result<Vec<(u32, &ForecastRow)>, ForecastError> {
        let mut matches = Vec::new();

        for row in &self.rows {
            let stamp = parse_timestamp(&row.timestamp)?;
            if stamp.date() == day {
                matches.push((stamp.hour(), row));
            }
        }

        Ok(matches)
    }

    /// Distinct hour-of-day values among rows on `day`, in first-seen
    /// order. Not sorted; callers must not assume numeric order.
    pub fn distinct_hours(&self, day: NaiveDate) -> Result<Vec<u32>, ForecastError> {
        let mut hours: Vec<u32> = Vec::new();

        for (hour, _) in self.rows_for_day(day)? {
            if !hours.contains(&hour) {
                hours.push(hour);
            }
        }

        Ok(hours)
    }
}

/// The provider writes `2024-05-01 03:00:00`; the ISO `T` separator is
/// accepted as well.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ForecastError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|err| ForecastError::Schema(format!("unusable timestamp '{raw}': {err}")))
}
