use anyhow::{Context, anyhow};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastClient, Units, city_coordinate, known_cities};
use tracing::debug;

use crate::chart::{self, SeriesColors};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Temperature dashboard in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the provider API key and default units.
    Configure,

    /// List the known cities.
    Cities,

    /// Chart minimum/current/maximum temperature for a city and day.
    Chart {
        /// City name, e.g. "Boston" (see `forecast cities`).
        city: String,

        /// Day to chart, YYYY-MM-DD; defaults to today.
        #[arg(long)]
        day: Option<NaiveDate>,

        /// Unit system: imperial, metric or standard.
        #[arg(long)]
        units: Option<String>,

        /// Red channel of the bar colors (0-255).
        #[arg(long, default_value_t = 0)]
        red: u8,

        /// Green channel of the bar colors (0-255).
        #[arg(long, default_value_t = 128)]
        green: u8,

        /// Blue channel of the bar colors (0-255).
        #[arg(long, default_value_t = 255)]
        blue: u8,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Cities => {
                for (name, coordinate) in known_cities() {
                    println!(
                        "{name:<15} ({:.4}, {:.4})",
                        coordinate.latitude, coordinate.longitude
                    );
                }
                Ok(())
            }
            Command::Chart {
                city,
                day,
                units,
                red,
                green,
                blue,
            } => show_chart(city, day, units, red, green, blue).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let units = inquire::Select::new("Default units:", vec!["imperial", "metric", "standard"])
        .prompt()
        .context("Failed to read unit selection")?;

    config.api_key = Some(api_key);
    config.units = Some(units.to_string());
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn show_chart(
    city: String,
    day: Option<NaiveDate>,
    units: Option<String>,
    red: u8,
    green: u8,
    blue: u8,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = config.require_api_key()?;

    let units = match units {
        Some(s) => Units::try_from(s.as_str())?,
        None => config.default_units()?.unwrap_or_default(),
    };

    let coordinate = city_coordinate(&city).ok_or_else(|| {
        anyhow!("Unknown city '{city}'. Run `forecast cities` for the available ones.")
    })?;

    let day = day.unwrap_or_else(|| Local::now().date_naive());
    debug!(%city, %day, %units, "charting forecast");

    let client = ForecastClient::new(api_key.to_string());
    let table = client
        .fetch_forecast(coordinate, units)
        .await
        .with_context(|| format!("Failed to fetch the forecast for {city}"))?;

    let rows = table.rows_for_day(day)?;
    let rendered = chart::render(&city, day, units, &rows, SeriesColors::from_rgb(red, green, blue));
    print!("{rendered}");

    Ok(())
}
