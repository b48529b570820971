//! Core library for the `forecast` terminal dashboard.
//!
//! This crate defines:
//! - The forecast client: one provider call, flattened into tabular rows
//! - Shared domain models (coordinates, rows, unit systems)
//! - The static city table and hour-of-day extraction
//! - Configuration & credentials handling
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod cities;
pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use cities::{city_coordinate, known_cities};
pub use client::ForecastClient;
pub use config::Config;
pub use error::ForecastError;
pub use model::{Coordinate, ForecastRow, ForecastTable, Units};
