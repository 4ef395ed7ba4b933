//! Core library for the `weather-report` CLI.
//!
//! This crate defines:
//! - Configuration for the weatherstack API
//! - The provider seam and its weatherstack implementation (fetching)
//! - The payload model and decoder
//! - The text report
//!
//! A run is strictly sequential: fetch, decode, report. Any error aborts it.

pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;

use std::io::Write;

use tracing::info;

pub use config::Config;
pub use decode::decode;
pub use error::{DataError, DecodeError, Error, FetchError};
pub use model::{Astro, Current, Location, LocationQuery, Request, WeatherResponse};
pub use provider::{WeatherProvider, WeatherstackProvider, provider_from_config};
pub use report::{render_report, write_report};

/// Fetch and decode the current conditions for `query`.
pub async fn fetch_weather(
    provider: &dyn WeatherProvider,
    query: &LocationQuery,
) -> Result<WeatherResponse, Error> {
    let bytes = provider.fetch_current(query).await?;
    Ok(decode(&bytes)?)
}

/// Fetch, decode and write the report to `out`.
pub async fn run<W: Write>(
    provider: &dyn WeatherProvider,
    query: &LocationQuery,
    out: &mut W,
) -> Result<(), Error> {
    let weather = fetch_weather(provider, query).await?;
    info!(location = %weather.location.name, "Writing weather report");
    write_report(out, &weather)?;
    out.flush()?;
    Ok(())
}
